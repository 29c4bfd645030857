//! Waylay: confirmation gating for interactive views.
//!
//! Waylay binds trigger elements to a modal confirm/deny dialog. The
//! bound event is intercepted and suspended; only an explicit
//! confirmation replays the original action, exactly once and without
//! re-entering the interceptor.
//!
//! ```
//! use waylay::{Binder, ConfirmOptions, Effect, Element, Intrinsic, ViewTree};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut view = ViewTree::new(Element::new("root").with_children(["delete", "confirm"]));
//!     view.insert(Element::new("delete").with_intrinsic(Intrinsic::Navigate {
//!         href: "/records/42/delete".into(),
//!     }));
//!     view.insert(Element::new("confirm").with_display("none").with_children(["panel"]));
//!     view.insert(Element::new("panel").with_display("none").with_children(["m1_yes", "m1_no"]));
//!     view.insert(Element::new("m1_yes"));
//!     view.insert(Element::new("m1_no"));
//!
//!     let mut binder = Binder::default();
//!     binder.bind(&mut view, ["delete"], &ConfirmOptions::new())?;
//!
//!     // The click is intercepted: the dialog opens, nothing navigates.
//!     view.dispatch("delete", "click")?;
//!     assert!(view.drain_effects().is_empty());
//!
//!     // Confirming replays the suppressed action exactly once.
//!     view.dispatch("m1_yes", "click")?;
//!     assert!(matches!(
//!         view.drain_effects().as_slice(),
//!         [Effect::Navigated { .. }]
//!     ));
//!     Ok(())
//! }
//! ```

pub use waylay_confirm::{
    Binder, ButtonSet, CacheSlot, Callback, CheckFn, ConfirmError, ConfirmFn, ConfirmOptions,
    DialogDefaults, DialogSpec, HookFn, PreShowFn, VisibilityCache, WaylayConfig,
};
pub use waylay_view::{
    BoxMetrics, Dispatch, Effect, Element, ElementId, EventState, Intrinsic, ListenerId, Style,
    ViewError, ViewTree,
};
