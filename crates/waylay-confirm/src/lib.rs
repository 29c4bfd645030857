//! Confirmation gating for interactive views.
//!
//! Waylay attaches to trigger elements and suspends their default action
//! behind a modal confirm/deny dialog: the bound event is intercepted, an
//! optional click-time check decides whether the dialog appears, and the
//! original action is replayed exactly once when the user confirms,
//! without landing back in the interceptor.
//!
//! The overlay and dialog markup belong to the embedding application and
//! are addressed by identifier. At most one cycle is active per bound
//! element at a time, and the overlay/dialog pair is shared by
//! configuration, so cycles on different elements are expected not to
//! overlap.

mod binder;
mod cache;
mod callback;
mod controller;
mod error;
mod options;
mod presenter;

pub use binder::Binder;
pub use cache::{CacheSlot, VisibilityCache};
pub use callback::{Callback, CheckFn, ConfirmFn, HookFn, PreShowFn};
pub use error::{ConfirmError, Result};
pub use options::{ConfirmOptions, DialogSpec};
pub use presenter::{dismiss, present};

pub use waylay_config::{ButtonSet, DialogDefaults, WaylayConfig};
