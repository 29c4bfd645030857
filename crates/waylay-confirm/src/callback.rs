//! Boolean-or-function decision options.
//!
//! Options such as `on_confirm` accept a real function, a fixed boolean,
//! or nothing at all. The variant makes the three shapes explicit, and
//! [`Callback::decide`] keeps each call site's absent-value policy in one
//! place instead of scattering coercion rules.

use std::fmt;
use std::rc::Rc;

use waylay_view::ViewTree;

/// Predicate and pass-through decision signature: the view plus the
/// logical trigger element, when one exists.
pub type CheckFn = dyn Fn(&mut ViewTree, Option<&str>) -> bool;

/// Confirm decision signature: view, logical trigger, dialog panel.
pub type ConfirmFn = dyn Fn(&mut ViewTree, Option<&str>, &str) -> bool;

/// Side-effect hook signature: the view plus the logical trigger.
pub type HookFn = dyn Fn(&mut ViewTree, Option<&str>);

/// Pre-show hook signature: view, logical trigger, dialog panel.
pub type PreShowFn = dyn Fn(&mut ViewTree, Option<&str>, &str);

/// A decision option: absent, a fixed boolean, or a function.
pub enum Callback<F: ?Sized> {
    Absent,
    Fixed(bool),
    Func(Rc<F>),
}

impl<F: ?Sized> Callback<F> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Callback::Absent)
    }

    /// Resolve the decision for one call site.
    ///
    /// `when_absent` is the site's policy for a missing option; `call`
    /// evaluates a function variant against the site's arguments. A fixed
    /// boolean always wins over the policy.
    pub fn decide(&self, when_absent: bool, call: impl FnOnce(&F) -> bool) -> bool {
        match self {
            Callback::Absent => when_absent,
            Callback::Fixed(value) => *value,
            Callback::Func(f) => call(f),
        }
    }
}

impl<F: ?Sized> Default for Callback<F> {
    fn default() -> Self {
        Callback::Absent
    }
}

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        match self {
            Callback::Absent => Callback::Absent,
            Callback::Fixed(value) => Callback::Fixed(*value),
            Callback::Func(f) => Callback::Func(Rc::clone(f)),
        }
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Absent => f.write_str("Absent"),
            Callback::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Callback::Func(_) => f.write_str("Func(..)"),
        }
    }
}
