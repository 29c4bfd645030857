//! Per-binding options and their resolved form.

use std::rc::Rc;

use waylay_config::{ButtonSet, DialogDefaults};
use waylay_view::{ElementId, ViewError, ViewTree};

use crate::callback::{Callback, CheckFn, ConfirmFn, HookFn, PreShowFn};

/// Caller-supplied overrides for one `bind` or `show` call.
///
/// Unset keys fall back to the shared [`DialogDefaults`] when the options
/// are resolved. All fields are public; the `with_*` builders exist for
/// call-site convenience.
#[derive(Clone, Default)]
pub struct ConfirmOptions {
    pub event: Option<String>,
    pub overlay: Option<String>,
    pub popup: Option<String>,
    pub confirm_button: Option<String>,
    pub deny_button: Option<String>,
    pub buttons: Option<ButtonSet>,
    /// Logical trigger for the programmatic `show` entry point.
    pub show_target: Option<ElementId>,
    /// Click-time predicate deciding whether the dialog is shown at all.
    pub do_check: Callback<CheckFn>,
    /// Decides whether a suppressed event passes through after a failed check.
    pub on_check_fail: Callback<CheckFn>,
    /// Decides whether the original action resumes after the confirm button.
    pub on_confirm: Callback<ConfirmFn>,
    /// Last-moment dialog customization, run before the panel is measured.
    pub pre_show: Option<Rc<PreShowFn>>,
    /// Side-effect hook for the deny path.
    pub on_deny: Option<Rc<HookFn>>,
}

impl ConfirmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_overlay(mut self, id: impl Into<String>) -> Self {
        self.overlay = Some(id.into());
        self
    }

    pub fn with_popup(mut self, id: impl Into<String>) -> Self {
        self.popup = Some(id.into());
        self
    }

    pub fn with_confirm_button(mut self, id: impl Into<String>) -> Self {
        self.confirm_button = Some(id.into());
        self
    }

    pub fn with_deny_button(mut self, id: impl Into<String>) -> Self {
        self.deny_button = Some(id.into());
        self
    }

    pub fn with_buttons(mut self, buttons: ButtonSet) -> Self {
        self.buttons = Some(buttons);
        self
    }

    pub fn with_show_target(mut self, id: impl Into<ElementId>) -> Self {
        self.show_target = Some(id.into());
        self
    }

    pub fn with_do_check(
        mut self,
        f: impl Fn(&mut ViewTree, Option<&str>) -> bool + 'static,
    ) -> Self {
        self.do_check = Callback::Func(Rc::new(f));
        self
    }

    pub fn with_do_check_fixed(mut self, pass: bool) -> Self {
        self.do_check = Callback::Fixed(pass);
        self
    }

    pub fn with_on_check_fail(
        mut self,
        f: impl Fn(&mut ViewTree, Option<&str>) -> bool + 'static,
    ) -> Self {
        self.on_check_fail = Callback::Func(Rc::new(f));
        self
    }

    pub fn with_on_check_fail_fixed(mut self, proceed: bool) -> Self {
        self.on_check_fail = Callback::Fixed(proceed);
        self
    }

    pub fn with_on_confirm(
        mut self,
        f: impl Fn(&mut ViewTree, Option<&str>, &str) -> bool + 'static,
    ) -> Self {
        self.on_confirm = Callback::Func(Rc::new(f));
        self
    }

    pub fn with_on_confirm_fixed(mut self, proceed: bool) -> Self {
        self.on_confirm = Callback::Fixed(proceed);
        self
    }

    pub fn with_pre_show(mut self, f: impl Fn(&mut ViewTree, Option<&str>, &str) + 'static) -> Self {
        self.pre_show = Some(Rc::new(f));
        self
    }

    pub fn with_on_deny(mut self, f: impl Fn(&mut ViewTree, Option<&str>) + 'static) -> Self {
        self.on_deny = Some(Rc::new(f));
        self
    }

    /// Merge onto `defaults`, key by key. Set keys shadow the default,
    /// unset keys keep it. Side-effect free.
    pub fn resolve(&self, defaults: &DialogDefaults) -> DialogSpec {
        DialogSpec {
            event: self.event.clone().unwrap_or_else(|| defaults.event.clone()),
            overlay: self
                .overlay
                .clone()
                .unwrap_or_else(|| defaults.overlay.clone()),
            popup: self.popup.clone().or_else(|| defaults.popup.clone()),
            confirm_button: self
                .confirm_button
                .clone()
                .unwrap_or_else(|| defaults.confirm_button.clone()),
            deny_button: self
                .deny_button
                .clone()
                .unwrap_or_else(|| defaults.deny_button.clone()),
            buttons: self.buttons.unwrap_or(defaults.buttons),
            show_target: self.show_target.clone(),
            do_check: self.do_check.clone(),
            on_check_fail: self.on_check_fail.clone(),
            on_confirm: self.on_confirm.clone(),
            pre_show: self.pre_show.clone(),
            on_deny: self.on_deny.clone(),
        }
    }
}

/// Resolved configuration for one binding.
///
/// Immutable for the binding's lifetime and reused across its cycles.
#[derive(Clone)]
pub struct DialogSpec {
    pub event: String,
    pub overlay: String,
    pub popup: Option<String>,
    pub confirm_button: String,
    pub deny_button: String,
    pub buttons: ButtonSet,
    pub show_target: Option<ElementId>,
    pub do_check: Callback<CheckFn>,
    pub on_check_fail: Callback<CheckFn>,
    pub on_confirm: Callback<ConfirmFn>,
    pub pre_show: Option<Rc<PreShowFn>>,
    pub on_deny: Option<Rc<HookFn>>,
}

impl DialogSpec {
    /// Resolve the dialog panel: the explicit popup identifier when set,
    /// otherwise the overlay's first child element.
    pub fn panel(&self, view: &ViewTree) -> Result<ElementId, ViewError> {
        if let Some(popup) = &self.popup {
            view.require(popup)?;
            return Ok(popup.clone());
        }
        let overlay = view.require(&self.overlay)?;
        match overlay.children.first().cloned() {
            Some(first) => {
                view.require(&first)?;
                Ok(first)
            }
            None => Err(ViewError::NoChildPanel(self.overlay.clone())),
        }
    }

    /// Look up the confirm button, scoped to the panel's subtree.
    pub fn confirm_button_in(&self, view: &ViewTree, panel: &str) -> Result<ElementId, ViewError> {
        self.lookup_button(view, panel, &self.confirm_button)
    }

    /// Look up the deny button, scoped to the panel's subtree.
    pub fn deny_button_in(&self, view: &ViewTree, panel: &str) -> Result<ElementId, ViewError> {
        self.lookup_button(view, panel, &self.deny_button)
    }

    fn lookup_button(
        &self,
        view: &ViewTree,
        panel: &str,
        button: &str,
    ) -> Result<ElementId, ViewError> {
        view.require(button)?;
        if view.in_subtree(panel, button) {
            Ok(button.to_owned())
        } else {
            Err(ViewError::MissingElement(button.to_owned()))
        }
    }
}
