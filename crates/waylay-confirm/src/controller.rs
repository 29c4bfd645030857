//! Confirmation controller.
//!
//! One binding drives the intercept, check, show, confirm-or-deny,
//! resume-or-abort cycle for a trigger element. The trigger's own
//! listener is suspended while the original event is replayed, which is
//! what keeps the replay from being intercepted a second time.

use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::Rc;

use tracing::{debug, warn};
use waylay_view::{ElementId, EventState, ListenerId, ViewError, ViewTree};

use crate::cache::VisibilityCache;
use crate::options::DialogSpec;
use crate::presenter::{dismiss, present};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Showing,
}

#[derive(Default)]
struct CycleState {
    phase: Phase,
    cache: VisibilityCache,
    armed: Vec<ListenerId>,
    dismissed: bool,
}

/// Shared state behind one binding: the resolved dialog options, the
/// trigger element, the interceptor's own listener id, and the state of
/// the cycle currently in flight, if any.
pub(crate) struct Binding {
    pub(crate) spec: Rc<DialogSpec>,
    pub(crate) trigger: Option<ElementId>,
    pub(crate) listener: Cell<Option<ListenerId>>,
    cycle: RefCell<CycleState>,
}

impl Binding {
    pub(crate) fn bound(spec: Rc<DialogSpec>, trigger: ElementId) -> Self {
        Self {
            spec,
            trigger: Some(trigger),
            listener: Cell::new(None),
            cycle: RefCell::new(CycleState::default()),
        }
    }

    pub(crate) fn programmatic(spec: Rc<DialogSpec>) -> Self {
        let trigger = spec.show_target.clone();
        Self {
            spec,
            trigger,
            listener: Cell::new(None),
            cycle: RefCell::new(CycleState::default()),
        }
    }

    fn showing(&self) -> bool {
        self.cycle.borrow().phase == Phase::Showing
    }
}

/// Entry point for the bound trigger event.
pub(crate) fn on_trigger(
    view: &mut ViewTree,
    ev: &mut EventState,
    binding: &Rc<Binding>,
) -> Result<(), ViewError> {
    if binding.showing() {
        // One cycle per trigger at a time; the repeat firing is swallowed.
        warn!(trigger = %ev.target(), "trigger fired during an active cycle; consumed");
        ev.stop_propagation();
        ev.prevent_default();
        return Ok(());
    }

    let trigger = ev.target().to_owned();
    let passed = binding
        .spec
        .do_check
        .decide(true, |f| f(view, Some(&trigger)));
    if passed {
        debug!(trigger = %trigger, event = %ev.event(), "check passed; intercepting");
        ev.stop_propagation();
        ev.prevent_default();
        begin_cycle(view, binding, Some(trigger))
    } else {
        check_failed(view, ev, binding, &trigger)
    }
}

fn check_failed(
    view: &mut ViewTree,
    ev: &mut EventState,
    binding: &Rc<Binding>,
    trigger: &str,
) -> Result<(), ViewError> {
    let proceed = binding
        .spec
        .on_check_fail
        .decide(false, |f| f(view, Some(trigger)));
    debug!(trigger = %trigger, proceed, "check failed");
    if proceed {
        // The event was never suppressed; it runs its course untouched.
        return Ok(());
    }
    if let Some(on_deny) = &binding.spec.on_deny {
        on_deny(view, Some(trigger));
    }
    ev.stop_propagation();
    ev.prevent_default();
    Ok(())
}

/// Present the dialog and arm its buttons. Entered by the bound flow
/// after a passed check and directly by the programmatic `show`.
pub(crate) fn begin_cycle(
    view: &mut ViewTree,
    binding: &Rc<Binding>,
    trigger: Option<String>,
) -> Result<(), ViewError> {
    {
        let mut cycle = binding.cycle.borrow_mut();
        cycle.phase = Phase::Showing;
        cycle.dismissed = false;
    }
    match arm_dialog(view, binding, trigger) {
        Ok(()) => Ok(()),
        Err(error) => {
            binding.cycle.borrow_mut().phase = Phase::Idle;
            Err(error)
        }
    }
}

fn arm_dialog(
    view: &mut ViewTree,
    binding: &Rc<Binding>,
    trigger: Option<String>,
) -> Result<(), ViewError> {
    let mut cache = mem::take(&mut binding.cycle.borrow_mut().cache);
    let presented = present(view, trigger.as_deref(), &binding.spec, &mut cache);
    binding.cycle.borrow_mut().cache = cache;
    let panel = presented?;

    // Resolve both buttons before arming anything, so a bad identifier
    // cannot leave a half-armed dialog behind.
    let confirm_button = if binding.spec.buttons.shows_confirm() {
        Some(binding.spec.confirm_button_in(view, &panel)?)
    } else {
        None
    };
    let deny_button = if binding.spec.buttons.shows_deny() {
        Some(binding.spec.deny_button_in(view, &panel)?)
    } else {
        None
    };

    // One-shot handlers, re-armed fresh each cycle: pre_show may have
    // rebuilt the panel contents since the last one.
    let mut armed = Vec::new();
    if let Some(button) = confirm_button {
        let handler_binding = Rc::clone(binding);
        let handler_panel = panel.clone();
        let handler_trigger = trigger.clone();
        armed.push(view.listen(&button, "click", move |view, ev| {
            on_confirm_click(
                view,
                ev,
                &handler_binding,
                &handler_panel,
                handler_trigger.as_deref(),
            )
        }));
    }
    if let Some(button) = deny_button {
        let handler_binding = Rc::clone(binding);
        let handler_panel = panel.clone();
        let handler_trigger = trigger;
        armed.push(view.listen(&button, "click", move |view, ev| {
            on_deny_click(
                view,
                ev,
                &handler_binding,
                &handler_panel,
                handler_trigger.as_deref(),
            )
        }));
    }
    binding.cycle.borrow_mut().armed = armed;
    Ok(())
}

/// Disarm the buttons and take down the dialog. Returns false when the
/// cycle was already dismissed, which makes rapid double activation of
/// either button inert.
fn close_cycle(view: &mut ViewTree, binding: &Binding, panel: &str) -> Result<bool, ViewError> {
    let armed = {
        let mut cycle = binding.cycle.borrow_mut();
        if cycle.dismissed {
            return Ok(false);
        }
        cycle.dismissed = true;
        mem::take(&mut cycle.armed)
    };
    for listener in armed {
        view.unlisten(listener);
    }

    let mut cache = mem::take(&mut binding.cycle.borrow_mut().cache);
    let result = dismiss(view, &binding.spec, &mut cache, panel);
    {
        let mut cycle = binding.cycle.borrow_mut();
        cycle.cache = cache;
        cycle.phase = Phase::Idle;
    }
    result?;
    Ok(true)
}

fn on_confirm_click(
    view: &mut ViewTree,
    ev: &mut EventState,
    binding: &Rc<Binding>,
    panel: &str,
    trigger: Option<&str>,
) -> Result<(), ViewError> {
    ev.stop_propagation();
    if !close_cycle(view, binding, panel)? {
        return Ok(());
    }
    let proceed = binding
        .spec
        .on_confirm
        .decide(true, |f| f(view, trigger, panel));
    debug!(?trigger, proceed, "confirmed");
    if !proceed {
        ev.prevent_default();
        return Ok(());
    }
    resume_original(view, binding)
}

fn on_deny_click(
    view: &mut ViewTree,
    ev: &mut EventState,
    binding: &Rc<Binding>,
    panel: &str,
    trigger: Option<&str>,
) -> Result<(), ViewError> {
    ev.stop_propagation();
    ev.prevent_default();
    if !close_cycle(view, binding, panel)? {
        return Ok(());
    }
    debug!(?trigger, "denied");
    if let Some(on_deny) = &binding.spec.on_deny {
        on_deny(view, trigger);
    }
    Ok(())
}

/// Replay the trigger's original action exactly once.
///
/// The binding's own listener is suspended around the replay, so the
/// dispatch runs the trigger's remaining listeners and intrinsic default
/// without landing back in `on_trigger`.
fn resume_original(view: &mut ViewTree, binding: &Rc<Binding>) -> Result<(), ViewError> {
    let Some(target) = binding.trigger.as_deref() else {
        // Programmatic show without a target: nothing to replay.
        return Ok(());
    };
    match binding.listener.get() {
        Some(listener) => {
            view.suspend_listener(listener);
            let replay = view.dispatch(target, &binding.spec.event);
            view.resume_listener(listener);
            debug!(trigger = %target, event = %binding.spec.event, "original action resumed");
            replay?;
        }
        None => {
            // `show` bound no interceptor to the target, so a plain
            // dispatch cannot loop back here.
            view.dispatch(target, &binding.spec.event)?;
            debug!(trigger = %target, event = %binding.spec.event, "show target event dispatched");
        }
    }
    Ok(())
}
