use crate::tree::{Effect, ElementId};

/// Identifies one subscription in the tree's listener registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Per-dispatch event context handed to listeners.
///
/// A listener can stop the remaining listeners on the element for this
/// dispatch and suppress the element's intrinsic default action.
#[derive(Debug)]
pub struct EventState {
    target: ElementId,
    event: String,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(target: &str, event: &str) -> Self {
        Self {
            target: target.to_owned(),
            event: event.to_owned(),
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Element the event was dispatched on.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Name of the event being dispatched.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Skip the remaining listeners on the element for this dispatch.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Suppress the element's intrinsic default action for this dispatch.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Outcome of a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Whether a listener suppressed the intrinsic default action.
    pub default_prevented: bool,
    /// The intrinsic effect performed, if any.
    pub effect: Option<Effect>,
}
