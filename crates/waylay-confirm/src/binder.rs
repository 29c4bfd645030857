//! Binding manager: attaches the controller to trigger elements and
//! offers the programmatic `show` entry point.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;
use waylay_config::{DialogDefaults, WaylayConfig};
use waylay_view::{ElementId, ViewTree};

use crate::controller::{Binding, begin_cycle, on_trigger};
use crate::error::Result;
use crate::options::ConfirmOptions;

/// Attaches confirmation gates to trigger elements.
///
/// Defaults are copied when options are resolved, so changing them
/// afterwards never affects a binding that already exists. At most one
/// binding is kept per element and event name; rebinding replaces.
///
/// A resumed action replays through whatever other listeners and
/// intrinsic behavior the trigger has. A trigger with neither does
/// nothing when resumed; keeping one meaningful action on the trigger
/// is the caller's responsibility.
pub struct Binder {
    defaults: DialogDefaults,
    bindings: HashMap<(ElementId, String), Rc<Binding>>,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new(DialogDefaults::default())
    }
}

impl Binder {
    pub fn new(defaults: DialogDefaults) -> Self {
        Self {
            defaults,
            bindings: HashMap::new(),
        }
    }

    /// Build a binder from loaded application configuration.
    pub fn from_config(config: &WaylayConfig) -> Self {
        Self::new(config.dialog.clone())
    }

    pub fn defaults(&self) -> &DialogDefaults {
        &self.defaults
    }

    /// Gate the given elements behind a confirmation dialog for the
    /// resolved event.
    ///
    /// Options are resolved once and shared by every element in the
    /// call. A missing trigger element fails the whole call.
    pub fn bind<I, S>(
        &mut self,
        view: &mut ViewTree,
        elements: I,
        options: &ConfirmOptions,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<ElementId>,
    {
        let spec = Rc::new(options.resolve(&self.defaults));
        for element in elements {
            let element: ElementId = element.into();
            view.require(&element)?;
            let binding = Rc::new(Binding::bound(Rc::clone(&spec), element.clone()));
            let handler_binding = Rc::clone(&binding);
            let listener = view.listen(&element, &spec.event, move |view, ev| {
                on_trigger(view, ev, &handler_binding)
            });
            binding.listener.set(Some(listener));
            debug!(element = %element, event = %spec.event, "bound");
            if let Some(previous) = self.bindings.insert((element, spec.event.clone()), binding) {
                if let Some(old) = previous.listener.get() {
                    view.unlisten(old);
                }
            }
        }
        Ok(())
    }

    /// Drop the binding for an element and event name. Returns whether
    /// one existed.
    pub fn unbind(&mut self, view: &mut ViewTree, element: &str, event: &str) -> bool {
        match self.bindings.remove(&(element.to_owned(), event.to_owned())) {
            Some(binding) => {
                if let Some(listener) = binding.listener.get() {
                    view.unlisten(listener);
                }
                debug!(element, event, "unbound");
                true
            }
            None => false,
        }
    }

    /// Open the dialog immediately, without a bound trigger event.
    ///
    /// Callbacks see `show_target` as the logical trigger; on confirm,
    /// when a target is set, its resolved event is dispatched on it
    /// once. Without a target the dialog still runs, but confirmation
    /// resumes nothing.
    pub fn show(&self, view: &mut ViewTree, options: &ConfirmOptions) -> Result<()> {
        let spec = Rc::new(options.resolve(&self.defaults));
        let binding = Rc::new(Binding::programmatic(spec));
        let trigger = binding.trigger.clone();
        begin_cycle(view, &binding, trigger)?;
        Ok(())
    }
}
