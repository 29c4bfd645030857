use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, ViewError};
use crate::event::{Dispatch, EventState, ListenerId};

pub type ElementId = String;

/// Inline style surface for an element. Only the properties the dialog
/// flow touches are modeled; `None` means no inline value is set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Rendered box sizes, written by the embedding layout and read-only
/// here. `width`/`height` are the content box; the `outer_*` pair
/// includes borders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BoxMetrics {
    pub width: f32,
    pub height: f32,
    pub outer_width: f32,
    pub outer_height: f32,
}

/// Native default action of an element, performed when a dispatch ends
/// with the default not prevented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intrinsic {
    Navigate { href: String },
    Submit { form_id: String },
}

/// Record of a performed intrinsic, queued on the tree for the embedding
/// application to drain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Navigated { element: ElementId, href: String },
    Submitted { element: ElementId, form_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(default)]
    pub children: Vec<ElementId>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub metrics: BoxMetrics,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intrinsic: Option<Intrinsic>,
}

impl Element {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            style: Style::default(),
            metrics: BoxMetrics::default(),
            intrinsic: None,
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ElementId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.style.display = Some(display.into());
        self
    }

    pub fn with_metrics(mut self, metrics: BoxMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_intrinsic(mut self, intrinsic: Intrinsic) -> Self {
        self.intrinsic = Some(intrinsic);
        self
    }
}

type Handler = Box<dyn FnMut(&mut ViewTree, &mut EventState) -> Result<()>>;

struct ListenerSlot {
    id: ListenerId,
    target: ElementId,
    event: String,
    active: bool,
    handler: Option<Handler>,
}

impl fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSlot")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("event", &self.event)
            .field("active", &self.active)
            .finish()
    }
}

/// Id-addressed element tree with an event bus.
///
/// Lookup is linear by id. Node data serializes; the listener registry
/// and the effect queue are runtime state and are skipped.
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewTree {
    pub root: ElementId,
    #[serde(default)]
    pub nodes: Vec<Element>,
    #[serde(skip)]
    listeners: Vec<ListenerSlot>,
    #[serde(skip)]
    next_listener: u64,
    #[serde(skip)]
    effects: Vec<Effect>,
}

impl ViewTree {
    pub fn new(root: Element) -> Self {
        let root_id = root.id.clone();
        Self {
            root: root_id,
            nodes: vec![root],
            listeners: Vec::new(),
            next_listener: 0,
            effects: Vec::new(),
        }
    }

    pub fn insert(&mut self, element: Element) {
        self.nodes.push(element);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Element> {
        self.element(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_owned()))
    }

    pub fn require_mut(&mut self, id: &str) -> Result<&mut Element> {
        self.element_mut(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_owned()))
    }

    /// Whether `id` is `root` or a descendant of it.
    pub fn in_subtree(&self, root: &str, id: &str) -> bool {
        let mut stack: Vec<&str> = vec![root];
        while let Some(current) = stack.pop() {
            if current == id {
                return true;
            }
            if let Some(element) = self.element(current) {
                stack.extend(element.children.iter().map(String::as_str));
            }
        }
        false
    }

    /// Current inline display value of an element.
    pub fn display(&self, id: &str) -> Result<Option<String>> {
        Ok(self.require(id)?.style.display.clone())
    }

    /// Set or clear an element's inline display value.
    pub fn set_display(&mut self, id: &str, value: Option<String>) -> Result<()> {
        self.require_mut(id)?.style.display = value;
        Ok(())
    }

    pub fn metrics(&self, id: &str) -> Result<BoxMetrics> {
        Ok(self.require(id)?.metrics)
    }

    pub fn set_metrics(&mut self, id: &str, metrics: BoxMetrics) -> Result<()> {
        self.require_mut(id)?.metrics = metrics;
        Ok(())
    }

    /// Subscribe a handler for a named event on an element.
    ///
    /// Listeners run in subscription order. The returned id is used to
    /// unsubscribe or to suspend the listener in place.
    pub fn listen<F>(&mut self, target: &str, event: &str, handler: F) -> ListenerId
    where
        F: FnMut(&mut ViewTree, &mut EventState) -> Result<()> + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(ListenerSlot {
            id,
            target: target.to_owned(),
            event: event.to_owned(),
            active: true,
            handler: Some(Box::new(handler)),
        });
        id
    }

    /// Remove a listener. Returns whether it existed. A listener removed
    /// while a dispatch is in flight is not invoked later in it.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|slot| slot.id != id);
        self.listeners.len() != before
    }

    /// Deactivate a listener without removing it; dispatch skips it until
    /// [`ViewTree::resume_listener`]. Reactivation keeps the original
    /// position in the handler order.
    pub fn suspend_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter_mut().find(|slot| slot.id == id) {
            Some(slot) => {
                slot.active = false;
                true
            }
            None => false,
        }
    }

    pub fn resume_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter_mut().find(|slot| slot.id == id) {
            Some(slot) => {
                slot.active = true;
                true
            }
            None => false,
        }
    }

    /// Dispatch a named event on an element.
    ///
    /// Runs the element's listeners in subscription order, honoring
    /// stop-propagation, then performs the element's intrinsic default
    /// action unless a listener prevented it. Handler errors abort the
    /// dispatch and propagate.
    pub fn dispatch(&mut self, target: &str, event: &str) -> Result<Dispatch> {
        self.require(target)?;
        let matching: Vec<ListenerId> = self
            .listeners
            .iter()
            .filter(|slot| slot.active && slot.target == target && slot.event == event)
            .map(|slot| slot.id)
            .collect();
        trace!(element = target, event, listeners = matching.len(), "dispatch");

        let mut state = EventState::new(target, event);
        for id in matching {
            if state.propagation_stopped() {
                break;
            }
            let Some(index) = self.listeners.iter().position(|slot| slot.id == id) else {
                continue;
            };
            if !self.listeners[index].active {
                continue;
            }
            // Take the handler out of its slot so it can borrow the tree;
            // a nested dispatch then simply skips the vacated slot.
            let Some(mut handler) = self.listeners[index].handler.take() else {
                continue;
            };
            let outcome = handler(self, &mut state);
            if let Some(slot) = self.listeners.iter_mut().find(|slot| slot.id == id) {
                slot.handler = Some(handler);
            }
            outcome?;
        }

        let effect = if state.default_prevented() {
            None
        } else {
            self.perform_intrinsic(target)
        };
        Ok(Dispatch {
            default_prevented: state.default_prevented(),
            effect,
        })
    }

    /// Take the queued effects, leaving the queue empty.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        mem::take(&mut self.effects)
    }

    fn perform_intrinsic(&mut self, target: &str) -> Option<Effect> {
        let element = self.element(target)?;
        let effect = match element.intrinsic.as_ref()? {
            Intrinsic::Navigate { href } => Effect::Navigated {
                element: element.id.clone(),
                href: href.clone(),
            },
            Intrinsic::Submit { form_id } => Effect::Submitted {
                element: element.id.clone(),
                form_id: form_id.clone(),
            },
        };
        self.effects.push(effect.clone());
        Some(effect)
    }
}
