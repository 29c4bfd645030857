//! Button visibility cache.
//!
//! When a cycle suppresses one of the action buttons, the button's
//! current inline display value is parked here and written back when the
//! dialog closes. Slots are occupied only between hide and restore.

use waylay_view::{ViewError, ViewTree};

/// Parked display values for the two action buttons.
#[derive(Debug, Default)]
pub struct VisibilityCache {
    confirm: Option<String>,
    deny: Option<String>,
}

/// Which button a cache slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSlot {
    Confirm,
    Deny,
}

impl VisibilityCache {
    /// Clear both slots. Runs at the start of every cycle so state left
    /// behind by an externally dismissed dialog cannot leak into it.
    pub fn reset(&mut self) {
        self.confirm = None;
        self.deny = None;
    }

    pub fn is_clear(&self) -> bool {
        self.confirm.is_none() && self.deny.is_none()
    }

    /// Park the button's inline display value (empty string when none is
    /// set) and hide the button. At most one hide per slot per cycle; a
    /// second would park the literal "none".
    pub fn hide(
        &mut self,
        view: &mut ViewTree,
        slot: CacheSlot,
        button: &str,
    ) -> Result<(), ViewError> {
        let previous = view.display(button)?.unwrap_or_default();
        *self.slot_mut(slot) = Some(previous);
        view.set_display(button, Some("none".to_owned()))
    }

    /// Write the parked display value back and vacate the slot. A vacant
    /// slot is a no-op, so both buttons can be restored unconditionally
    /// on dismiss.
    pub fn restore(
        &mut self,
        view: &mut ViewTree,
        slot: CacheSlot,
        button: &str,
    ) -> Result<(), ViewError> {
        let Some(previous) = self.slot_mut(slot).take() else {
            return Ok(());
        };
        let value = if previous.is_empty() {
            None
        } else {
            Some(previous)
        };
        view.set_display(button, value)
    }

    fn slot_mut(&mut self, slot: CacheSlot) -> &mut Option<String> {
        match slot {
            CacheSlot::Confirm => &mut self.confirm,
            CacheSlot::Deny => &mut self.deny,
        }
    }
}
