//! Dialog presenter: shows, centers, and hides the overlay/panel pair.

use tracing::debug;
use waylay_config::ButtonSet;
use waylay_view::{ElementId, ViewError, ViewTree};

use crate::cache::{CacheSlot, VisibilityCache};
use crate::options::DialogSpec;

/// Show the overlay and the centered dialog panel for one cycle.
///
/// The overlay becomes visible before the panel is measured, so sizing
/// can depend on overlay-relative layout; the `pre_show` hook runs after
/// the overlay is shown and before measurement for the same reason.
/// Centering applies the panel's negative half-outer-size as top/left
/// margins and pins its content box to the measured size. Returns the
/// panel's identifier.
pub fn present(
    view: &mut ViewTree,
    trigger: Option<&str>,
    spec: &DialogSpec,
    cache: &mut VisibilityCache,
) -> Result<ElementId, ViewError> {
    view.require(&spec.overlay)?;
    let panel = spec.panel(view)?;

    // A cycle abandoned without dismiss (external navigation) can leave
    // parked button state behind; start clean.
    cache.reset();

    view.set_display(&spec.overlay, Some("block".to_owned()))?;

    match spec.buttons {
        ButtonSet::Both => {}
        ButtonSet::ConfirmOnly => {
            let deny = spec.deny_button_in(view, &panel)?;
            cache.hide(view, CacheSlot::Deny, &deny)?;
        }
        ButtonSet::DenyOnly => {
            let confirm = spec.confirm_button_in(view, &panel)?;
            cache.hide(view, CacheSlot::Confirm, &confirm)?;
        }
    }

    if let Some(pre_show) = &spec.pre_show {
        pre_show(view, trigger, &panel);
    }

    let metrics = view.metrics(&panel)?;
    let element = view.require_mut(&panel)?;
    element.style.margin_top = Some(-metrics.outer_height / 2.0);
    element.style.margin_left = Some(-metrics.outer_width / 2.0);
    element.style.width = Some(metrics.width);
    element.style.height = Some(metrics.height);
    element.style.display = Some("block".to_owned());

    debug!(overlay = %spec.overlay, panel = %panel, "dialog shown");
    Ok(panel)
}

/// Hide the panel and the overlay, then put back whichever buttons this
/// cycle hid.
pub fn dismiss(
    view: &mut ViewTree,
    spec: &DialogSpec,
    cache: &mut VisibilityCache,
    panel: &str,
) -> Result<(), ViewError> {
    view.set_display(panel, Some("none".to_owned()))?;
    view.set_display(&spec.overlay, Some("none".to_owned()))?;
    cache.restore(view, CacheSlot::Confirm, &spec.confirm_button)?;
    cache.restore(view, CacheSlot::Deny, &spec.deny_button)?;
    debug!(overlay = %spec.overlay, panel = %panel, "dialog dismissed");
    Ok(())
}
