use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use waylay_confirm::{Binder, ButtonSet, ConfirmOptions};
use waylay_view::{BoxMetrics, Effect, Element, Intrinsic, ViewTree};

fn dialog_view() -> ViewTree {
    let mut view = ViewTree::new(Element::new("root").with_children(["delete", "confirm"]));
    view.insert(Element::new("delete").with_intrinsic(Intrinsic::Navigate {
        href: "/records/42/delete".into(),
    }));
    view.insert(
        Element::new("confirm")
            .with_display("none")
            .with_children(["panel"]),
    );
    view.insert(
        Element::new("panel")
            .with_display("none")
            .with_metrics(BoxMetrics {
                width: 320.0,
                height: 120.0,
                outer_width: 340.0,
                outer_height: 140.0,
            })
            .with_children(["m1_yes", "m1_no"]),
    );
    view.insert(Element::new("m1_yes"));
    view.insert(Element::new("m1_no"));
    view
}

fn display(view: &ViewTree, id: &str) -> Option<String> {
    view.display(id).expect("element should exist")
}

#[test]
fn confirm_resumes_the_original_action_once() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    binder.bind(&mut view, ["delete"], &ConfirmOptions::new())?;

    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "confirm"), Some("block".into()));
    assert!(
        view.drain_effects().is_empty(),
        "action must not fire before confirmation"
    );

    view.dispatch("m1_yes", "click")?;
    assert_eq!(display(&view, "confirm"), Some("none".into()));
    assert_eq!(display(&view, "panel"), Some("none".into()));
    let effects = view.drain_effects();
    assert_eq!(
        effects,
        vec![Effect::Navigated {
            element: "delete".into(),
            href: "/records/42/delete".into(),
        }]
    );

    // The buttons were disarmed with the dialog; a stray click does nothing.
    view.dispatch("m1_yes", "click")?;
    assert!(view.drain_effects().is_empty());
    Ok(())
}

#[test]
fn intercept_centers_and_sizes_the_panel() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    binder.bind(&mut view, ["delete"], &ConfirmOptions::new())?;

    view.dispatch("delete", "click")?;
    let panel = view.require("panel")?;
    assert_eq!(panel.style.display, Some("block".into()));
    assert_eq!(panel.style.margin_top, Some(-70.0));
    assert_eq!(panel.style.margin_left, Some(-170.0));
    assert_eq!(panel.style.width, Some(320.0));
    assert_eq!(panel.style.height, Some(120.0));
    Ok(())
}

#[test]
fn replay_does_not_reenter_the_interceptor() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let checks = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&checks);
    let options = ConfirmOptions::new().with_do_check(move |_, _| {
        counter.set(counter.get() + 1);
        true
    });
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    view.dispatch("m1_yes", "click")?;

    assert_eq!(checks.get(), 1, "the replay must bypass the check");
    assert_eq!(view.drain_effects().len(), 1, "the action replays exactly once");
    Ok(())
}

#[test]
fn binding_survives_for_later_cycles() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    binder.bind(&mut view, ["delete"], &ConfirmOptions::new())?;

    view.dispatch("delete", "click")?;
    view.dispatch("m1_yes", "click")?;
    assert_eq!(view.drain_effects().len(), 1);

    // The listener was re-attached after the replay.
    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "confirm"), Some("block".into()));
    assert!(view.drain_effects().is_empty());
    Ok(())
}

#[test]
fn check_failure_fails_closed() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let denials = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&denials);
    let options = ConfirmOptions::new()
        .with_do_check(|_, _| false)
        .with_on_deny(move |_, trigger| {
            log.borrow_mut().push(trigger.map(str::to_owned));
        });
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;

    assert_eq!(display(&view, "confirm"), Some("none".into()), "no dialog shown");
    assert!(view.drain_effects().is_empty(), "the action must be blocked");
    assert_eq!(*denials.borrow(), vec![Some("delete".to_owned())]);
    Ok(())
}

#[test]
fn check_failure_hook_can_pass_the_event_through() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let denied = Rc::new(Cell::new(false));
    let flag = Rc::clone(&denied);
    let options = ConfirmOptions::new()
        .with_do_check(|_, _| false)
        .with_on_check_fail(|_, _| true)
        .with_on_deny(move |_, _| flag.set(true));
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;

    assert_eq!(display(&view, "confirm"), Some("none".into()));
    assert_eq!(view.drain_effects().len(), 1, "the event proceeds unimpeded");
    assert!(!denied.get());
    Ok(())
}

#[test]
fn check_failure_honors_a_fixed_proceed_value() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let options = ConfirmOptions::new()
        .with_do_check_fixed(false)
        .with_on_check_fail_fixed(true);
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    assert_eq!(view.drain_effects().len(), 1);

    let mut view = dialog_view();
    let mut binder = Binder::default();
    let options = ConfirmOptions::new()
        .with_do_check_fixed(false)
        .with_on_check_fail_fixed(false);
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    assert!(view.drain_effects().is_empty());
    Ok(())
}

#[test]
fn declined_confirm_resumes_nothing() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let options = ConfirmOptions::new().with_on_confirm_fixed(false);
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    view.dispatch("m1_yes", "click")?;

    assert_eq!(display(&view, "confirm"), Some("none".into()), "dialog hidden");
    assert!(view.drain_effects().is_empty(), "no resume on a declined confirm");

    // The cycle still ended cleanly; the next activation opens a new one.
    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "confirm"), Some("block".into()));
    Ok(())
}

#[test]
fn confirm_callback_sees_trigger_and_panel() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let seen = Rc::new(RefCell::new(None));
    let record = Rc::clone(&seen);
    let options = ConfirmOptions::new().with_on_confirm(move |_, trigger, panel| {
        *record.borrow_mut() = Some((trigger.map(str::to_owned), panel.to_owned()));
        true
    });
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    view.dispatch("m1_yes", "click")?;

    assert_eq!(
        *seen.borrow(),
        Some((Some("delete".to_owned()), "panel".to_owned()))
    );
    assert_eq!(view.drain_effects().len(), 1);
    Ok(())
}

#[test]
fn deny_never_resumes() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let denials = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&denials);
    let options = ConfirmOptions::new()
        .with_on_confirm_fixed(true)
        .with_on_deny(move |_, _| counter.set(counter.get() + 1));
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    view.dispatch("m1_no", "click")?;

    assert_eq!(display(&view, "confirm"), Some("none".into()));
    assert!(view.drain_effects().is_empty());
    assert_eq!(denials.get(), 1);
    Ok(())
}

#[test]
fn confirm_only_hides_and_restores_the_deny_button() -> Result<()> {
    let mut view = dialog_view();
    view.set_display("m1_no", Some("inline-block".into()))?;
    let mut binder = Binder::default();
    let options = ConfirmOptions::new().with_buttons(ButtonSet::ConfirmOnly);
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "m1_no"), Some("none".into()));

    view.dispatch("m1_yes", "click")?;
    assert_eq!(display(&view, "m1_no"), Some("inline-block".into()));
    assert_eq!(view.drain_effects().len(), 1);
    Ok(())
}

#[test]
fn hidden_button_without_inline_value_restores_to_unset() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let options = ConfirmOptions::new().with_buttons(ButtonSet::ConfirmOnly);
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "m1_no"), Some("none".into()));

    view.dispatch("m1_yes", "click")?;
    assert_eq!(display(&view, "m1_no"), None);
    Ok(())
}

#[test]
fn deny_only_suppresses_the_confirm_button() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let options = ConfirmOptions::new().with_buttons(ButtonSet::DenyOnly);
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "m1_yes"), Some("none".into()));

    // The hidden confirm button was never armed.
    view.dispatch("m1_yes", "click")?;
    assert_eq!(display(&view, "confirm"), Some("block".into()));
    assert!(view.drain_effects().is_empty());

    view.dispatch("m1_no", "click")?;
    assert_eq!(display(&view, "confirm"), Some("none".into()));
    Ok(())
}

#[test]
fn programmatic_show_dispatches_the_target_event() -> Result<()> {
    let mut view = dialog_view();
    let binder = Binder::default();
    let options = ConfirmOptions::new()
        .with_show_target("delete")
        .with_on_confirm_fixed(true);
    binder.show(&mut view, &options)?;

    assert_eq!(display(&view, "confirm"), Some("block".into()));
    assert!(view.drain_effects().is_empty());

    view.dispatch("m1_yes", "click")?;
    assert_eq!(
        view.drain_effects(),
        vec![Effect::Navigated {
            element: "delete".into(),
            href: "/records/42/delete".into(),
        }]
    );
    Ok(())
}

#[test]
fn programmatic_show_without_target_confirms_quietly() -> Result<()> {
    let mut view = dialog_view();
    let binder = Binder::default();
    binder.show(&mut view, &ConfirmOptions::new())?;

    assert_eq!(display(&view, "confirm"), Some("block".into()));
    view.dispatch("m1_yes", "click")?;
    assert_eq!(display(&view, "confirm"), Some("none".into()));
    assert!(view.drain_effects().is_empty());
    Ok(())
}

#[test]
fn rebinding_replaces_the_previous_binding() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();

    let first = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&first);
    let options = ConfirmOptions::new().with_do_check(move |_, _| {
        counter.set(counter.get() + 1);
        true
    });
    binder.bind(&mut view, ["delete"], &options)?;

    let second = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&second);
    let options = ConfirmOptions::new().with_do_check(move |_, _| {
        counter.set(counter.get() + 1);
        true
    });
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    assert_eq!(first.get(), 0, "the replaced binding must not run");
    assert_eq!(second.get(), 1);
    Ok(())
}

#[test]
fn unbind_restores_the_unintercepted_action() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    binder.bind(&mut view, ["delete"], &ConfirmOptions::new())?;

    assert!(binder.unbind(&mut view, "delete", "click"));
    assert!(!binder.unbind(&mut view, "delete", "click"));

    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "confirm"), Some("none".into()));
    assert_eq!(view.drain_effects().len(), 1);
    Ok(())
}

#[test]
fn missing_overlay_is_a_hard_failure() -> Result<()> {
    let mut view = ViewTree::new(Element::new("root").with_children(["delete"]));
    view.insert(Element::new("delete"));
    let mut binder = Binder::default();
    binder.bind(&mut view, ["delete"], &ConfirmOptions::new())?;

    assert!(
        view.dispatch("delete", "click").is_err(),
        "a broken confirmation gate must not pass silently"
    );
    Ok(())
}

#[test]
fn repeat_trigger_during_a_cycle_is_consumed() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    binder.bind(&mut view, ["delete"], &ConfirmOptions::new())?;

    view.dispatch("delete", "click")?;
    view.dispatch("delete", "click")?;
    assert_eq!(display(&view, "confirm"), Some("block".into()));
    assert!(view.drain_effects().is_empty());

    view.dispatch("m1_yes", "click")?;
    assert_eq!(view.drain_effects().len(), 1, "still a single resume");
    Ok(())
}

#[test]
fn pre_show_runs_after_overlay_before_measurement() -> Result<()> {
    let mut view = dialog_view();
    let mut binder = Binder::default();
    let observed = Rc::new(RefCell::new(None));
    let record = Rc::clone(&observed);
    let options = ConfirmOptions::new().with_pre_show(move |view, _, panel| {
        let overlay = view.display("confirm").expect("overlay");
        let panel_display = view.display(panel).expect("panel");
        *record.borrow_mut() = Some((overlay, panel_display));
        // Content swapped in here changes what the centering sees.
        view.set_metrics(
            panel,
            BoxMetrics {
                width: 100.0,
                height: 50.0,
                outer_width: 120.0,
                outer_height: 60.0,
            },
        )
        .expect("panel metrics");
    });
    binder.bind(&mut view, ["delete"], &options)?;

    view.dispatch("delete", "click")?;
    assert_eq!(
        *observed.borrow(),
        Some((Some("block".to_owned()), Some("none".to_owned())))
    );
    let panel = view.require("panel")?;
    assert_eq!(panel.style.margin_top, Some(-30.0));
    assert_eq!(panel.style.margin_left, Some(-60.0));
    assert_eq!(panel.style.width, Some(100.0));
    assert_eq!(panel.style.height, Some(50.0));
    Ok(())
}

#[test]
fn custom_event_name_gates_submission() -> Result<()> {
    let mut view = dialog_view();
    view.insert(Element::new("send").with_intrinsic(Intrinsic::Submit {
        form_id: "checkout".into(),
    }));
    view.require_mut("root")?.children.push("send".into());

    let mut binder = Binder::default();
    let options = ConfirmOptions::new().with_event("submit");
    binder.bind(&mut view, ["send"], &options)?;

    view.dispatch("send", "submit")?;
    assert_eq!(display(&view, "confirm"), Some("block".into()));
    assert!(view.drain_effects().is_empty());

    view.dispatch("m1_yes", "click")?;
    assert_eq!(
        view.drain_effects(),
        vec![Effect::Submitted {
            element: "send".into(),
            form_id: "checkout".into(),
        }]
    );
    Ok(())
}
