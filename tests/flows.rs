mod support;

use std::thread;
use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use wallet_ui::layouts::{
    confirm_action, confirm_output, confirm_signverify, error_popup, interact, show_address,
    AddressDetails, ConfirmAction, ConfirmOutput, SignVerify,
};
use wallet_ui::{
    ui_channel, ButtonEvent, ButtonRequestType, Event, Model, PhysicalButton, RecordingHost,
    TouchEvent, Translations, UiConfig, UiContext, UiError, UiResult,
};

use support::{cancel_point, confirm_point, display_for, run_flow, run_flow_with, skin};

#[test]
fn output_flow_steps_back_from_amount_to_recipient() {
    let skin = skin(Model::Bolt);
    let run = run_flow(
        &skin,
        |input| {
            input.touch_click(confirm_point(&skin));
            input.touch_click(cancel_point(&skin));
            input.touch_click(confirm_point(&skin));
            input.touch_click(confirm_point(&skin));
        },
        |ctx| {
            let params =
                ConfirmOutput::new("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq", "0.0125 BTC");
            confirm_output(ctx, &params)
        },
    );
    assert_eq!(run.result, Ok(()));
    let requests = run.host.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests
        .iter()
        .all(|request| request.name == "confirm_output"
            && request.code == ButtonRequestType::ConfirmOutput));
}

#[test]
fn cancelling_the_recipient_aborts_the_output() {
    let skin = skin(Model::Delizia);
    let run = run_flow(
        &skin,
        |input| input.touch_click(cancel_point(&skin)),
        |ctx| confirm_output(ctx, &ConfirmOutput::new("bc1qshort", "1 BTC")),
    );
    assert_matches!(run.result, Err(UiError::ActionCancelled));
}

#[test]
fn address_mismatch_can_return_to_the_address() {
    let skin = skin(Model::Bolt);
    let run = run_flow(
        &skin,
        |input| {
            input.touch_click(cancel_point(&skin));
            input.touch_click(cancel_point(&skin));
            input.touch_click(confirm_point(&skin));
        },
        |ctx| show_address(ctx, "bc1qshort", &AddressDetails::default()),
    );
    assert_eq!(run.result, Ok(()));
    assert_eq!(run.names(), vec!["show_address"]);
    assert_eq!(run.screens.len(), 3);
    assert_eq!(run.screens[1][0], "Address mismatch?");
    assert_eq!(run.screens[0], run.screens[2]);
}

#[test]
fn signing_a_message_needs_a_hold_on_buttons() {
    let skin = skin(Model::Caesar);
    let run = run_flow(
        &skin,
        |input| {
            input.button_click(PhysicalButton::Right);
            input.push(Event::Button(ButtonEvent::Pressed(PhysicalButton::Right)));
        },
        |ctx| confirm_signverify(ctx, &SignVerify::new("Hello", "bc1qshort", false)),
    );
    assert_eq!(run.result, Ok(()));
    assert_eq!(run.names(), vec!["sign_message", "sign_message"]);
}

#[test]
fn signing_a_message_on_touch_holds_the_right_area() {
    let skin = skin(Model::Eckhart);
    let run = run_flow(
        &skin,
        |input| {
            input.touch_click(confirm_point(&skin));
            input.push(Event::Touch(TouchEvent::Start(confirm_point(&skin))));
        },
        |ctx| confirm_signverify(ctx, &SignVerify::new("Hello", "bc1qshort", false)),
    );
    assert_eq!(run.result, Ok(()));
    assert_eq!(run.names(), vec!["sign_message", "sign_message"]);
}

#[test]
fn missed_tap_closes_the_flow_instead_of_waiting() {
    let skin = skin(Model::Eckhart);
    let area = skin.theme.button_area();
    let run = run_flow(
        &skin,
        |input| input.touch_click(wallet_ui::Point::new(area.right() - 1, area.center().y)),
        |ctx| confirm_signverify(ctx, &SignVerify::new("Hello", "bc1qshort", false)),
    );
    assert_matches!(run.result, Err(UiError::InputClosed));
}

#[test]
fn host_failure_stops_the_flow_before_drawing() {
    let skin = skin(Model::Bolt);
    let run = run_flow_with(
        &skin,
        RecordingHost::failing("usb disconnected"),
        |ctx| ctx,
        |_| {},
        |ctx| confirm_action(ctx, &ConfirmAction::new("wipe_device", "Wipe device")),
    );
    assert_matches!(run.result, Err(UiError::Host(reason)) if reason.contains("usb"));
    assert!(run.display.ops().is_empty());
}

#[test]
fn timed_popup_closes_itself() {
    let skin = skin(Model::Bolt);
    let run = run_flow(
        &skin,
        |_| {},
        |ctx| {
            let popup = error_popup(
                ctx,
                "Wrong PIN",
                "Please try again",
                None,
                None,
                None,
                Some(Duration::from_millis(15)),
            )?;
            interact(ctx, popup, None, ButtonRequestType::Other, None)
        },
    );
    assert_eq!(run.result, Ok(UiResult::Confirmed));
}

#[test]
fn translated_labels_reach_the_screen() {
    let skin = skin(Model::Caesar);
    let translations = Translations::parse("# test labels\nbuttons__confirm=Approve\n").unwrap();
    let run = run_flow_with(
        &skin,
        RecordingHost::new(),
        |ctx| ctx.with_translations(translations),
        |input| input.button_click(PhysicalButton::Right),
        |ctx| confirm_action(ctx, &ConfirmAction::new("confirm", "Enable")),
    );
    assert_eq!(run.result, Ok(()));
    assert!(run.screens[0].iter().any(|line| line == "APPROVE"));
}

#[test]
fn new_layout_preempts_the_running_one() {
    let skin = skin(Model::Bolt);
    let (input, slot) = ui_channel();
    let waiting_slot = slot.clone();

    let result = thread::scope(|scope| {
        let waiting = scope.spawn(|| {
            let mut display = display_for(&skin);
            let mut host = RecordingHost::new();
            let mut ctx = UiContext::new(&mut display, &mut host, waiting_slot, UiConfig::default())
                .with_skin(skin.clone());
            confirm_action(&mut ctx, &ConfirmAction::new("first", "First"))
        });
        assert!(input.wait_until_layout_running(Duration::from_secs(5)));
        let lease = slot.enter();
        let result = waiting.join();
        drop(lease);
        result
    });
    assert_matches!(result, Ok(Err(UiError::LayoutCancelled)));
}
