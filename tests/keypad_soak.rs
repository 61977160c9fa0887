mod support;

use assert_matches::assert_matches;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wallet_ui::layouts::request_pin_on_device;
use wallet_ui::render::DrawOp;
use wallet_ui::widgets::PinKeyboard;
use wallet_ui::{Model, RecordingHost, UiError};

use support::{run_flow_with, skin};

const SOAK_RUNS: usize = 20;

/// Draw the PIN keypad for `seed`, cancel it, and return what was drawn.
fn keypad_ops(seed: u64) -> Vec<DrawOp> {
    let skin = skin(Model::Bolt);
    let keypad = PinKeyboard::new(&skin.theme, "", "", true, &mut StdRng::seed_from_u64(0));
    let mut run = run_flow_with(
        &skin,
        RecordingHost::new(),
        |ctx| ctx.with_rng_seed(seed),
        |input| input.touch_click(keypad.erase_area().center()),
        |ctx| request_pin_on_device(ctx, "Enter PIN", Some(10), true, false),
    );
    assert_matches!(run.result, Err(UiError::PinCancelled));
    run.display.take_ops()
}

#[test]
fn same_seed_draws_the_same_keypad() {
    let baseline = keypad_ops(42);
    assert!(!baseline.is_empty());
    for run in 0..SOAK_RUNS {
        assert_eq!(keypad_ops(42), baseline, "run {run} drew a different keypad");
    }
}

#[test]
fn different_seeds_shuffle_the_digits() {
    assert_ne!(keypad_ops(1), keypad_ops(2));
}
