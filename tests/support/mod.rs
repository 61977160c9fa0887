//! Helpers shared by the integration tests.
#![allow(dead_code)]

use std::time::Duration;

use wallet_ui::{
    ui_channel, InputSender, Model, Point, RecordingDisplay, RecordingHost, Result, Skin, UiConfig,
    UiContext,
};

/// Hold duration used by every test skin.
pub const HOLD: Duration = Duration::from_millis(20);

pub fn skin(model: Model) -> Skin {
    Skin::for_model(model).with_hold_duration(HOLD)
}

pub fn display_for(skin: &Skin) -> RecordingDisplay {
    RecordingDisplay::new(skin.theme.screen.width, skin.theme.screen.height)
}

/// A point inside the rightmost button, for one to three buttons in the row.
pub fn confirm_point(skin: &Skin) -> Point {
    let area = skin.theme.button_area();
    Point::new(area.right() - skin.theme.button_spacing - 10, area.center().y)
}

/// A point inside the leftmost button.
pub fn cancel_point(skin: &Skin) -> Point {
    let area = skin.theme.button_area();
    Point::new(area.x + 5, area.center().y)
}

/// Outcome of [`run_flow`].
pub struct FlowRun<T> {
    pub result: Result<T>,
    pub host: RecordingHost,
    pub display: RecordingDisplay,
    pub screens: Vec<Vec<String>>,
}

impl<T> FlowRun<T> {
    pub fn names(&self) -> Vec<&str> {
        self.host.names()
    }
}

/// Queue input, close the channel, then run `flow` on a fresh context with animations off.
///
/// Input that misses its target ends the flow with `InputClosed` instead of leaving it waiting.
pub fn run_flow<T>(
    skin: &Skin,
    queue: impl FnOnce(&InputSender),
    flow: impl FnOnce(&mut UiContext<'_>) -> Result<T>,
) -> FlowRun<T> {
    run_flow_with(skin, RecordingHost::new(), |ctx| ctx, queue, flow)
}

/// [`run_flow`] against `host`, with extra context configuration.
pub fn run_flow_with<T>(
    skin: &Skin,
    mut host: RecordingHost,
    setup: impl for<'a> FnOnce(UiContext<'a>) -> UiContext<'a>,
    queue: impl FnOnce(&InputSender),
    flow: impl FnOnce(&mut UiContext<'_>) -> Result<T>,
) -> FlowRun<T> {
    let (input, slot) = ui_channel();
    queue(&input);
    drop(input);

    let mut display = display_for(skin);
    let config = UiConfig::default().with_animation(false);
    let (result, screens) = {
        let ctx = UiContext::new(&mut display, &mut host, slot, config)
            .with_skin(skin.clone())
            .record_screens();
        let mut ctx = setup(ctx);
        let result = flow(&mut ctx);
        (result, ctx.screens())
    };
    FlowRun {
        result,
        host,
        display,
        screens,
    }
}
