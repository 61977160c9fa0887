//! The layout loop: one on-screen dialog from first paint to result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::core::color::Color;
use crate::core::component::{content_of, Component, UiResult};
use crate::core::display::Display;
use crate::core::event::{Event, EventCtx, InputKind, TimerToken};
use crate::core::geometry::Rect;
use crate::error::{Result, UiError};
use crate::runtime::channel::{LayoutSlot, Wakeup};

/// Interval between two render passes while waiting for input.
pub const RENDER_DELAY: Duration = Duration::from_millis(10);

pub const BACKLIGHT_NONE: u8 = 0;
pub const BACKLIGHT_DIM: u8 = 5;
pub const BACKLIGHT_NORMAL: u8 = 150;
pub const BACKLIGHT_MAX: u8 = 255;

const FADE_STEP: u8 = 15;
const FADE_DELAY: Duration = Duration::from_micros(14_000);

/// Side of the square toggled in the top-left corner on every refresh in debug mode.
pub const DEBUG_INDICATOR_SIZE: i32 = 4;

/// Move the backlight to `target`, gradually unless `animate` is off.
pub fn backlight_fade(display: &mut dyn Display, target: u8, animate: bool) {
    if animate {
        let mut level = display.backlight();
        while level != target {
            level = if level < target {
                level.saturating_add(FADE_STEP).min(target)
            } else {
                level.saturating_sub(FADE_STEP).max(target)
            };
            if level == target {
                break;
            }
            display.set_backlight(level);
            thread::sleep(FADE_DELAY);
        }
    }
    display.set_backlight(target);
}

static ALERT_IN_PROGRESS: AtomicBool = AtomicBool::new(false);

/// Blink the backlight `count` times. Returns `false` when another alert is already running.
pub fn alert(display: &mut dyn Display, count: usize, animate: bool) -> bool {
    if ALERT_IN_PROGRESS
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return false;
    }
    for i in 0..count * 2 {
        if i % 2 == 0 {
            display.set_backlight(BACKLIGHT_MAX);
            if animate {
                thread::sleep(Duration::from_millis(20));
            }
        } else {
            display.set_backlight(BACKLIGHT_DIM);
            if animate {
                thread::sleep(Duration::from_millis(80));
            }
        }
    }
    display.set_backlight(BACKLIGHT_NORMAL);
    ALERT_IN_PROGRESS.store(false, Ordering::Release);
    true
}

/// Render `component` once and show it, outside of any layout loop.
///
/// Nothing tracks what was drawn: the next layout simply clears over it.
pub fn draw_simple(component: &mut dyn Component, display: &mut dyn Display, animate: bool) {
    backlight_fade(display, BACKLIGHT_DIM, animate);
    display.clear();
    component.request_repaint();
    component.paint(display);
    display.refresh();
    backlight_fade(display, BACKLIGHT_NORMAL, animate);
}

/// Time of the last user interaction, shared across layouts.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    last_activity: Arc<Mutex<Instant>>,
    timeout: Duration,
}

impl IdleTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            last_activity: Arc::new(Mutex::new(Instant::now())),
            timeout,
        }
    }

    pub fn touch(&self) {
        let mut last = match self.last_activity.lock() {
            Ok(last) => last,
            Err(poisoned) => poisoned.into_inner(),
        };
        *last = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        let last = match self.last_activity.lock() {
            Ok(last) => last,
            Err(poisoned) => poisoned.into_inner(),
        };
        last.elapsed()
    }

    pub fn is_expired(&self) -> bool {
        self.idle_for() >= self.timeout
    }
}

/// Receives the visible content each time a layout first appears.
pub type LayoutObserver = Box<dyn FnMut(&[String]) + Send>;

pub struct LayoutOptions {
    pub input: InputKind,
    pub backlight: u8,
    pub animate: bool,
    pub render_delay: Duration,
    pub idle_timer: Option<IdleTimer>,
    pub observer: Option<LayoutObserver>,
    pub debug_indicator: bool,
}

impl LayoutOptions {
    pub fn new(input: InputKind) -> Self {
        Self {
            input,
            backlight: BACKLIGHT_NORMAL,
            animate: true,
            render_delay: RENDER_DELAY,
            idle_timer: None,
            observer: None,
            debug_indicator: false,
        }
    }

    pub fn with_backlight(mut self, backlight: u8) -> Self {
        self.backlight = backlight;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_idle_timer(mut self, idle_timer: IdleTimer) -> Self {
        self.idle_timer = Some(idle_timer);
        self
    }

    pub fn with_observer(mut self, observer: LayoutObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_debug_indicator(mut self, debug_indicator: bool) -> Self {
        self.debug_indicator = debug_indicator;
        self
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("input", &self.input)
            .field("backlight", &self.backlight)
            .field("animate", &self.animate)
            .field("render_delay", &self.render_delay)
            .field("observer", &self.observer.is_some())
            .field("debug_indicator", &self.debug_indicator)
            .finish()
    }
}

/// A top-level component tree bound to an input kind.
pub struct Layout<C: Component> {
    root: C,
    options: LayoutOptions,
    ctx: EventCtx,
    timers: Vec<(Instant, TimerToken)>,
    indicator_on: bool,
}

impl<C: Component> Layout<C> {
    pub fn new(root: C, options: LayoutOptions) -> Self {
        Self {
            root,
            options,
            ctx: EventCtx::new(),
            timers: Vec::new(),
            indicator_on: false,
        }
    }

    pub fn root(&self) -> &C {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut C {
        &mut self.root
    }

    pub fn into_root(self) -> C {
        self.root
    }

    /// Show the layout and process input until it produces a result.
    ///
    /// Fails with `LayoutCancelled` when another layout takes the slot and with `InputClosed`
    /// when input is closed and no timer is left to fire.
    pub fn run(&mut self, slot: &LayoutSlot, display: &mut dyn Display) -> Result<UiResult> {
        let lease = slot.enter();
        info!(
            generation = lease.generation(),
            input = ?self.options.input,
            "layout started"
        );
        self.timers.clear();
        self.before_render(display);

        let mut next_render = Instant::now() + self.options.render_delay;
        loop {
            let now = Instant::now();
            if let Some(result) = self.fire_due_timers(now, display) {
                return Ok(self.finish(result));
            }
            if now >= next_render {
                self.render(display);
                next_render = now + self.options.render_delay;
            }

            let wake_at = self
                .timers
                .iter()
                .map(|(deadline, _)| *deadline)
                .fold(next_render, Instant::min);
            let timeout = wake_at.saturating_duration_since(Instant::now());

            match lease.wait(Some(timeout)) {
                Wakeup::Event(event) => {
                    if let Some(result) = self.handle_input(event, display) {
                        return Ok(self.finish(result));
                    }
                }
                Wakeup::Timeout => {}
                Wakeup::Cancelled => {
                    info!(generation = lease.generation(), "layout cancelled");
                    return Err(UiError::LayoutCancelled);
                }
                Wakeup::Closed => {
                    if self.timers.is_empty() {
                        debug!("input closed while layout was waiting");
                        return Err(UiError::InputClosed);
                    }
                    thread::sleep(timeout);
                }
            }
        }
    }

    fn finish(&mut self, result: UiResult) -> UiResult {
        // Results carrying user input are not logged verbatim.
        match &result {
            UiResult::Text(_) => info!("layout finished with text"),
            other => info!(result = ?other, "layout finished"),
        }
        self.timers.clear();
        result
    }

    fn before_render(&mut self, display: &mut dyn Display) {
        backlight_fade(display, BACKLIGHT_DIM, self.options.animate);
        display.clear();
        self.dispatch(&Event::Repaint, display);
        self.dispatch(&Event::Render, display);
        if let Some(observer) = self.options.observer.as_mut() {
            observer(&content_of(&self.root));
        }
        self.refresh(display);
        backlight_fade(display, self.options.backlight, self.options.animate);
    }

    fn render(&mut self, display: &mut dyn Display) {
        self.dispatch(&Event::Render, display);
        self.refresh(display);
    }

    fn refresh(&mut self, display: &mut dyn Display) {
        if self.options.debug_indicator {
            self.indicator_on = !self.indicator_on;
            let color = if self.indicator_on { Color::WHITE } else { Color::BLACK };
            display.bar(
                Rect::new(0, 0, DEBUG_INDICATOR_SIZE, DEBUG_INDICATOR_SIZE),
                color,
            );
        }
        display.refresh();
    }

    fn handle_input(&mut self, event: Event, display: &mut dyn Display) -> Option<UiResult> {
        match event.input_kind() {
            Some(kind) if kind != self.options.input => {
                trace!(?kind, "ignoring input of the other kind");
                return None;
            }
            Some(_) => {
                if let Some(idle) = &self.options.idle_timer {
                    idle.touch();
                }
            }
            None => {}
        }
        let result = self.dispatch(&event, display);
        if result.is_none() {
            self.render(display);
        }
        result
    }

    fn fire_due_timers(&mut self, now: Instant, display: &mut dyn Display) -> Option<UiResult> {
        let mut due = Vec::new();
        self.timers.retain(|(deadline, token)| {
            if *deadline <= now {
                due.push((*deadline, *token));
                false
            } else {
                true
            }
        });
        due.sort();
        for (_, token) in due {
            let result = self.dispatch(&Event::Timer(token), display);
            if result.is_some() {
                return result;
            }
            self.render(display);
        }
        None
    }

    fn dispatch(&mut self, event: &Event, display: &mut dyn Display) -> Option<UiResult> {
        let result = self.root.dispatch(&mut self.ctx, event, display);
        let now = Instant::now();
        for (token, after) in self.ctx.take_timers() {
            self.timers.push((now + after, token));
        }
        if self.ctx.take_paint_request() {
            self.root.request_repaint();
        }
        result
    }
}
