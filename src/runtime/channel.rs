//! Input delivery between the host driver thread and the running layout.
//!
//! The driver holds [`InputSender`]s and pushes touch and button events. Workflow code holds a
//! [`LayoutSlot`]; each layout enters the slot for the duration of its run. Entering pre-empts
//! the layout currently inside, so at most one layout consumes input at any time.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::event::{ButtonEvent, Event, PhysicalButton, TouchEvent};
use crate::core::geometry::Point;

#[derive(Default)]
struct ChannelState {
    events: VecDeque<Event>,
    senders: usize,
    active: bool,
    cancel_requested: bool,
    generation: u64,
}

#[derive(Default)]
struct Shared {
    state: Mutex<ChannelState>,
    cvar: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn wait<'a>(&self, state: MutexGuard<'a, ChannelState>) -> MutexGuard<'a, ChannelState> {
        self.cvar
            .wait(state)
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn wait_timeout<'a>(
        &self,
        state: MutexGuard<'a, ChannelState>,
        timeout: Duration,
    ) -> MutexGuard<'a, ChannelState> {
        match self.cvar.wait_timeout(state, timeout) {
            Ok((state, _)) => state,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }
}

/// Create a connected sender and slot.
pub fn ui_channel() -> (InputSender, LayoutSlot) {
    let shared = Arc::new(Shared::default());
    shared.lock().senders = 1;
    (
        InputSender {
            shared: Arc::clone(&shared),
        },
        LayoutSlot { shared },
    )
}

/// Producer side, usually owned by the thread reading the touch panel or buttons.
///
/// Input is closed once every sender is dropped.
pub struct InputSender {
    shared: Arc<Shared>,
}

impl InputSender {
    pub fn push(&self, event: Event) {
        let mut state = self.shared.lock();
        state.events.push_back(event);
        self.shared.cvar.notify_all();
    }

    pub fn push_all(&self, events: impl IntoIterator<Item = Event>) {
        let mut state = self.shared.lock();
        state.events.extend(events);
        self.shared.cvar.notify_all();
    }

    /// Touch down and up at the same point.
    pub fn touch_click(&self, point: Point) {
        self.push_all([
            Event::Touch(TouchEvent::Start(point)),
            Event::Touch(TouchEvent::End(point)),
        ]);
    }

    /// Press and release one physical button.
    pub fn button_click(&self, button: PhysicalButton) {
        self.push_all([
            Event::Button(ButtonEvent::Pressed(button)),
            Event::Button(ButtonEvent::Released(button)),
        ]);
    }

    /// Press both buttons, then release them.
    pub fn both_buttons_click(&self) {
        self.push_all([
            Event::Button(ButtonEvent::Pressed(PhysicalButton::Left)),
            Event::Button(ButtonEvent::Pressed(PhysicalButton::Right)),
            Event::Button(ButtonEvent::Released(PhysicalButton::Left)),
            Event::Button(ButtonEvent::Released(PhysicalButton::Right)),
        ]);
    }

    /// Make the running layout, if any, return `LayoutCancelled`.
    pub fn cancel_layout(&self) {
        let mut state = self.shared.lock();
        if state.active {
            state.cancel_requested = true;
            self.shared.cvar.notify_all();
        }
    }

    /// Block until a layout is running. Returns `false` on timeout.
    pub fn wait_until_layout_running(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.lock();
        while !state.active {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            state = self.shared.wait_timeout(state, deadline - now);
        }
        true
    }

    /// Events queued and not yet consumed by a layout.
    pub fn pending(&self) -> usize {
        self.shared.lock().events.len()
    }
}

impl Clone for InputSender {
    fn clone(&self) -> Self {
        self.shared.lock().senders += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for InputSender {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.senders = state.senders.saturating_sub(1);
        self.shared.cvar.notify_all();
    }
}

/// Consumer side shared by workflow code.
#[derive(Clone)]
pub struct LayoutSlot {
    shared: Arc<Shared>,
}

impl LayoutSlot {
    /// Take over input, pre-empting the layout currently running.
    ///
    /// Blocks until the previous lease is dropped.
    pub fn enter(&self) -> LayoutLease {
        let mut state = self.shared.lock();
        if state.active {
            debug!(generation = state.generation, "pre-empting running layout");
            state.cancel_requested = true;
            self.shared.cvar.notify_all();
            while state.active {
                state = self.shared.wait(state);
            }
        }
        state.active = true;
        state.cancel_requested = false;
        state.generation += 1;
        let generation = state.generation;
        self.shared.cvar.notify_all();
        LayoutLease {
            shared: Arc::clone(&self.shared),
            generation,
        }
    }

    pub fn is_layout_running(&self) -> bool {
        self.shared.lock().active
    }

    /// Input is closed and fully drained.
    pub fn is_closed(&self) -> bool {
        let state = self.shared.lock();
        state.senders == 0 && state.events.is_empty()
    }
}

/// What woke a waiting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    Event(Event),
    Timeout,
    /// Another layout entered the slot.
    Cancelled,
    /// Every sender is gone and the queue is empty.
    Closed,
}

/// Exclusive right to consume input, held by one running layout.
pub struct LayoutLease {
    shared: Arc<Shared>,
    generation: u64,
}

impl LayoutLease {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Next event, waiting at most `timeout` (`None` waits indefinitely).
    ///
    /// Pre-emption is reported before queued events.
    pub fn wait(&self, timeout: Option<Duration>) -> Wakeup {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        let mut state = self.shared.lock();
        loop {
            if state.cancel_requested {
                return Wakeup::Cancelled;
            }
            if let Some(event) = state.events.pop_front() {
                return Wakeup::Event(event);
            }
            if state.senders == 0 {
                return Wakeup::Closed;
            }
            match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Wakeup::Timeout;
                    }
                    state = self.shared.wait_timeout(state, deadline - now);
                }
                None => state = self.shared.wait(state),
            }
        }
    }
}

impl Drop for LayoutLease {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.active = false;
        state.cancel_requested = false;
        self.shared.cvar.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::{ui_channel, Wakeup};
    use crate::core::event::{ButtonEvent, Event, PhysicalButton, TouchEvent};
    use crate::core::geometry::Point;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn events_arrive_in_order() {
        let (input, slot) = ui_channel();
        input.touch_click(Point::new(3, 4));
        let lease = slot.enter();
        assert_eq!(
            lease.wait(Some(Duration::ZERO)),
            Wakeup::Event(Event::Touch(TouchEvent::Start(Point::new(3, 4))))
        );
        assert_eq!(
            lease.wait(Some(Duration::ZERO)),
            Wakeup::Event(Event::Touch(TouchEvent::End(Point::new(3, 4))))
        );
        assert_eq!(lease.wait(Some(Duration::from_millis(1))), Wakeup::Timeout);
    }

    #[test]
    fn dropping_every_sender_closes_after_drain() {
        let (input, slot) = ui_channel();
        let second = input.clone();
        input.button_click(PhysicalButton::Left);
        drop(input);
        let lease = slot.enter();
        assert_eq!(
            lease.wait(None),
            Wakeup::Event(Event::Button(ButtonEvent::Pressed(PhysicalButton::Left)))
        );
        assert_eq!(
            lease.wait(None),
            Wakeup::Event(Event::Button(ButtonEvent::Released(PhysicalButton::Left)))
        );
        drop(second);
        assert_eq!(lease.wait(None), Wakeup::Closed);
        assert!(slot.is_closed());
    }

    #[test]
    fn cancel_layout_only_hits_a_running_layout() {
        let (input, slot) = ui_channel();
        input.cancel_layout();
        let lease = slot.enter();
        assert_eq!(lease.wait(Some(Duration::ZERO)), Wakeup::Timeout);
        input.cancel_layout();
        assert_eq!(lease.wait(Some(Duration::ZERO)), Wakeup::Cancelled);
    }

    #[test]
    fn entering_pre_empts_the_running_layout() {
        let (input, slot) = ui_channel();
        let other = slot.clone();
        let first = thread::spawn(move || {
            let lease = other.enter();
            lease.wait(None)
        });
        assert!(input.wait_until_layout_running(Duration::from_secs(5)));
        let lease = slot.enter();
        assert_eq!(first.join().ok(), Some(Wakeup::Cancelled));
        assert!(slot.is_layout_running());
        assert_eq!(lease.generation(), 2);
    }
}
