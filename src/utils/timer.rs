//! Timer abstraction for reveal ticks and deferred transitions.
//!
//! The session never talks to `setInterval`/`setTimeout` directly. It is given
//! a [`Timers`] implementation: [`BrowserTimers`] in the app, [`ManualTimers`]
//! (a virtual clock) in tests.

use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::{set_interval_with_handle, set_timeout_with_handle};

use super::time;

/// Source of repeating and one-shot timers plus the current time.
pub trait Timers {
    /// Call `tick` every `period_ms` until the handle is cancelled.
    fn repeat(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> TimerHandle;

    /// Call `fire` once after `delay_ms` unless the handle is cancelled first.
    fn once(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> TimerHandle;

    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> f64;
}

/// Owned timer registration.
///
/// Cancelling (explicitly or by dropping) guarantees the callback is not
/// invoked again.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle for a timer that never started.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

// ============================================================================
// BrowserTimers
// ============================================================================

/// Timers backed by the browser event loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    fn repeat(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> TimerHandle {
        let period = Duration::from_millis(u64::from(period_ms));
        match set_interval_with_handle(move || tick(), period) {
            Ok(handle) => TimerHandle::new(move || handle.clear()),
            Err(_) => {
                log::warn!("failed to start interval timer");
                TimerHandle::inert()
            }
        }
    }

    fn once(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> TimerHandle {
        let delay = Duration::from_millis(u64::from(delay_ms));
        match set_timeout_with_handle(fire, delay) {
            Ok(handle) => TimerHandle::new(move || handle.clear()),
            Err(_) => {
                log::warn!("failed to start timeout");
                TimerHandle::inert()
            }
        }
    }

    fn now_ms(&self) -> f64 {
        time::now_ms()
    }
}

// ============================================================================
// ManualTimers
// ============================================================================

#[cfg(any(test, feature = "mock"))]
pub use manual::ManualTimers;

#[cfg(any(test, feature = "mock"))]
mod manual {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use super::{TimerHandle, Timers};

    enum Job {
        Repeat { period: f64, tick: Rc<dyn Fn()> },
        Once(Box<dyn FnOnce()>),
    }

    struct Pending {
        id: u64,
        due: f64,
        job: Job,
    }

    #[derive(Default)]
    struct Clock {
        now: f64,
        next_id: u64,
        pending: Vec<Pending>,
    }

    /// Deterministic virtual clock. Timers only fire inside [`advance`].
    ///
    /// [`advance`]: ManualTimers::advance
    #[derive(Clone, Default)]
    pub struct ManualTimers {
        clock: Rc<RefCell<Clock>>,
    }

    impl ManualTimers {
        /// Start the virtual clock at `now_ms`.
        pub fn starting_at(now_ms: f64) -> Self {
            let timers = Self::default();
            timers.clock.borrow_mut().now = now_ms;
            timers
        }

        /// Number of timers still registered.
        pub fn pending(&self) -> usize {
            self.clock.borrow().pending.len()
        }

        /// Move the clock forward, firing every timer that falls due in order.
        ///
        /// Callbacks run with no internal borrow held, so they may register or
        /// cancel timers.
        pub fn advance(&self, ms: u32) {
            let target = self.clock.borrow().now + f64::from(ms);

            loop {
                let job = {
                    let mut guard = self.clock.borrow_mut();
                    let clock = &mut *guard;
                    let next = clock
                        .pending
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due <= target)
                        .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
                        .map(|(index, _)| index);
                    let Some(index) = next else { break };

                    let pending = &mut clock.pending[index];
                    clock.now = pending.due;
                    let repeat = match &pending.job {
                        Job::Repeat { period, tick } => Some((*period, Rc::clone(tick))),
                        Job::Once(_) => None,
                    };
                    match repeat {
                        Some((period, tick)) => {
                            pending.due += period;
                            Job::Repeat { period, tick }
                        }
                        None => clock.pending.remove(index).job,
                    }
                };

                match job {
                    Job::Repeat { tick, .. } => tick(),
                    Job::Once(fire) => fire(),
                }
            }

            self.clock.borrow_mut().now = target;
        }

        fn register(&self, delay: f64, job: Job) -> TimerHandle {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + delay;
            clock.pending.push(Pending { id, due, job });

            let weak: Weak<RefCell<Clock>> = Rc::downgrade(&self.clock);
            TimerHandle::new(move || {
                let Some(clock) = weak.upgrade() else { return };
                // Dropped outside the borrow: a job may own handles of its own.
                let _cancelled: Vec<Pending> = {
                    let mut clock = clock.borrow_mut();
                    let (cancelled, kept) = std::mem::take(&mut clock.pending)
                        .into_iter()
                        .partition(|p| p.id == id);
                    clock.pending = kept;
                    cancelled
                };
            })
        }
    }

    impl Timers for ManualTimers {
        fn repeat(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> TimerHandle {
            let period = f64::from(period_ms.max(1));
            self.register(period, Job::Repeat { period, tick })
        }

        fn once(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> TimerHandle {
            self.register(f64::from(delay_ms), Job::Once(fire))
        }

        fn now_ms(&self) -> f64 {
            self.clock.borrow().now
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[test]
    fn test_repeat_fires_each_period() {
        let timers = ManualTimers::default();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _handle = timers.repeat(10, Rc::new(move || c.set(c.get() + 1)));

        timers.advance(9);
        assert_eq!(count.get(), 0);
        timers.advance(1);
        assert_eq!(count.get(), 1);
        timers.advance(35);
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_cancel_stops_repeat() {
        let timers = ManualTimers::default();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let handle = timers.repeat(10, Rc::new(move || c.set(c.get() + 1)));

        timers.advance(20);
        handle.cancel();
        timers.advance(100);
        assert_eq!(count.get(), 2);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let timers = ManualTimers::default();
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        drop(timers.once(5, Box::new(move || f.set(true))));

        timers.advance(10);
        assert!(!fired.get());
    }

    #[test]
    fn test_once_fires_once() {
        let timers = ManualTimers::starting_at(1_000.0);
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let _handle = timers.once(5, Box::new(move || f.set(f.get() + 1)));

        timers.advance(5);
        timers.advance(50);
        assert_eq!(fired.get(), 1);
        assert_eq!(timers.now_ms(), 1_055.0);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let timers = ManualTimers::default();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = Rc::clone(&order);
        let _late = timers.once(20, Box::new(move || o.borrow_mut().push("late")));
        let o = Rc::clone(&order);
        let _early = timers.once(10, Box::new(move || o.borrow_mut().push("early")));

        timers.advance(30);
        assert_eq!(*order.borrow(), vec!["early", "late"]);
    }

    #[test]
    fn test_callback_can_cancel_itself() {
        let timers = ManualTimers::default();
        let slot: Rc<RefCell<Option<TimerHandle>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let s = Rc::clone(&slot);
        let c = Rc::clone(&count);
        let handle = timers.repeat(
            10,
            Rc::new(move || {
                c.set(c.get() + 1);
                if c.get() == 2
                    && let Some(h) = s.borrow_mut().take()
                {
                    h.cancel();
                }
            }),
        );
        *slot.borrow_mut() = Some(handle);

        timers.advance(100);
        assert_eq!(count.get(), 2);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_inert_handle() {
        TimerHandle::inert().cancel();
    }
}
