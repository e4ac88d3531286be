//! Incremental reveal of terminal output.
//!
//! [`RevealPlan`] is the pure part: a finite sequence of cumulative display
//! states for a text. [`Reveal`] drives a plan from a timer, one frame per
//! tick, and owns that timer until it completes or is cancelled.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::models::{RevealMode, RevealUnit};
use crate::utils::timer::{TimerHandle, Timers};

// ============================================================================
// RevealPlan
// ============================================================================

/// Frames of a reveal: each item is the text shown after one more unit.
///
/// Not restartable: once exhausted it stays exhausted.
#[derive(Clone, Debug)]
pub struct RevealPlan {
    units: std::vec::IntoIter<String>,
    separator: &'static str,
    shown: String,
    started: bool,
}

impl RevealPlan {
    pub fn new(text: &str, mode: RevealMode) -> Self {
        let (units, separator): (Vec<String>, _) = match mode {
            RevealMode::Instant => (vec![text.to_string()], ""),
            RevealMode::Incremental(RevealUnit::Char) => {
                (text.chars().map(String::from).collect(), "")
            }
            RevealMode::Incremental(RevealUnit::Line) if text.is_empty() => (Vec::new(), "\n"),
            RevealMode::Incremental(RevealUnit::Line) => {
                (text.split('\n').map(String::from).collect(), "\n")
            }
        };

        Self {
            units: units.into_iter(),
            separator,
            shown: String::new(),
            started: false,
        }
    }

    /// Text revealed so far.
    pub fn shown(&self) -> &str {
        &self.shown
    }

    pub fn is_done(&self) -> bool {
        self.units.len() == 0
    }
}

impl Iterator for RevealPlan {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let unit = self.units.next()?;
        if self.started {
            self.shown.push_str(self.separator);
        }
        self.started = true;
        self.shown.push_str(&unit);
        Some(self.shown.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.units.size_hint()
    }
}

impl ExactSizeIterator for RevealPlan {}

// ============================================================================
// Reveal
// ============================================================================

struct RevealState {
    plan: RevealPlan,
    timer: Option<TimerHandle>,
    cancelled: bool,
}

/// A running reveal with exactly one timer.
///
/// `on_step` is invoked once per emitted frame with the text shown so far.
/// After [`cancel`](Reveal::cancel) (or drop) it is never invoked again.
pub struct Reveal {
    state: Rc<RefCell<RevealState>>,
}

impl Reveal {
    /// Start revealing `text`.
    ///
    /// `Instant` emits the whole text before returning and needs no timer.
    /// Empty incremental text completes immediately without emitting.
    pub fn start(
        timers: &dyn Timers,
        text: &str,
        mode: RevealMode,
        on_step: impl Fn(&str) + 'static,
    ) -> Self {
        let mut plan = RevealPlan::new(text, mode);

        let RevealMode::Incremental(unit) = mode else {
            if let Some(frame) = plan.next() {
                on_step(&frame);
            }
            return Self::finished(plan);
        };
        if plan.is_done() {
            return Self::finished(plan);
        }

        let state = Rc::new(RefCell::new(RevealState {
            plan,
            timer: None,
            cancelled: false,
        }));

        let weak = Rc::downgrade(&state);
        let handle = timers.repeat(
            unit.period_ms(),
            Rc::new(move || Self::tick(&weak, &on_step)),
        );
        state.borrow_mut().timer = Some(handle);

        Self { state }
    }

    fn finished(plan: RevealPlan) -> Self {
        Self {
            state: Rc::new(RefCell::new(RevealState {
                plan,
                timer: None,
                cancelled: false,
            })),
        }
    }

    fn tick(state: &Weak<RefCell<RevealState>>, on_step: &dyn Fn(&str)) {
        let Some(state) = state.upgrade() else { return };

        let (frame, spent) = {
            let mut state = state.borrow_mut();
            if state.cancelled {
                return;
            }
            let frame = state.plan.next();
            let spent = if state.plan.is_done() {
                state.timer.take()
            } else {
                None
            };
            (frame, spent)
        };

        if let Some(timer) = spent {
            timer.cancel();
        }
        if let Some(frame) = frame {
            on_step(&frame);
        }
    }

    /// Stop revealing and release the timer. Idempotent.
    pub fn cancel(&self) {
        let timer = {
            let mut state = self.state.borrow_mut();
            state.cancelled = true;
            state.timer.take()
        };
        if let Some(timer) = timer {
            timer.cancel();
        }
    }

    /// Text revealed so far.
    pub fn shown(&self) -> String {
        self.state.borrow().plan.shown().to_string()
    }

    /// All units have been emitted.
    pub fn is_finished(&self) -> bool {
        self.state.borrow().plan.is_done()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }

    /// Still holding a timer.
    pub fn is_active(&self) -> bool {
        self.state.borrow().timer.is_some()
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Reveal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Reveal")
            .field("shown", &state.plan.shown())
            .field("finished", &state.plan.is_done())
            .field("cancelled", &state.cancelled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CHAR_TICK_MS, LINE_TICK_MS};
    use crate::utils::timer::ManualTimers;

    const CHARS: RevealMode = RevealMode::Incremental(RevealUnit::Char);
    const LINES: RevealMode = RevealMode::Incremental(RevealUnit::Line);

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) + 'static) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        (frames, move |f: &str| sink.borrow_mut().push(f.to_string()))
    }

    #[test]
    fn test_plan_chars() {
        let frames: Vec<String> = RevealPlan::new("abc", CHARS).collect();
        assert_eq!(frames, vec!["a", "ab", "abc"]);
    }

    #[test]
    fn test_plan_multibyte_chars() {
        let frames: Vec<String> = RevealPlan::new("→ok", CHARS).collect();
        assert_eq!(frames, vec!["→", "→o", "→ok"]);
    }

    #[test]
    fn test_plan_lines() {
        let frames: Vec<String> = RevealPlan::new("{\n  \"a\": 1\n}", LINES).collect();
        assert_eq!(frames, vec!["{", "{\n  \"a\": 1", "{\n  \"a\": 1\n}"]);
    }

    #[test]
    fn test_plan_instant_is_single_unit() {
        let mut plan = RevealPlan::new("hello\nworld", RevealMode::Instant);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.next().as_deref(), Some("hello\nworld"));
        assert_eq!(plan.next(), None);
        assert_eq!(plan.next(), None);
    }

    #[test]
    fn test_plan_empty_incremental() {
        assert_eq!(RevealPlan::new("", CHARS).count(), 0);
        assert_eq!(RevealPlan::new("", LINES).count(), 0);
    }

    #[test]
    fn test_instant_emits_immediately() {
        let timers = ManualTimers::default();
        let (frames, on_step) = recorder();
        let reveal = Reveal::start(&timers, "> help", RevealMode::Instant, on_step);

        assert_eq!(*frames.borrow(), vec!["> help"]);
        assert!(reveal.is_finished());
        assert!(!reveal.is_active());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_incremental_one_char_per_tick() {
        let timers = ManualTimers::default();
        let (frames, on_step) = recorder();
        let reveal = Reveal::start(&timers, "abc", CHARS, on_step);

        assert!(frames.borrow().is_empty());
        timers.advance(CHAR_TICK_MS);
        assert_eq!(*frames.borrow(), vec!["a"]);
        assert_eq!(reveal.shown(), "a");

        timers.advance(CHAR_TICK_MS * 2);
        assert_eq!(*frames.borrow(), vec!["a", "ab", "abc"]);
        assert!(reveal.is_finished());
    }

    #[test]
    fn test_completion_releases_timer() {
        let timers = ManualTimers::default();
        let (frames, on_step) = recorder();
        let reveal = Reveal::start(&timers, "ab", CHARS, on_step);

        timers.advance(CHAR_TICK_MS * 10);
        assert_eq!(frames.borrow().len(), 2);
        assert!(!reveal.is_active());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_lines_use_line_period() {
        let timers = ManualTimers::default();
        let (frames, on_step) = recorder();
        let _reveal = Reveal::start(&timers, "{\n}", LINES, on_step);

        timers.advance(LINE_TICK_MS - 1);
        assert!(frames.borrow().is_empty());
        timers.advance(1);
        assert_eq!(*frames.borrow(), vec!["{"]);
        timers.advance(LINE_TICK_MS);
        assert_eq!(*frames.borrow(), vec!["{", "{\n}"]);
    }

    #[test]
    fn test_cancel_halts_emission() {
        let timers = ManualTimers::default();
        let (frames, on_step) = recorder();
        let reveal = Reveal::start(&timers, "abcdef", CHARS, on_step);

        timers.advance(CHAR_TICK_MS * 2);
        reveal.cancel();
        reveal.cancel();
        timers.advance(CHAR_TICK_MS * 10);

        assert_eq!(*frames.borrow(), vec!["a", "ab"]);
        assert!(reveal.is_cancelled());
        assert!(!reveal.is_finished());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_drop_cancels() {
        let timers = ManualTimers::default();
        let (frames, on_step) = recorder();
        let reveal = Reveal::start(&timers, "abc", CHARS, on_step);

        drop(reveal);
        timers.advance(CHAR_TICK_MS * 10);
        assert!(frames.borrow().is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_concurrent_reveals_are_independent() {
        let timers = ManualTimers::default();
        let (first, on_first) = recorder();
        let (second, on_second) = recorder();
        let a = Reveal::start(&timers, "xy", CHARS, on_first);
        let b = Reveal::start(&timers, "1234", CHARS, on_second);

        timers.advance(CHAR_TICK_MS);
        a.cancel();
        timers.advance(CHAR_TICK_MS * 3);

        assert_eq!(*first.borrow(), vec!["x"]);
        assert_eq!(*second.borrow(), vec!["1", "12", "123", "1234"]);
        assert!(b.is_finished());
    }

    #[test]
    fn test_empty_incremental_needs_no_timer() {
        let timers = ManualTimers::default();
        let (frames, on_step) = recorder();
        let reveal = Reveal::start(&timers, "", CHARS, on_step);

        assert!(reveal.is_finished());
        assert_eq!(timers.pending(), 0);
        assert!(frames.borrow().is_empty());
    }
}
