//! The command interpreter behind one terminal session.
//!
//! [`Session`] owns the session log, the command history and the decode
//! history. Every appended line gets its own [`Reveal`]; discarding lines
//! (on `clear`, relaunch or hide) cancels their reveals.
//!
//! Renderers subscribe with an observer callback. The observer is never called
//! while the session's state is borrowed, so it may read the session back.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{BACK_DELAY_MS, COMMAND_HISTORY_KEY, MS_PER_SECOND};
use crate::core::commands::{self, Command};
use crate::core::history::HistoryStore;
use crate::core::jwt;
use crate::core::navigator::InputHistoryNavigator;
use crate::core::reveal::Reveal;
use crate::models::{
    DecodeResult, HistoryEntry, HistoryQuery, LineId, LogLine, SessionLine, Visibility,
};
use crate::utils::storage::{self, Storage};
use crate::utils::timer::{TimerHandle, Timers};

/// Change notifications for renderers.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Lines were appended or the log was replaced.
    LogChanged,
    /// A line revealed one more unit.
    LineRevealed { id: LineId, text: String },
    VisibilityChanged(Visibility),
    /// A decode attempt was recorded.
    HistoryChanged,
}

type Observer = Rc<dyn Fn(&SessionEvent)>;

struct LogEntry {
    id: LineId,
    line: SessionLine,
    shown: Rc<RefCell<String>>,
    reveal: Option<Reveal>,
}

struct SessionState {
    visibility: Visibility,
    log: Vec<LogEntry>,
    navigator: InputHistoryNavigator,
    current: Option<DecodeResult>,
    history: HistoryStore,
    pending_hide: Option<TimerHandle>,
}

impl SessionState {
    fn push(&mut self, line: SessionLine) -> LineId {
        let id = LineId::next();
        self.log.push(LogEntry {
            id,
            line,
            shown: Rc::new(RefCell::new(String::new())),
            reveal: None,
        });
        id
    }

    fn push_all(&mut self, lines: Vec<SessionLine>, ids: &mut Vec<LineId>) {
        for line in lines {
            ids.push(self.push(line));
        }
    }
}

/// Terminal session: command interpreter plus its state.
pub struct Session {
    state: Rc<RefCell<SessionState>>,
    timers: Rc<dyn Timers>,
    storage: Rc<dyn Storage>,
    observer: Observer,
}

impl Session {
    /// Create a hidden session, restoring both histories from `storage`.
    pub fn new(
        timers: Rc<dyn Timers>,
        storage: Rc<dyn Storage>,
        observer: impl Fn(&SessionEvent) + 'static,
    ) -> Self {
        let commands: Vec<String> =
            storage::load_json(storage.as_ref(), COMMAND_HISTORY_KEY).unwrap_or_default();
        let history = HistoryStore::load(Rc::clone(&storage));

        let state = SessionState {
            visibility: Visibility::Hidden,
            log: Vec::new(),
            navigator: InputHistoryNavigator::from_entries(commands),
            current: None,
            history,
            pending_hide: None,
        };

        Self {
            state: Rc::new(RefCell::new(state)),
            timers,
            storage,
            observer: Rc::new(observer),
        }
    }

    // ------------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------------

    pub fn visibility(&self) -> Visibility {
        self.state.borrow().visibility
    }

    /// Show the terminal with a fresh log of welcome lines.
    ///
    /// Cancels a pending `back`. No-op when already active.
    pub fn launch(&self) {
        let mut ids = Vec::new();
        let (discarded, pending) = {
            let mut state = self.state.borrow_mut();
            if state.visibility == Visibility::Active && state.pending_hide.is_none() {
                return;
            }
            state.visibility = Visibility::Active;
            state.current = None;
            state.navigator.reset();
            let discarded = std::mem::take(&mut state.log);
            state.push_all(commands::welcome_lines(), &mut ids);
            (discarded, state.pending_hide.take())
        };
        drop(pending);
        drop(discarded);
        log::debug!("session launched");

        self.emit(&[
            SessionEvent::VisibilityChanged(Visibility::Active),
            SessionEvent::LogChanged,
        ]);
        self.start_reveals(&ids);
    }

    /// Hide the terminal immediately, ending the session.
    pub fn dismiss(&self) {
        hide(&self.state, self.observer.as_ref());
    }

    pub fn is_hide_pending(&self) -> bool {
        self.state.borrow().pending_hide.is_some()
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Handle one line of input. Blank input, and input while hidden, is ignored.
    pub fn submit(&self, input: &str) {
        let Some(command) = Command::parse(input) else {
            return;
        };
        if self.visibility() == Visibility::Hidden {
            log::debug!("ignoring input while hidden");
            return;
        }
        log::debug!("command: {command:?}");

        let mut events = vec![SessionEvent::LogChanged];
        let mut ids = Vec::new();
        let mut discarded = Vec::new();
        {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;

            state.navigator.push(input);
            if let Err(e) =
                storage::save_json(self.storage.as_ref(), COMMAND_HISTORY_KEY, state.navigator.entries())
            {
                log::warn!("command history not persisted: {e}");
            }

            match command {
                Command::Clear => {
                    discarded = std::mem::take(&mut state.log);
                    state.current = None;
                    state.push_all(commands::welcome_lines(), &mut ids);
                }
                Command::Jwt(token) => {
                    ids.push(state.push(commands::echo_line(input)));

                    let now_ms = self.timers.now_ms();
                    let outcome = jwt::decode_at(&token, now_ms / MS_PER_SECOND);
                    state.push_all(commands::decode_lines(&outcome), &mut ids);

                    let entry = match outcome {
                        Ok(result) => {
                            let entry = HistoryEntry::valid(token, result.payload.clone());
                            state.current = Some(result);
                            entry
                        }
                        Err(e) => {
                            log::debug!("decode failed: {e}");
                            state.current = None;
                            HistoryEntry::invalid(token)
                        }
                    };
                    state.history.append(entry, now_ms as u64);
                    events.push(SessionEvent::HistoryChanged);
                }
                Command::Help => {
                    ids.push(state.push(commands::echo_line(input)));
                    state.push_all(commands::help_lines(), &mut ids);
                }
                Command::Back => {
                    ids.push(state.push(commands::echo_line(input)));
                    state.push_all(commands::exit_lines(), &mut ids);
                    if state.pending_hide.is_none() {
                        state.pending_hide = Some(self.schedule_hide());
                    }
                }
                Command::Unknown(_) => {
                    ids.push(state.push(commands::echo_line(input)));
                    state.push_all(commands::unknown_lines(), &mut ids);
                }
            }
        }
        drop(discarded);

        self.emit(&events);
        self.start_reveals(&ids);
    }

    fn schedule_hide(&self) -> TimerHandle {
        let state: Weak<RefCell<SessionState>> = Rc::downgrade(&self.state);
        let observer = Rc::clone(&self.observer);
        self.timers.once(
            BACK_DELAY_MS,
            Box::new(move || {
                if let Some(state) = state.upgrade() {
                    hide(&state, observer.as_ref());
                }
            }),
        )
    }

    // ------------------------------------------------------------------------
    // Input history
    // ------------------------------------------------------------------------

    /// Older command, or `None` when there is no history.
    pub fn recall_previous(&self) -> Option<String> {
        self.state
            .borrow_mut()
            .navigator
            .recall_previous()
            .map(str::to_string)
    }

    /// Newer command; empty once past the newest.
    pub fn recall_next(&self) -> String {
        self.state.borrow_mut().navigator.recall_next().to_string()
    }

    pub fn is_recalling(&self) -> bool {
        self.state.borrow().navigator.cursor().is_some()
    }

    pub fn command_history(&self) -> Vec<String> {
        self.state.borrow().navigator.entries().to_vec()
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    /// Snapshot of the log in append order.
    pub fn lines(&self) -> Vec<LogLine> {
        self.state
            .borrow()
            .log
            .iter()
            .map(|entry| LogLine {
                id: entry.id,
                line: entry.line.clone(),
                shown: entry.shown.borrow().clone(),
                finished: entry.reveal.as_ref().is_some_and(Reveal::is_finished),
            })
            .collect()
    }

    /// The most recent successful decode, cleared by a failed decode or `clear`.
    pub fn current_decode(&self) -> Option<DecodeResult> {
        self.state.borrow().current.clone()
    }

    pub fn query_history(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        self.state.borrow().history.query(query)
    }

    pub fn history_len(&self) -> usize {
        self.state.borrow().history.len()
    }

    /// Number of lines still holding a reveal timer.
    pub fn active_reveals(&self) -> usize {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|e| e.reveal.as_ref().is_some_and(Reveal::is_active))
            .count()
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn emit(&self, events: &[SessionEvent]) {
        for event in events {
            (self.observer)(event);
        }
    }

    /// Start a reveal for each new line, then attach it to its entry.
    ///
    /// Runs outside any borrow because instant reveals emit synchronously.
    fn start_reveals(&self, ids: &[LineId]) {
        for &id in ids {
            let Some((text, mode, shown)) = self.state.borrow().log.iter().find(|e| e.id == id).map(
                |e| (e.line.text(), e.line.reveal_mode(), Rc::clone(&e.shown)),
            ) else {
                continue;
            };

            let observer = Rc::clone(&self.observer);
            let reveal = Reveal::start(self.timers.as_ref(), &text, mode, move |frame: &str| {
                *shown.borrow_mut() = frame.to_string();
                observer(&SessionEvent::LineRevealed {
                    id,
                    text: frame.to_string(),
                });
            });

            let mut state = self.state.borrow_mut();
            if let Some(entry) = state.log.iter_mut().find(|e| e.id == id) {
                entry.reveal = Some(reveal);
            }
        }
    }
}

/// End the session: hide, cancel every reveal and any pending `back`.
fn hide(state: &RefCell<SessionState>, observer: &dyn Fn(&SessionEvent)) {
    let (discarded, pending) = {
        let mut state = state.borrow_mut();
        if state.visibility == Visibility::Hidden {
            return;
        }
        state.visibility = Visibility::Hidden;
        state.current = None;
        state.navigator.reset();
        (std::mem::take(&mut state.log), state.pending_hide.take())
    };
    drop(pending);
    drop(discarded);
    log::debug!("session hidden");

    observer(&SessionEvent::VisibilityChanged(Visibility::Hidden));
    observer(&SessionEvent::LogChanged);
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Session")
            .field("visibility", &state.visibility)
            .field("lines", &state.log.len())
            .field("history", &state.history.len())
            .finish_non_exhaustive()
    }
}
