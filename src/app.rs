//! Root application module.
//!
//! Contains the main App component and the [`AppContext`] that bridges the
//! decoder [`Session`] into Leptos signals.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::history::HistoryPanel;
use crate::components::landing::Landing;
use crate::components::terminal::Terminal;
use crate::core::{Session, SessionEvent};
use crate::models::{HistoryEntry, HistoryQuery, LogLine, Visibility};
use crate::utils::storage;
use crate::utils::BrowserTimers;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// The session itself is not reactive. Its observer bumps revision signals,
/// and views re-read the session when a revision changes.
///
/// # Note
///
/// This struct is `Copy` because every field is an arena handle.
#[derive(Clone, Copy)]
pub struct AppContext {
    session: StoredValue<Rc<Session>, LocalStorage>,
    /// Terminal visibility, mirrored from the session.
    pub visibility: RwSignal<Visibility>,
    /// Bumped whenever the session log or a reveal changes.
    pub log_revision: RwSignal<u64>,
    /// Bumped whenever a decode attempt is recorded.
    pub history_revision: RwSignal<u64>,
}

impl AppContext {
    /// Creates the context backed by browser timers and localStorage.
    pub fn new() -> Self {
        let visibility = RwSignal::new(Visibility::Hidden);
        let log_revision = RwSignal::new(0u64);
        let history_revision = RwSignal::new(0u64);

        let session = Session::new(
            Rc::new(BrowserTimers),
            Rc::new(storage::LocalStorage),
            move |event: &SessionEvent| match event {
                SessionEvent::LogChanged | SessionEvent::LineRevealed { .. } => {
                    log_revision.update(|r| *r += 1);
                }
                SessionEvent::VisibilityChanged(v) => visibility.set(*v),
                SessionEvent::HistoryChanged => history_revision.update(|r| *r += 1),
            },
        );
        log::info!("session ready: {session:?}");

        Self {
            session: StoredValue::new_local(Rc::new(session)),
            visibility,
            log_revision,
            history_revision,
        }
    }

    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let session = self.session.with_value(Rc::clone);
        f(&session)
    }

    pub fn launch(&self) {
        self.with_session(Session::launch);
    }

    pub fn dismiss(&self) {
        self.with_session(Session::dismiss);
    }

    pub fn submit(&self, input: &str) {
        self.with_session(|s| s.submit(input));
    }

    /// Up/down recall. Negative steps go back in time.
    pub fn recall(&self, direction: i32) -> Option<String> {
        self.with_session(|s| {
            if direction < 0 {
                s.recall_previous()
            } else {
                Some(s.recall_next())
            }
        })
    }

    /// Current log, tracked on `log_revision`.
    pub fn lines(&self) -> Vec<LogLine> {
        self.log_revision.track();
        self.with_session(Session::lines)
    }

    /// Whether any decode attempt has been recorded, tracked on `history_revision`.
    pub fn has_history(&self) -> bool {
        self.history_revision.track();
        self.with_session(|s| s.history_len() > 0)
    }

    /// Decode history for a query, tracked on `history_revision`.
    pub fn history(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        self.history_revision.track();
        self.with_session(|s| s.query_history(query))
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let is_active = move || ctx.visibility.get() == Visibility::Active;
    let show_history = move || !is_active() && ctx.has_history();

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #0b0f1a;
                    color: #e0e0e0;
                    font-family: 'Courier New', monospace;
                ">
                    <h1 style="color: #ff6b6b; margin-bottom: 1rem;">
                        "Something went wrong"
                    </h1>
                    <ul style="color: #ff6b6b; font-size: 0.9rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                        style="
                            background: #4a90e2;
                            color: white;
                            border: none;
                            padding: 0.75rem 2rem;
                            border-radius: 4px;
                            cursor: pointer;
                        "
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Landing />
            <Show when=is_active fallback=|| ()>
                <Terminal />
            </Show>
            <Show when=show_history fallback=|| ()>
                <HistoryPanel />
            </Show>
        </ErrorBoundary>
    }
}
