//! Up/down recall over previously submitted commands.

/// Command history with a recall cursor.
///
/// The cursor is `None` while the user is typing fresh input and `Some(i)`
/// while recalling entry `i`. Recalling past the oldest entry saturates
/// instead of wrapping.
#[derive(Clone, Debug, Default)]
pub struct InputHistoryNavigator {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl InputHistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a previously persisted history.
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self {
            entries,
            cursor: None,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Record a submitted command and stop navigating.
    pub fn push(&mut self, cmd: impl Into<String>) {
        self.entries.push(cmd.into());
        self.reset();
    }

    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Step towards older entries. Returns `None` when there is no history.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }

        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        Some(self.entries[index].as_str())
    }

    /// Step towards newer entries.
    ///
    /// Moving past the newest entry returns to fresh input, signalled by an
    /// empty string. When not navigating this is a no-op that also returns "".
    pub fn recall_next(&mut self) -> &str {
        let Some(i) = self.cursor else {
            return "";
        };

        if i + 1 >= self.entries.len() {
            self.cursor = None;
            return "";
        }

        self.cursor = Some(i + 1);
        self.entries[i + 1].as_str()
    }
}
