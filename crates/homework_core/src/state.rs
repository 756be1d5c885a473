/// What happens to the poll cursor after a successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    /// Move the cursor to the `current_date` reported by the API.
    #[default]
    Advance,
    /// Keep polling from the process start time.
    Fixed,
}

/// In-memory state owned by the polling loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotifierState {
    cursor: i64,
    policy: CursorPolicy,
    last_status: Option<String>,
    last_error: Option<String>,
    cycles: u64,
}

impl NotifierState {
    pub fn new(start_timestamp: i64, policy: CursorPolicy) -> Self {
        Self {
            cursor: start_timestamp,
            policy,
            last_status: None,
            last_error: None,
            cycles: 0,
        }
    }

    /// Timestamp sent as `from_date` on the next poll.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn policy(&self) -> CursorPolicy {
        self.policy
    }

    pub fn last_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub(crate) fn begin_cycle(&mut self) -> u64 {
        self.cycles += 1;
        self.cycles
    }

    pub(crate) fn advance_cursor(&mut self, current_date: Option<i64>) {
        if let (CursorPolicy::Advance, Some(date)) = (self.policy, current_date) {
            self.cursor = date;
        }
    }

    /// Records `text` in the status slot. Returns false if it was already there.
    pub(crate) fn remember_status(&mut self, text: &str) -> bool {
        remember(&mut self.last_status, text)
    }

    /// Records `text` in the error slot. Returns false if it was already there.
    pub(crate) fn remember_error(&mut self, text: &str) -> bool {
        remember(&mut self.last_error, text)
    }
}

fn remember(slot: &mut Option<String>, text: &str) -> bool {
    if slot.as_deref() == Some(text) {
        return false;
    }
    *slot = Some(text.to_string());
    true
}
