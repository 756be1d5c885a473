#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A new poll cycle is about to fetch.
    CycleStarted,
    /// Fetch, validation and formatting all succeeded.
    StatusReceived {
        /// Formatted verdict for the latest record; `None` when the list was empty.
        message: Option<String>,
        current_date: Option<i64>,
    },
    /// Any stage of the cycle failed; carries the rendered error.
    CycleFailed { error: String },
}
