#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Status,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Tag subsequent log lines with this cycle number.
    TagCycle(u64),
    /// Deliver a message to the chat.
    Notify { kind: NotificationKind, text: String },
    /// The API reported no homework in the polled window.
    NoNews,
    /// The status message matches the last one sent.
    StatusUnchanged,
    /// The error text matches the last one sent.
    ErrorSuppressed { text: String },
}
