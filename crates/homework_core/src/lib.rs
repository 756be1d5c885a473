//! Homework core: pure validation, formatting and the notifier state machine.
mod effect;
mod format;
mod msg;
mod state;
mod status;
mod update;
mod validate;

pub use effect::{Effect, NotificationKind};
pub use format::{format_status, FormatError};
pub use msg::Msg;
pub use state::{CursorPolicy, NotifierState};
pub use status::{HomeworkRecord, HomeworkStatus, UnknownStatus};
pub use update::{update, ERROR_PREFIX};
pub use validate::{validate_response, ValidatedResponse, ValidationError, ValidationMode};
