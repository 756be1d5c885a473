use serde_json::Value;

use crate::{HomeworkRecord, HomeworkStatus};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("homework record is missing key \"{0}\"")]
    MissingKey(&'static str),
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

impl HomeworkRecord {
    /// Reads a record out of one element of the `homeworks` list.
    ///
    /// Key presence is checked before the status value, so a record missing
    /// both keys reports `status` first.
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        let status = value
            .get("status")
            .ok_or(FormatError::MissingKey("status"))?;
        let name = value
            .get("homework_name")
            .ok_or(FormatError::MissingKey("homework_name"))?;

        let status = match status {
            Value::String(raw) => raw
                .parse::<HomeworkStatus>()
                .map_err(|err| FormatError::UnknownStatus(err.0))?,
            other => return Err(FormatError::UnknownStatus(other.to_string())),
        };
        let homework_name = match name {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        };

        Ok(Self {
            homework_name,
            status,
        })
    }
}

/// Turns a single homework record into the verdict message sent to the chat.
pub fn format_status(value: &Value) -> Result<String, FormatError> {
    HomeworkRecord::from_value(value).map(|record| record.message())
}
