use serde_json::Value;

/// How to treat a response that lacks one of the documented keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Missing keys fail the cycle.
    #[default]
    Strict,
    /// Missing keys are reported as warnings; a missing `homeworks` list reads as empty.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("response is missing key \"{0}\"")]
    MissingKey(&'static str),
    #[error("\"homeworks\" is not a list")]
    HomeworksNotAList,
}

impl ValidationError {
    pub fn is_key_error(&self) -> bool {
        matches!(self, ValidationError::MissingKey(_))
    }

    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ValidationError::NotAnObject | ValidationError::HomeworksNotAList
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedResponse {
    /// Records in API order; the most recent submission comes first.
    pub homeworks: Vec<Value>,
    pub current_date: Option<i64>,
    /// Problems tolerated in lenient mode, for the caller to log.
    pub warnings: Vec<String>,
}

impl ValidatedResponse {
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Checks the decoded payload's shape before use.
pub fn validate_response(
    response: &Value,
    mode: ValidationMode,
) -> Result<ValidatedResponse, ValidationError> {
    let map = response.as_object().ok_or(ValidationError::NotAnObject)?;
    let mut warnings = Vec::new();

    let homeworks = match (map.get("homeworks"), mode) {
        (Some(value), _) => Some(value),
        (None, ValidationMode::Strict) => return Err(ValidationError::MissingKey("homeworks")),
        (None, ValidationMode::Lenient) => {
            warnings.push(ValidationError::MissingKey("homeworks").to_string());
            None
        }
    };

    let current_date = match (map.get("current_date"), mode) {
        (Some(value), _) => {
            let date = value.as_i64();
            if date.is_none() {
                warnings.push(format!("\"current_date\" is not an integer: {value}"));
            }
            date
        }
        (None, ValidationMode::Strict) => {
            return Err(ValidationError::MissingKey("current_date"))
        }
        (None, ValidationMode::Lenient) => {
            warnings.push(ValidationError::MissingKey("current_date").to_string());
            None
        }
    };

    let homeworks = match homeworks {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => return Err(ValidationError::HomeworksNotAList),
        None => Vec::new(),
    };

    Ok(ValidatedResponse {
        homeworks,
        current_date,
        warnings,
    })
}
