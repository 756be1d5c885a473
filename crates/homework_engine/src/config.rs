//! Credentials and runtime settings read from the process environment.

use std::fmt;
use std::time::Duration;

use homework_core::{CursorPolicy, ValidationMode};

use crate::{ApiSettings, TelegramSettings};

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

const ENDPOINT_VAR: &str = "PRACTICUM_ENDPOINT";
const RETRY_PERIOD_VAR: &str = "RETRY_PERIOD_SECS";
const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";
const CURSOR_POLICY_VAR: &str = "CURSOR_POLICY";
const VALIDATION_MODE_VAR: &str = "VALIDATION_MODE";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("credentials missing or empty: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// The three secrets the notifier needs. Absent variables read as empty.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).unwrap_or_default();
        Self {
            api_token: read(PRACTICUM_TOKEN_VAR),
            bot_token: read(TELEGRAM_TOKEN_VAR),
            chat_id: read(CHAT_ID_VAR),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of the variables whose values are empty or whitespace.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN_VAR, &self.api_token),
            (TELEGRAM_TOKEN_VAR, &self.bot_token),
            (CHAT_ID_VAR, &self.chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::MissingCredentials(missing))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &redact(&self.api_token))
            .field("bot_token", &redact(&self.bot_token))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

#[derive(Debug, Clone)]
pub struct NotifierSettings {
    pub api: ApiSettings,
    pub telegram: TelegramSettings,
    pub retry_period: Duration,
    pub cursor_policy: CursorPolicy,
    pub validation_mode: ValidationMode,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            telegram: TelegramSettings::default(),
            retry_period: Duration::from_secs(600),
            cursor_policy: CursorPolicy::Advance,
            validation_mode: ValidationMode::Strict,
        }
    }
}

impl NotifierSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from `lookup`, falling back to defaults for unset or blank keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Self::default();

        if let Some(endpoint) = read(ENDPOINT_VAR) {
            reqwest::Url::parse(&endpoint).map_err(|err| ConfigError::InvalidSetting {
                key: ENDPOINT_VAR,
                value: endpoint.clone(),
                reason: err.to_string(),
            })?;
            settings.api.endpoint = endpoint;
        }
        if let Some(raw) = read(RETRY_PERIOD_VAR) {
            settings.retry_period = parse_secs(RETRY_PERIOD_VAR, &raw)?;
        }
        if let Some(raw) = read(REQUEST_TIMEOUT_VAR) {
            let timeout = parse_secs(REQUEST_TIMEOUT_VAR, &raw)?;
            settings.api.request_timeout = timeout;
            settings.telegram.request_timeout = timeout;
        }
        if let Some(raw) = read(CURSOR_POLICY_VAR) {
            settings.cursor_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "advance" => CursorPolicy::Advance,
                "fixed" => CursorPolicy::Fixed,
                _ => return Err(invalid(CURSOR_POLICY_VAR, &raw, "expected advance or fixed")),
            };
        }
        if let Some(raw) = read(VALIDATION_MODE_VAR) {
            settings.validation_mode = match raw.trim().to_ascii_lowercase().as_str() {
                "strict" => ValidationMode::Strict,
                "lenient" => ValidationMode::Lenient,
                _ => return Err(invalid(VALIDATION_MODE_VAR, &raw, "expected strict or lenient")),
            };
        }

        Ok(settings)
    }
}

fn parse_secs(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid(key, raw, "must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(err) => Err(invalid(key, raw, &err.to_string())),
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn all_three_credentials_are_required() {
        let full = [
            (PRACTICUM_TOKEN_VAR, "api"),
            (TELEGRAM_TOKEN_VAR, "bot"),
            (CHAT_ID_VAR, "42"),
        ];
        assert!(Credentials::from_lookup(lookup(&full)).is_valid());

        for skip in 0..full.len() {
            let partial: Vec<_> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, pair)| *pair)
                .collect();
            let creds = Credentials::from_lookup(lookup(&partial));
            assert!(!creds.is_valid());
            assert_eq!(creds.missing(), vec![full[skip].0]);
        }
    }

    #[test]
    fn blank_credentials_are_invalid() {
        let creds = Credentials {
            api_token: "api".into(),
            bot_token: "   ".into(),
            chat_id: String::new(),
        };
        assert_eq!(
            creds.validated().unwrap_err(),
            ConfigError::MissingCredentials(vec![TELEGRAM_TOKEN_VAR, CHAT_ID_VAR])
        );
    }

    #[test]
    fn debug_output_hides_tokens() {
        let creds = Credentials {
            api_token: "secret-api".into(),
            bot_token: "secret-bot".into(),
            chat_id: "42".into(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn settings_default_when_unset() {
        let settings = NotifierSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.retry_period, Duration::from_secs(600));
        assert_eq!(settings.cursor_policy, CursorPolicy::Advance);
        assert_eq!(settings.validation_mode, ValidationMode::Strict);
        assert_eq!(settings.api.endpoint, crate::api::DEFAULT_ENDPOINT);
    }

    #[test]
    fn settings_read_overrides() {
        let settings = NotifierSettings::from_lookup(lookup(&[
            (ENDPOINT_VAR, "http://localhost:9000/statuses/"),
            (RETRY_PERIOD_VAR, "5"),
            (REQUEST_TIMEOUT_VAR, "3"),
            (CURSOR_POLICY_VAR, "Fixed"),
            (VALIDATION_MODE_VAR, "lenient"),
        ]))
        .unwrap();
        assert_eq!(settings.api.endpoint, "http://localhost:9000/statuses/");
        assert_eq!(settings.retry_period, Duration::from_secs(5));
        assert_eq!(settings.api.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.telegram.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.cursor_policy, CursorPolicy::Fixed);
        assert_eq!(settings.validation_mode, ValidationMode::Lenient);
    }

    #[test]
    fn malformed_settings_name_the_variable() {
        let err = NotifierSettings::from_lookup(lookup(&[(RETRY_PERIOD_VAR, "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: RETRY_PERIOD_VAR, .. }));

        let err = NotifierSettings::from_lookup(lookup(&[(RETRY_PERIOD_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: RETRY_PERIOD_VAR, .. }));

        let err =
            NotifierSettings::from_lookup(lookup(&[(CURSOR_POLICY_VAR, "sideways")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: CURSOR_POLICY_VAR, .. }));

        let err = NotifierSettings::from_lookup(lookup(&[(ENDPOINT_VAR, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: ENDPOINT_VAR, .. }));
    }
}
