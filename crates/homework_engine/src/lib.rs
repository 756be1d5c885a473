//! Homework engine: configuration, HTTP clients and the polling loop.
mod api;
mod config;
mod messenger;
mod notifier;
mod types;

pub use api::{ApiSettings, PracticumClient, StatusSource};
pub use config::{
    ConfigError, Credentials, NotifierSettings, CHAT_ID_VAR, PRACTICUM_TOKEN_VAR,
    TELEGRAM_TOKEN_VAR,
};
pub use messenger::{Messenger, TelegramMessenger, TelegramSettings};
pub use notifier::Notifier;
pub use types::{ApiError, CycleError, DeliveryError, ErrorClass};
