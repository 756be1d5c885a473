use std::time::Duration;

use homework_core::{
    format_status, update, validate_response, Effect, Msg, NotificationKind, NotifierState,
    ValidationMode,
};
use notifier_logging::{notifier_debug, notifier_error, notifier_info, set_poll_cycle};

use crate::{ApiError, CycleError, Messenger, NotifierSettings, StatusSource};

struct Polled {
    message: Option<String>,
    current_date: Option<i64>,
}

/// The polling loop: fetch, validate, format, notify, sleep, repeat.
pub struct Notifier {
    source: Box<dyn StatusSource>,
    messenger: Box<dyn Messenger>,
    chat_id: String,
    retry_period: Duration,
    validation_mode: ValidationMode,
    state: NotifierState,
}

impl Notifier {
    pub fn new(
        source: Box<dyn StatusSource>,
        messenger: Box<dyn Messenger>,
        chat_id: impl Into<String>,
        settings: &NotifierSettings,
        start_timestamp: i64,
    ) -> Self {
        Self {
            source,
            messenger,
            chat_id: chat_id.into(),
            retry_period: settings.retry_period,
            validation_mode: settings.validation_mode,
            state: NotifierState::new(start_timestamp, settings.cursor_policy),
        }
    }

    pub fn state(&self) -> &NotifierState {
        &self.state
    }

    /// Polls forever. Never returns; the process is expected to be killed.
    pub async fn run(mut self) {
        notifier_info!(
            "Polling every {}s from {} (cursor policy {:?}, validation {:?})",
            self.retry_period.as_secs(),
            self.state.cursor(),
            self.state.policy(),
            self.validation_mode
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Runs one poll cycle without the trailing sleep.
    pub async fn run_cycle(&mut self) {
        self.dispatch(Msg::CycleStarted).await;

        let msg = match self.poll().await {
            Ok(polled) => Msg::StatusReceived {
                message: polled.message,
                current_date: polled.current_date,
            },
            Err(err) => {
                notifier_error!("Cycle failed with {} error: {}", err.class(), err);
                if let CycleError::Transport(ApiError::BadStatus { body, .. }) = &err {
                    notifier_error!("API error body: {}", body);
                }
                Msg::CycleFailed {
                    error: err.to_string(),
                }
            }
        };

        self.dispatch(msg).await;
    }

    async fn poll(&self) -> Result<Polled, CycleError> {
        let body = self.source.fetch_status(self.state.cursor()).await?;
        let validated = validate_response(&body, self.validation_mode)?;
        for warning in &validated.warnings {
            notifier_error!("Unexpected API response: {}", warning);
        }
        let message = validated.latest().map(format_status).transpose()?;
        Ok(Polled {
            message,
            current_date: validated.current_date,
        })
    }

    async fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.apply(effect).await;
        }
    }

    async fn apply(&self, effect: Effect) {
        match effect {
            Effect::TagCycle(cycle) => set_poll_cycle(cycle),
            Effect::Notify { kind, text } => self.deliver(kind, &text).await,
            Effect::NoNews => notifier_debug!("No homework updates in the polled window"),
            Effect::StatusUnchanged => notifier_debug!("Homework status has not changed"),
            Effect::ErrorSuppressed { text } => {
                notifier_debug!("Error already reported, not sending again: {}", text)
            }
        }
    }

    async fn deliver(&self, kind: NotificationKind, text: &str) {
        match self.messenger.send_message(&self.chat_id, text).await {
            Ok(()) => notifier_debug!("Sent {:?} message: {}", kind, text),
            Err(err) => notifier_error!("Could not deliver {:?} message: {}", kind, err),
        }
    }
}
