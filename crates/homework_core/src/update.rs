use crate::{Effect, Msg, NotificationKind, NotifierState};

/// Prefix of every error notification sent to the chat.
pub const ERROR_PREFIX: &str = "Program failure: ";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: NotifierState, msg: Msg) -> (NotifierState, Vec<Effect>) {
    let effects = match msg {
        Msg::CycleStarted => {
            let cycle = state.begin_cycle();
            vec![Effect::TagCycle(cycle)]
        }
        Msg::StatusReceived {
            message,
            current_date,
        } => {
            state.advance_cursor(current_date);
            match message {
                None => vec![Effect::NoNews],
                Some(text) => {
                    if state.remember_status(&text) {
                        vec![Effect::Notify {
                            kind: NotificationKind::Status,
                            text,
                        }]
                    } else {
                        vec![Effect::StatusUnchanged]
                    }
                }
            }
        }
        Msg::CycleFailed { error } => {
            let text = format!("{ERROR_PREFIX}{error}");
            if state.remember_error(&text) {
                vec![Effect::Notify {
                    kind: NotificationKind::Error,
                    text,
                }]
            } else {
                vec![Effect::ErrorSuppressed { text }]
            }
        }
    };

    (state, effects)
}
