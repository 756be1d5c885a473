mod logging;

use std::process::ExitCode;

use anyhow::Context;
use homework_engine::{Credentials, Notifier, NotifierSettings, PracticumClient, TelegramMessenger};
use notifier_logging::{notifier_critical, notifier_info};

const EXIT_FATAL: u8 = 1;

fn main() -> ExitCode {
    // A missing .env file is fine; the variables may come from the real environment.
    let _ = dotenvy::dotenv();

    let destination = logging::LogDestination::from_setting(
        std::env::var(logging::LOG_DESTINATION_VAR).ok().as_deref(),
    );
    logging::initialize(destination);

    ExitCode::from(exit_status(run()))
}

fn run() -> anyhow::Result<()> {
    let notifier = prepare(
        Credentials::load(),
        |key| std::env::var(key).ok(),
        chrono::Utc::now().timestamp(),
    )?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(notifier.run());
    Ok(())
}

/// Checks credentials and settings and builds the loop. Nothing polls until this succeeds.
fn prepare(
    credentials: Credentials,
    settings_lookup: impl Fn(&str) -> Option<String>,
    start_timestamp: i64,
) -> anyhow::Result<Notifier> {
    let credentials = credentials
        .validated()
        .context("credentials are missing or empty")?;
    let settings =
        NotifierSettings::from_lookup(settings_lookup).context("invalid notifier settings")?;

    let source = PracticumClient::new(settings.api.clone(), credentials.api_token.clone())
        .context("failed to build the API client")?;
    let messenger = TelegramMessenger::new(settings.telegram.clone(), &credentials.bot_token)
        .context("failed to build the Telegram client")?;

    notifier_info!("Starting homework notifier against {}", source.endpoint());
    Ok(Notifier::new(
        Box::new(source),
        Box::new(messenger),
        credentials.chat_id,
        &settings,
        start_timestamp,
    ))
}

/// Maps the startup outcome to a process exit status, logging fatal errors as critical.
fn exit_status(result: anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            notifier_critical!("{:#}", err);
            EXIT_FATAL
        }
    }
}
