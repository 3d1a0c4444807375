//! Headless skirmish preview.
//!
//! Loads content from a data directory, places a hero and a slime on a map
//! and prints who gets each turn and what they could do with it.
//!
//! ```bash
//! SKIRMISH_MAP=corridor RUST_LOG=tactics_core=debug cargo run -p tactics-client
//! ```
mod config;
mod skirmish;

use anyhow::Result;
use config::SkirmishConfig;
use tactics_core::{ExecuteError, GameError, StateError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SkirmishConfig::from_env();
    let _guard = setup_logging(&config)?;

    let preview = skirmish::run(&config).inspect_err(log_failure)?;
    println!("{preview}");
    Ok(())
}

/// Logs go to stderr, and to `skirmish.log` as well when a log directory is
/// configured. The returned guard flushes the file writer on drop.
fn setup_logging(
    config: &SkirmishConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, "skirmish.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        tracing::info!("Log file: {}/skirmish.log", dir.display());
    }
    Ok(guard)
}

/// The rules error behind `err`, if the preview failed inside the core.
fn game_error(err: &anyhow::Error) -> Option<&dyn GameError> {
    if let Some(err) = err.downcast_ref::<ExecuteError>() {
        return Some(err);
    }
    err.downcast_ref::<StateError>().map(|err| err as &dyn GameError)
}

fn log_failure(err: &anyhow::Error) {
    let Some(game) = game_error(err) else {
        tracing::error!("preview failed: {err:#}");
        return;
    };
    let severity = game.severity();
    if severity.is_internal() {
        tracing::error!(severity = severity.as_str(), code = game.error_code(), "{game}");
    } else {
        tracing::warn!(severity = severity.as_str(), code = game.error_code(), "{game}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{EntityId, ErrorSeverity, TurnError};

    #[test]
    fn rules_errors_keep_their_severity_through_anyhow() {
        let err = anyhow::Error::from(ExecuteError::Turn(TurnError::Stalled));
        let game = game_error(&err).unwrap();
        assert_eq!(game.severity(), ErrorSeverity::Fatal);
        assert_eq!(game.error_code(), "TURN_STALLED");

        let err = anyhow::Error::from(StateError::NotAnActor(EntityId::default()));
        assert!(game_error(&err).is_some());

        assert!(game_error(&anyhow::anyhow!("no such map")).is_none());
    }
}
