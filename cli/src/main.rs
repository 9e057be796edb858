use clap::Parser;
use evdump_cli::app;
use evdump_cli::commands::cli;
use evdump_core::api::{load_default, resolve_api_key, CancelSignal, CliError, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            1
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<(), CliError> {
    let args = cli::Args::parse();
    let mut cfg =
        load_default(args.config.as_deref()).map_err(|e| CliError::Config(e.to_string()))?;
    args.apply_overrides(&mut cfg);
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let api_key = resolve_api_key(&cfg, Some(&args.env_file))
        .map_err(|e| CliError::Config(e.to_string()))?
        .ok_or_else(|| {
            CliError::Config("BRAINTRUST_API_KEY environment variable is not set".to_string())
        })?;

    let cancel = CancelSignal::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!(
                    target: "evdump.cli",
                    "interrupt received; finishing in-flight objects"
                );
                cancel.cancel();
            }
        });
    }

    app::run_export(&args, &cfg, api_key, cancel).await?;
    tracing::info!(target: "evdump.cli", "Data download completed successfully");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("evdump"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("evdump.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
