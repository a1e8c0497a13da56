use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use symbio::config::LoggingConfig;

/// Install the global subscriber: console output plus an optional daily file.
///
/// `RUST_LOG` wins over `logging.level` when set.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.level)));

    let file_layer = config.dir.as_deref().and_then(file_layer);
    let file_logging_dir = file_layer.as_ref().and(config.dir.as_ref());

    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = file_logging_dir {
        eprintln!("Logging to: {}/symbio.log", dir.display());
    }
}

fn file_layer<S>(log_dir: &Path) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    // `rolling::daily` panics when the first file cannot be created, so check writability first.
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "Warning: Could not create log directory {} ({}), file logging disabled",
            log_dir.display(),
            e
        );
        return None;
    }

    let marker = log_dir.join(".symbio_write_test");
    if let Err(e) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&marker)
    {
        eprintln!(
            "Warning: Could not write to log directory {} ({}), file logging disabled",
            log_dir.display(),
            e
        );
        return None;
    }
    let _ = std::fs::remove_file(&marker);

    let file_appender = tracing_appender::rolling::daily(log_dir, "symbio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the lifetime of the process
    Box::leak(Box::new(guard));

    Some(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed(),
    )
}

/// Minimal logging for one-shot commands
pub fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}
