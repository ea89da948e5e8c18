use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub const DEFAULT_LOG_LEVEL: &str = "info,workshop_booking_client=debug,hyper=info,rustls=info";

/// Logs to stderr, filtered by `RUST_LOG` or [`DEFAULT_LOG_LEVEL`].
///
/// Calling it a second time leaves the first subscriber in place.
pub fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let result = tracing_subscriber::registry()
        .with(
            stderr_log.with_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()),
            ),
        )
        .try_init();
    if let Err(error) = result {
        tracing::debug!(%error, "logging was already set up");
    }
}
