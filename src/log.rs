// src/log.rs
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `level` accepts anything `EnvFilter`
/// understands (`info`, `DEBUG`, `firmware_notifier=trace`); an unparsable
/// value falls back to `info`.
pub fn init(level: &str) {
    let filter =
        EnvFilter::try_new(level.to_ascii_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
