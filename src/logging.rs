use tracing_subscriber::{EnvFilter, fmt};

const LOG_ENV: &str = "SCATTERSCORE_LOG";

/// Installs the stderr subscriber. Filter precedence: `SCATTERSCORE_LOG`, `RUST_LOG`, then `info`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
