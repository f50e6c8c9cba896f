use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "error" => LevelFilter::ERROR,
        "warn" | "warning" => LevelFilter::WARN,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

/// Builds the log filter from the configured level, refined by any valid
/// `RUST_LOG` directives.
pub fn filter(configured_level: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level(configured_level).into())
        .from_env_lossy()
}

/// Installs the fmt subscriber. Later calls are no-ops.
pub fn init(configured_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(configured_level))
        .with_target(false)
        .try_init();
}
