use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity count picks the default level, `RUST_LOG` still wins when set
pub fn level_for_verbosity(verbosity_level: u8) -> LevelFilter {
    match verbosity_level {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Human readable output unless `json` is set
pub fn setup_tracing(verbosity_level: u8, json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for_verbosity(verbosity_level).into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
