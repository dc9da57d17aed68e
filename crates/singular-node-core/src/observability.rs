//! Observability: tracing init.
//!
//! Uses config::ObservabilityConfig for SINGULAR_NODE_QUIET, LOG_LEVEL, LOG_JSON.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call at process startup.
/// When SINGULAR_NODE_QUIET=1, only WARN and above are logged. `RUST_LOG`
/// takes precedence over both.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "singular_node=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    // Diagnostics go to stderr; stdout is reserved for command output.
    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}

/// Whether progress logging should be suppressed.
pub fn is_quiet() -> bool {
    crate::config::ObservabilityConfig::from_env().quiet
}
