//! Tracing subscriber installation.
//!
//! Span constructors and names live in `lectern_core::spans`.

use lectern_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` overrides `config.log_level`. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    if !installed {
        tracing::debug!("tracing subscriber already installed");
    }
    installed
}
