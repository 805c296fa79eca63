//! Log subscriber setup.
//!
//! Filtering follows `RUST_LOG` and falls back to the given directive.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global `tracing` subscriber. Later calls are no-ops.
pub fn init(default_directive: &str) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
        {
            eprintln!("Logging already initialized: {err}");
        }
    });
}
