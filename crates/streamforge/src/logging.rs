// Tracing initialisation for applications embedding StreamForge.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "streamforge_scoring=info";

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call has an effect. If the
/// application already installed a global subscriber, that one is kept.
pub fn init_tracing() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        tracing::debug!(event = "tracing_initialized", default_filter = DEFAULT_FILTER);
    });
}
