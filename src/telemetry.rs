//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DFS_TRACE_LOG";

/// Filter used when `DFS_TRACE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "dfs_trace=info";

static INIT: Once = Once::new();

/// Installs the global tracing subscriber.
///
/// Reads `DFS_TRACE_LOG` (EnvFilter syntax, e.g. `dfs_trace=debug`).
/// Calling it more than once is harmless.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
    });
}
