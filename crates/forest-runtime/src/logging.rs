#![forbid(unsafe_code)]

//! Log output for hosts that do not install their own subscriber.
//!
//! Every event emitted by this crate uses a target under `forest`
//! (`forest::reactive`, `forest::session`, `forest::ledger`, `forest::app`).

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "FOREST_LOG";

/// Filter used when `FOREST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Install a fmt subscriber filtered by `filter`, or by `FOREST_LOG` when
/// `filter` is `None`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "log-init")]
pub fn init(filter: Option<&str>) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        None => EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
