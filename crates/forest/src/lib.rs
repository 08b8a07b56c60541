#![forbid(unsafe_code)]

//! Focus Forest: a focus timer whose finished sessions grow a forest.
//!
//! This crate re-exports the workspace crates under one roof:
//!
//! - [`runtime`]: the reactive store, session state machine and ledger.
//! - [`style`]: theme colors and font sizes.
//! - [`i18n`]: languages, plural rules and the bundled string tables.
//!
//! Most hosts only need the [`prelude`]:
//!
//! ```
//! use forest::prelude::*;
//!
//! let app = FocusForest::new(&ForestConfig::default()).unwrap();
//! app.start_session("Read paper").unwrap();
//! app.tick();
//! assert_eq!(app.formatted_time(), "00:00:01");
//!
//! let tree = app.finish_session().unwrap();
//! assert_eq!(tree.task_label(), "Read paper");
//! assert_eq!(app.forest_count(), 1);
//! ```

pub use forest_i18n as i18n;
pub use forest_runtime as runtime;
pub use forest_style as style;

pub use forest_runtime::reactive;

/// Load `ForestConfig` from TOML text and build the store.
#[cfg(feature = "config-file")]
pub fn from_toml(source: &str) -> Result<prelude::FocusForest, forest_runtime::InitError> {
    let config = forest_runtime::ForestConfig::from_toml_str(source)?;
    prelude::FocusForest::new(&config)
}

pub mod prelude {
    pub use forest_i18n::{Language, StringCatalog, bundled_catalog};
    pub use forest_runtime::reactive::{
        BatchScope, Computed, Effect, Observable, ReactiveScope, ReadSignal, Subscription, batch,
    };
    pub use forest_runtime::{
        CompletedEntry, ConfigError, FocusError, FocusForest, ForestConfig, ForestLedger,
        InitError, LayoutMode, ManualClock, Page, ReactiveError, ScheduledTick, SessionStatus,
        StyleVars, TransitionError, ValidationError, format_elapsed,
    };
    pub use forest_style::{FontSize, THEME_SWATCHES, ThemeColor};
    pub use web_time::Instant;
}
