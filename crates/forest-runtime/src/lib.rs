#![forbid(unsafe_code)]

//! Reactive state and session lifecycle for Focus Forest.
//!
//! # Modules
//!
//! - [`reactive`]: cells, derivations, effects and batching.
//! - [`session`] and [`ticker`]: the focus-session state machine and its
//!   cancellable tick cadence.
//! - [`ledger`]: the append-only forest of completed sessions.
//! - [`navigation`], [`settings`], [`projection`]: page/sidebar state,
//!   user preferences and the style parameters derived from them.
//! - [`app`]: [`FocusForest`], the store a presentation layer talks to.
//! - [`config`], [`locale`], [`logging`]: startup concerns.
//!
//! Everything runs on the host's UI thread; the reactive types are `!Send`.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod locale;
pub mod logging;
pub mod navigation;
pub mod projection;
pub mod reactive;
pub mod session;
pub mod settings;
pub mod ticker;

pub use app::{FocusForest, InitError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, ForestConfig};
pub use error::{FocusError, ReactiveError, TransitionError, ValidationError};
pub use ledger::{CompletedEntry, ForestLedger};
pub use navigation::{LayoutMode, Navigation, Page};
pub use projection::{StyleProjection, StyleVars};
pub use session::{FocusSession, SessionStatus, format_elapsed};
pub use settings::Settings;
pub use ticker::{CancelToken, ScheduledTick, TickSchedule};
