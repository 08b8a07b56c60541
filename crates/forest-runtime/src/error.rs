//! Error taxonomy for the reactive core and the intent handlers.
//!
//! | Error | Raised by | Recoverable |
//! |-------|-----------|-------------|
//! | [`ValidationError`] | intent handlers, bad user input | yes, nothing changed |
//! | [`TransitionError`] | session intents in the wrong state | yes, nothing changed |
//! | [`ReactiveError::DependencyCycle`] | derivation/effect wiring | no, abort initialization |
//! | [`ReactiveError::ReentrantWrite`] | a cell written from its own notification | no, wiring defect |

use forest_style::{ColorParseError, UnknownFontSize};

use crate::reactive::NodeId;

/// Defects in the reactive graph itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReactiveError {
    #[error("dependency cycle through reactive node {node}")]
    DependencyCycle { node: NodeId },
    #[error("reactive node {node} was written while notifying its own subscribers")]
    ReentrantWrite { node: NodeId },
}

/// User input rejected before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a focus session needs a task to focus on")]
    EmptyTask,
    #[error("unsupported language {0:?}")]
    UnsupportedLanguage(String),
    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
    #[error(transparent)]
    UnknownFontSize(#[from] UnknownFontSize),
    #[error("unknown page {0:?}")]
    UnknownPage(String),
}

/// A session intent issued in a state that does not permit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("a focus session is already running")]
    AlreadyRunning,
    #[error("no focus session is running")]
    NotRunning,
    #[error("the task label is locked while a session is running")]
    LabelLocked,
}

/// Error returned by intent handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl From<ColorParseError> for FocusError {
    fn from(err: ColorParseError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<UnknownFontSize> for FocusError {
    fn from(err: UnknownFontSize) -> Self {
        Self::Validation(err.into())
    }
}
