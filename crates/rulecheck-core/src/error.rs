//! Error types for the rulecheck engine
//!
//! Only setup and replay mistakes are errors. A rule being inapplicable in
//! the current state, or an invariant being violated, are ordinary engine
//! outcomes and never surface here.

use thiserror::Error;

use crate::shape::ShapeError;

/// Errors that can occur during engine setup or trace replay
#[derive(Debug, Error)]
pub enum EngineError {
    /// A rule was registered with a parameter shape containing no values
    #[error("rule '{rule}', parameter '{param}': {source}")]
    InvalidShape {
        rule: String,
        param: String,
        #[source]
        source: ShapeError,
    },

    /// Two rules were registered under the same name
    #[error("rule '{0}' is already registered")]
    DuplicateRule(String),

    /// A run was started with an empty registry
    #[error("no rules registered")]
    NoRules,

    /// A replayed trace references a rule missing from the registry
    #[error("trace references unknown rule '{0}'")]
    UnknownRule(String),

    /// A replayed step carries the wrong number of arguments for its rule
    #[error("step '{rule}' carries {actual} arguments, rule expects {expected}")]
    ArityMismatch {
        rule: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
