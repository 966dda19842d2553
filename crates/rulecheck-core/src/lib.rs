//! Core types for the rulecheck stateful property-testing engine
//!
//! This crate holds the vocabulary shared by the engine and its callers:
//!
//! - [`ArgValue`]: concrete argument values for rule applications
//! - [`Shape`]: bounded argument domains with sampling and a simplification
//!   ordering
//! - [`Step`] / [`Trace`]: recorded rule applications, the unit of shrinking
//! - [`EngineConfig`]: trial, step, seed, and shrink budgets
//! - [`EngineError`]: setup and replay failures
//!
//! The engine itself lives in the `rulecheck` crate.

pub mod config;
pub mod error;
pub mod shape;
pub mod step;
pub mod value;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use shape::{Shape, ShapeError};
pub use step::{Step, Trace};
pub use value::ArgValue;
