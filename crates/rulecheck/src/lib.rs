//! Rule-based stateful property testing
//!
//! `rulecheck` generates random sequences of state-mutating rules against a
//! caller-supplied model, checks declared invariants after every applied
//! rule, and on the first violation shrinks the failing sequence to a
//! locally-minimal reproducing trace.
//!
//! # Pieces
//!
//! - **[`Model`]**: the system under test — a fresh-state factory plus the
//!   invariants that must hold after every step
//! - **[`RuleRegistry`] / [`RuleDef`]**: the available actions, each with
//!   bounded argument shapes, an optional precondition, and a transition body
//! - **[`Runner`] / [`run`]**: trial orchestration, shrinking, reporting
//! - **[`RunReport`]**: pass, or a seed + minimal trace + failing invariant
//!
//! # Example
//!
//! ```rust
//! use rulecheck::{
//!     run, ArgValue, EngineConfig, Invariant, InvariantResult, Model, RuleDef, RuleRegistry,
//!     Shape,
//! };
//!
//! struct Counter;
//!
//! impl Model for Counter {
//!     type State = i64;
//!
//!     fn initial_state(&self) -> i64 {
//!         0
//!     }
//!
//!     fn invariants(&self) -> Vec<Invariant<i64>> {
//!         vec![Invariant::new("below_hundred", |state: &i64| {
//!             if *state >= 100 {
//!                 InvariantResult::Fail(format!("counter reached {state}"))
//!             } else {
//!                 InvariantResult::Pass
//!             }
//!         })]
//!     }
//! }
//!
//! let mut registry = RuleRegistry::new();
//! registry
//!     .register(
//!         RuleDef::new("add", |state: &mut i64, args: &[ArgValue]| {
//!             *state += args[0].as_int().unwrap();
//!         })
//!         .with_param("amount", Shape::int_range(0, 10)),
//!     )
//!     .unwrap();
//!
//! let config = EngineConfig::new().with_seed(42).with_max_examples(200);
//! let report = run(&registry, &Counter, &config).unwrap();
//!
//! // The counter reaches 100 eventually; the shrunken trace still does.
//! let counterexample = report.counterexample().expect("counter must overflow");
//! assert_eq!(counterexample.failing_invariant, "below_hundred");
//! ```
//!
//! # Determinism
//!
//! All randomness flows through seeds: the master seed derives one seed per
//! trial, and a reported counterexample carries both, so a failure replays
//! exactly. Nothing is shared between trials except the read-only registry
//! and invariant definitions.

pub mod executor;
pub mod model;
pub mod registry;
pub mod report;
pub mod runner;
pub mod shrink;

// Re-export the engine surface.
pub use executor::{Executor, ReplayOutcome, TrialOutcome};
pub use model::{Invariant, InvariantResult, Model};
pub use registry::{RuleDef, RuleRegistry};
pub use report::{Counterexample, RunReport};
pub use runner::{run, Runner};
pub use shrink::{ShrinkOutcome, Shrinker};

// Re-export the core vocabulary so callers need a single dependency.
pub use rulecheck_core::{
    ArgValue, EngineConfig, EngineError, EngineResult, Shape, ShapeError, Step, Trace,
};
