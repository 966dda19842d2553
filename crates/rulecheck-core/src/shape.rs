//! Argument shapes: bounded domains that rules draw their arguments from
//!
//! A `Shape` declares the finite domain of one rule parameter. Shapes do three
//! jobs:
//!
//! - **Validation**: every shape must contain at least one value. An empty
//!   range or enumeration is rejected at registration time, never during a
//!   run.
//! - **Sampling**: `sample` draws a uniform value from a caller-owned RNG, so
//!   the whole generation process is deterministic given a seed.
//! - **Simplification ordering**: `simpler_candidates` enumerates strictly
//!   simpler replacements for a value (toward the range minimum, `true` to
//!   `false`, later enumeration entries toward earlier ones). The shrinker
//!   walks this ordering when minimizing a failing trace.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::ArgValue;

/// Error for a shape that contains no values
///
/// Surfaced at rule registration, wrapped in
/// [`EngineError::InvalidShape`](crate::error::EngineError::InvalidShape).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Integer range with min > max
    #[error("integer range {min}..={max} contains no values")]
    EmptyIntRange { min: i64, max: i64 },

    /// Enumeration with no entries
    #[error("enumeration contains no values")]
    EmptyEnumeration,
}

/// The domain of a single rule parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Boolean domain
    Boolean,
    /// Inclusive integer range
    IntRange { min: i64, max: i64 },
    /// Enumeration of specific values, listed simplest-first
    Enumeration(Vec<ArgValue>),
}

impl Shape {
    /// Inclusive integer range shape
    #[must_use]
    pub fn int_range(min: i64, max: i64) -> Self {
        Shape::IntRange { min, max }
    }

    /// Check that the shape contains at least one value
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Shape::Boolean => Ok(()),
            Shape::IntRange { min, max } => {
                if min > max {
                    Err(ShapeError::EmptyIntRange {
                        min: *min,
                        max: *max,
                    })
                } else {
                    Ok(())
                }
            }
            Shape::Enumeration(values) => {
                if values.is_empty() {
                    Err(ShapeError::EmptyEnumeration)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Draw a uniform value from this shape
    ///
    /// Deterministic given the RNG state. Assumes the shape has been
    /// validated; sampling a validated shape always succeeds.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ArgValue {
        match self {
            Shape::Boolean => ArgValue::Bool(rng.gen_bool(0.5)),
            Shape::IntRange { min, max } => ArgValue::Int(rng.gen_range(*min..=*max)),
            Shape::Enumeration(values) => values[rng.gen_range(0..values.len())].clone(),
        }
    }

    /// Enumerate strictly simpler replacements for `value`, simplest first
    ///
    /// Returns an empty list when `value` is already the simplest value of
    /// the shape (or does not belong to it).
    #[must_use]
    pub fn simpler_candidates(&self, value: &ArgValue) -> Vec<ArgValue> {
        match (self, value) {
            (Shape::Boolean, ArgValue::Bool(true)) => vec![ArgValue::Bool(false)],
            (Shape::Boolean, ArgValue::Bool(false)) => Vec::new(),
            (Shape::IntRange { min, max }, ArgValue::Int(v)) => {
                if v <= min || v > max {
                    return Vec::new();
                }
                // Jump to the minimum, then halfway, then one step down.
                let mut candidates = vec![*min];
                let mid = min + (v - min) / 2;
                if !candidates.contains(&mid) {
                    candidates.push(mid);
                }
                if !candidates.contains(&(v - 1)) {
                    candidates.push(v - 1);
                }
                candidates.into_iter().map(ArgValue::Int).collect()
            }
            (Shape::Enumeration(values), v) => {
                let Some(pos) = values.iter().position(|entry| entry == v) else {
                    return Vec::new();
                };
                values[..pos].to_vec()
            }
            _ => Vec::new(),
        }
    }
}
