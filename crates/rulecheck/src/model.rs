//! The model-adapter boundary
//!
//! The engine is generic over the system under test. A caller supplies a
//! [`Model`]: a factory for fresh states plus the invariants that must hold
//! after every applied rule. Rule transition bodies live in the
//! [`RuleRegistry`](crate::registry::RuleRegistry), built separately so the
//! same registry can drive many trials.

use std::fmt;

/// Outcome of checking one invariant against one state
///
/// `Inapplicable` is a local discard: the invariant has nothing to say about
/// this state. It is excluded from the verdict without suppressing the other
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantResult {
    /// The invariant holds
    Pass,
    /// The invariant does not apply to this state
    Inapplicable,
    /// The invariant is violated; the reason is reported to the caller
    Fail(String),
}

/// A named, pure predicate over model states
///
/// Checks must not mutate state and are run after every applied step, so
/// they should be cheap.
pub struct Invariant<S> {
    name: String,
    check: Box<dyn Fn(&S) -> InvariantResult>,
}

impl<S> Invariant<S> {
    /// Create a named invariant from a check function
    pub fn new(name: impl Into<String>, check: impl Fn(&S) -> InvariantResult + 'static) -> Self {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    /// The invariant's name, as reported in counterexamples
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check against a state
    pub fn check(&self, state: &S) -> InvariantResult {
        (self.check)(state)
    }
}

impl<S> fmt::Debug for Invariant<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invariant").field("name", &self.name).finish()
    }
}

/// The system under test, as seen by the engine
///
/// One trial owns one `State` exclusively: the engine builds it via
/// [`initial_state`](Model::initial_state), mutates it only through
/// registered rule bodies, and discards it when the trial ends.
pub trait Model {
    /// The mutable state a trial runs against
    type State: fmt::Debug;

    /// Build a fresh state for the start of a trial
    fn initial_state(&self) -> Self::State;

    /// The invariants checked after every applied step (and once against the
    /// initial state)
    fn invariants(&self) -> Vec<Invariant<Self::State>>;
}

/// Run every invariant against `state`, returning the first failure
///
/// Checks run in registration order; `Inapplicable` results are skipped
/// without affecting the verdict.
pub(crate) fn first_failure<S>(invariants: &[Invariant<S>], state: &S) -> Option<(String, String)> {
    for invariant in invariants {
        match invariant.check(state) {
            InvariantResult::Pass | InvariantResult::Inapplicable => {}
            InvariantResult::Fail(reason) => {
                return Some((invariant.name().to_string(), reason));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_reports_name_and_reason() {
        let inv = Invariant::new("never_negative", |state: &i64| {
            if *state < 0 {
                InvariantResult::Fail(format!("state is {state}"))
            } else {
                InvariantResult::Pass
            }
        });
        assert_eq!(inv.name(), "never_negative");
        assert_eq!(inv.check(&1), InvariantResult::Pass);
        assert_eq!(
            inv.check(&-2),
            InvariantResult::Fail("state is -2".to_string())
        );
    }

    #[test]
    fn test_inapplicable_does_not_suppress_later_failure() {
        let invariants = vec![
            Invariant::new("only_even", |state: &i64| {
                if state % 2 != 0 {
                    InvariantResult::Inapplicable
                } else {
                    InvariantResult::Pass
                }
            }),
            Invariant::new("small", |state: &i64| {
                if *state > 10 {
                    InvariantResult::Fail("too big".to_string())
                } else {
                    InvariantResult::Pass
                }
            }),
        ];
        let failure = first_failure(&invariants, &11);
        assert_eq!(
            failure,
            Some(("small".to_string(), "too big".to_string()))
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let invariants = vec![
            Invariant::new("a", |_: &i64| InvariantResult::Fail("a failed".into())),
            Invariant::new("b", |_: &i64| InvariantResult::Fail("b failed".into())),
        ];
        let (name, _) = first_failure(&invariants, &0).unwrap();
        assert_eq!(name, "a");
    }
}
