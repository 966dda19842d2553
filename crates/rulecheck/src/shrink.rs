//! Trace minimization
//!
//! Given a failing trace, the shrinker searches for a shorter or simpler
//! trace that still fails with the same invariant. Three reduction moves are
//! tried in a fixed order, restarting from the first move whenever a
//! candidate is accepted, until a full pass accepts nothing (a fixed point):
//!
//! 1. **delete-step** — remove one step, scanning left to right
//! 2. **shrink-args** — replace one argument with a simpler value, per the
//!    shape's simplification ordering
//! 3. **delete-range** — remove a contiguous block of steps, longest block
//!    first
//!
//! Every candidate is verified by full replay from the initial state and
//! accepted only if it fails with the same invariant, so ties between
//! equal-length candidates resolve to whichever the move order reaches
//! first. The search is bounded by a replay budget; when it runs out the
//! best trace found so far is returned with `minimal` unset.

use tracing::debug;

use rulecheck_core::{EngineError, EngineResult, Trace};

use crate::executor::Executor;
use crate::model::Model;

/// Result of shrinking a failing trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkOutcome {
    /// The smallest reproducing trace found
    pub trace: Trace,
    /// Replays spent during the search
    pub attempts: usize,
    /// Whether a fixed point was reached; `false` means the budget ran out
    /// and the trace is the best found so far, not necessarily minimal
    pub minimal: bool,
}

/// Minimizes failing traces by replay-verified reduction moves
pub struct Shrinker<'e, 'a, M: Model> {
    executor: &'e Executor<'a, M>,
    budget: usize,
}

impl<'e, 'a, M: Model> Shrinker<'e, 'a, M> {
    /// Create a shrinker with the given replay budget
    pub fn new(executor: &'e Executor<'a, M>, budget: usize) -> Self {
        Self { executor, budget }
    }

    /// Reduce `trace` while it still fails with `invariant`
    ///
    /// The input trace is assumed to reproduce the failure; the output trace
    /// is never longer than the input and always reproduces the same
    /// invariant failure.
    pub fn shrink(&self, trace: Trace, invariant: &str) -> EngineResult<ShrinkOutcome> {
        let mut current = trace;
        let mut attempts = 0usize;

        'search: loop {
            // Move 1: delete single steps, left to right.
            for index in 0..current.len() {
                if attempts == self.budget {
                    return Ok(self.exhausted(current, attempts));
                }
                attempts += 1;
                let candidate = current.without_step(index);
                if self.reproduces(&candidate, invariant)? {
                    debug!(steps = candidate.len(), "delete-step accepted");
                    current = candidate;
                    continue 'search;
                }
            }

            // Move 2: simplify arguments in place.
            for step_index in 0..current.len() {
                let step = current.steps()[step_index].clone();
                let rule = self
                    .executor
                    .registry()
                    .get(&step.rule)
                    .ok_or_else(|| EngineError::UnknownRule(step.rule.clone()))?;
                for (arg_index, (_, shape)) in rule.params().iter().enumerate() {
                    for value in shape.simpler_candidates(&step.args[arg_index]) {
                        if attempts == self.budget {
                            return Ok(self.exhausted(current, attempts));
                        }
                        attempts += 1;
                        let candidate = current.with_arg(step_index, arg_index, value);
                        if self.reproduces(&candidate, invariant)? {
                            debug!(step = step_index, arg = arg_index, "shrink-args accepted");
                            current = candidate;
                            continue 'search;
                        }
                    }
                }
            }

            // Move 3: delete contiguous blocks, longest first. Single-step
            // blocks are move 1's job; the full trace never reproduces from
            // an initial state that passed its own check.
            let len = current.len();
            for size in (2..len).rev() {
                for start in 0..=(len - size) {
                    if attempts == self.budget {
                        return Ok(self.exhausted(current, attempts));
                    }
                    attempts += 1;
                    let candidate = current.without_range(start, size);
                    if self.reproduces(&candidate, invariant)? {
                        debug!(steps = candidate.len(), "delete-range accepted");
                        current = candidate;
                        continue 'search;
                    }
                }
            }

            // A full pass accepted nothing.
            break 'search;
        }

        debug!(steps = current.len(), attempts, "shrink reached fixed point");
        Ok(ShrinkOutcome {
            trace: current,
            attempts,
            minimal: true,
        })
    }

    fn reproduces(&self, candidate: &Trace, invariant: &str) -> EngineResult<bool> {
        Ok(self.executor.replay(candidate)?.fails_with(invariant))
    }

    fn exhausted(&self, trace: Trace, attempts: usize) -> ShrinkOutcome {
        debug!(steps = trace.len(), attempts, "shrink budget exhausted");
        ShrinkOutcome {
            trace,
            attempts,
            minimal: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Invariant, InvariantResult, Model};
    use crate::registry::{RuleDef, RuleRegistry};
    use rulecheck_core::{ArgValue, Shape, Step};

    /// Accumulator that fails once the running total reaches 10.
    struct Accumulator;

    impl Model for Accumulator {
        type State = i64;

        fn initial_state(&self) -> i64 {
            0
        }

        fn invariants(&self) -> Vec<Invariant<i64>> {
            vec![Invariant::new("below_ten", |state: &i64| {
                if *state >= 10 {
                    InvariantResult::Fail(format!("total reached {state}"))
                } else {
                    InvariantResult::Pass
                }
            })]
        }
    }

    fn registry() -> RuleRegistry<i64> {
        let mut registry = RuleRegistry::new();
        registry
            .register(
                RuleDef::new("add", |state: &mut i64, args: &[ArgValue]| {
                    *state += args[0].as_int().unwrap();
                })
                .with_param("amount", Shape::int_range(0, 10)),
            )
            .unwrap();
        registry
    }

    fn add(amount: i64) -> Step {
        Step::new("add", vec![ArgValue::Int(amount)])
    }

    #[test]
    fn test_shrink_drops_redundant_steps() {
        let registry = registry();
        let executor = Executor::new(&registry, &Accumulator);
        let shrinker = Shrinker::new(&executor, 1000);

        // add(10) alone already fails; everything else is noise.
        let trace = Trace::from(vec![add(1), add(2), add(10), add(3)]);
        let outcome = shrinker.shrink(trace, "below_ten").unwrap();
        assert!(outcome.minimal);
        assert_eq!(outcome.trace, Trace::from(vec![add(10)]));
    }

    #[test]
    fn test_shrink_simplifies_arguments() {
        let registry = registry();
        let executor = Executor::new(&registry, &Accumulator);
        let shrinker = Shrinker::new(&executor, 1000);

        // Two steps are needed, but 7 + 8 overshoots: 7 shrinks until the
        // pair sums to exactly 10.
        let trace = Trace::from(vec![add(7), add(8)]);
        let outcome = shrinker.shrink(trace, "below_ten").unwrap();
        assert!(outcome.minimal);
        assert_eq!(outcome.trace.len(), 2);
        let total: i64 = outcome
            .trace
            .steps()
            .iter()
            .map(|s| s.args[0].as_int().unwrap())
            .sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_shrink_never_grows_the_trace() {
        let registry = registry();
        let executor = Executor::new(&registry, &Accumulator);
        let shrinker = Shrinker::new(&executor, 1000);

        let trace = Trace::from(vec![add(5), add(5), add(5), add(5)]);
        let original_len = trace.len();
        let outcome = shrinker.shrink(trace, "below_ten").unwrap();
        assert!(outcome.trace.len() <= original_len);
        assert!(executor
            .replay(&outcome.trace)
            .unwrap()
            .fails_with("below_ten"));
    }

    #[test]
    fn test_shrink_budget_exhaustion_is_flagged() {
        let registry = registry();
        let executor = Executor::new(&registry, &Accumulator);
        let shrinker = Shrinker::new(&executor, 2);

        let trace = Trace::from(vec![add(1), add(2), add(3), add(10)]);
        let outcome = shrinker.shrink(trace.clone(), "below_ten").unwrap();
        assert!(!outcome.minimal);
        assert_eq!(outcome.attempts, 2);
        // Whatever was found still reproduces (or is the unshrunken input).
        assert!(executor
            .replay(&outcome.trace)
            .unwrap()
            .fails_with("below_ten"));
    }

    #[test]
    fn test_long_noise_runs_collapse_to_a_single_step() {
        let registry = registry();
        let executor = Executor::new(&registry, &Accumulator);
        let shrinker = Shrinker::new(&executor, 10_000);

        let mut steps: Vec<Step> = (0..30).map(|_| add(0)).collect();
        steps.push(add(10));
        let outcome = shrinker.shrink(Trace::from(steps), "below_ten").unwrap();
        assert!(outcome.minimal);
        assert_eq!(outcome.trace, Trace::from(vec![add(10)]));
    }
}
