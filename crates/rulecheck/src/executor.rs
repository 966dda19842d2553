//! Single-trial execution
//!
//! The executor drives one trial: build the initial state, repeatedly select
//! an applicable rule, sample its arguments, apply it, and check every
//! invariant. A trial ends `Failed` on the first invariant violation
//! (capturing the full trace) or `Passed` once the step budget is consumed.
//!
//! The same machinery replays recorded traces; the shrinker and the runner's
//! counterexample verification both go through [`Executor::replay`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use rulecheck_core::{EngineError, EngineResult, Step, Trace};

use crate::model::{first_failure, Invariant, Model};
use crate::registry::RuleRegistry;

/// Outcome of one live trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// The step budget was consumed with every invariant holding
    Passed {
        /// Steps actually applied (skipped no-op steps excluded)
        steps: usize,
    },
    /// An invariant failed; the trace reproduces the failure from the
    /// initial state
    Failed {
        trace: Trace,
        invariant: String,
        reason: String,
    },
}

/// Outcome of replaying a recorded trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The whole trace replayed without any invariant failing
    Passed,
    /// An invariant failed during replay
    Failed { invariant: String, reason: String },
}

impl ReplayOutcome {
    /// Check whether replay failed with the given invariant
    #[must_use]
    pub fn fails_with(&self, invariant: &str) -> bool {
        matches!(self, ReplayOutcome::Failed { invariant: name, .. } if name == invariant)
    }
}

/// Drives trials and replays against one model and one registry
///
/// The executor borrows the registry and model; each trial owns its state
/// exclusively, so a single executor can run any number of trials.
pub struct Executor<'a, M: Model> {
    registry: &'a RuleRegistry<M::State>,
    model: &'a M,
    invariants: Vec<Invariant<M::State>>,
}

impl<'a, M: Model> Executor<'a, M> {
    /// Create an executor for a model and its rule registry
    pub fn new(registry: &'a RuleRegistry<M::State>, model: &'a M) -> Self {
        let invariants = model.invariants();
        Self {
            registry,
            model,
            invariants,
        }
    }

    /// Run one trial from a fresh initial state
    ///
    /// Deterministic: the same seed against the same registry and model
    /// produces the same trace and outcome. Iterations where no rule is
    /// applicable consume a step as a no-op. Invariants are checked once
    /// against the initial state before any rule fires, so a step budget of
    /// zero still performs that one check.
    pub fn run_trial(&self, seed: u64, max_steps: usize) -> TrialOutcome {
        let mut state = self.model.initial_state();
        let mut trace = Trace::new();

        if let Some((invariant, reason)) = first_failure(&self.invariants, &state) {
            debug!(invariant = %invariant, "invariant violated by initial state");
            return TrialOutcome::Failed {
                trace,
                invariant,
                reason,
            };
        }

        let mut rng = StdRng::seed_from_u64(seed);
        for step_index in 0..max_steps {
            let Some(rule) = self.registry.select(&mut rng, &state) else {
                trace!(step_index, "no applicable rule, skipping step");
                continue;
            };
            let step = Step::new(rule.name(), rule.sample_args(&mut rng));
            rule.apply(&mut state, &step.args);
            trace!(step_index, state = ?state, "applied {step}");
            trace.push(step);

            if let Some((invariant, reason)) = first_failure(&self.invariants, &state) {
                debug!(seed, invariant = %invariant, steps = trace.len(), "trial failed");
                return TrialOutcome::Failed {
                    trace,
                    invariant,
                    reason,
                };
            }
        }

        TrialOutcome::Passed { steps: trace.len() }
    }

    /// Re-execute a recorded trace from a fresh initial state
    ///
    /// Steps whose precondition no longer holds (possible once the shrinker
    /// has removed earlier steps) are skipped as no-ops, mirroring live
    /// execution. A step naming an unregistered rule, or carrying the wrong
    /// number of arguments, is a hard error.
    pub fn replay(&self, trace: &Trace) -> EngineResult<ReplayOutcome> {
        let mut state = self.model.initial_state();

        if let Some((invariant, reason)) = first_failure(&self.invariants, &state) {
            return Ok(ReplayOutcome::Failed { invariant, reason });
        }

        for step in trace.steps() {
            let rule = self
                .registry
                .get(&step.rule)
                .ok_or_else(|| EngineError::UnknownRule(step.rule.clone()))?;
            if step.args.len() != rule.params().len() {
                return Err(EngineError::ArityMismatch {
                    rule: step.rule.clone(),
                    expected: rule.params().len(),
                    actual: step.args.len(),
                });
            }
            if !rule.applicable(&state) {
                continue;
            }
            rule.apply(&mut state, &step.args);

            if let Some((invariant, reason)) = first_failure(&self.invariants, &state) {
                return Ok(ReplayOutcome::Failed { invariant, reason });
            }
        }

        Ok(ReplayOutcome::Passed)
    }

    pub(crate) fn registry(&self) -> &RuleRegistry<M::State> {
        self.registry
    }
}
