//! Run reports and counterexamples
//!
//! The engine's only outputs: either every trial passed, or a shrunken
//! counterexample. Reports serialize for host harnesses and render
//! human-readably via `Display`; formatting beyond that is the host's job.

use serde::{Deserialize, Serialize};
use std::fmt;

use rulecheck_core::Trace;

/// A reproducible invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterexample {
    /// Master seed of the run; re-running with it reproduces this failure
    pub seed: u64,
    /// Derived seed of the failing trial, for single-trial reproduction
    pub trial_seed: u64,
    /// Minimized trace; replaying it from the initial state reproduces the
    /// same invariant failure
    pub trace: Trace,
    /// Name of the violated invariant
    pub failing_invariant: String,
    /// Reason string the invariant reported
    pub reason: String,
    /// Replays the shrinker spent
    pub shrink_attempts: usize,
    /// Whether shrinking reached a fixed point; `false` means the shrink
    /// budget ran out and the trace may not be locally minimal
    pub minimal: bool,
}

impl fmt::Display for Counterexample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "invariant '{}' violated: {}",
            self.failing_invariant, self.reason
        )?;
        writeln!(f, "seed: {}", self.seed)?;
        let qualifier = if self.minimal { "minimal " } else { "" };
        writeln!(f, "{qualifier}trace ({} steps):", self.trace.len())?;
        write!(f, "{}", self.trace)
    }
}

/// Verdict of a whole engine run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunReport {
    /// Every trial passed
    Pass {
        /// Trials actually completed (may be fewer than configured when a
        /// wall-clock budget cut the run short)
        trials: usize,
    },
    /// An invariant was violated; the counterexample reproduces it
    Fail(Counterexample),
}

impl RunReport {
    /// Check if the run passed
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, RunReport::Pass { .. })
    }

    /// Check if the run found a violation
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, RunReport::Fail(_))
    }

    /// The counterexample, if the run failed
    #[must_use]
    pub fn counterexample(&self) -> Option<&Counterexample> {
        match self {
            RunReport::Pass { .. } => None,
            RunReport::Fail(counterexample) => Some(counterexample),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunReport::Pass { trials } => {
                write!(f, "ok: {trials} trials, no invariant violated")
            }
            RunReport::Fail(counterexample) => write!(f, "{counterexample}"),
        }
    }
}
