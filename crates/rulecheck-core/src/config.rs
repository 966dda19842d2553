//! Engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an engine run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of independent trials to run
    pub max_examples: usize,

    /// Step budget per trial (skipped no-op steps count against it)
    pub max_steps: usize,

    /// Master seed; drawn from entropy when `None`
    pub seed: Option<u64>,

    /// Replay budget for the shrinker
    pub max_shrink_attempts: usize,

    /// Optional wall-clock budget for the whole run
    pub timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_examples: 100,
            max_steps: 50,
            seed: None,
            max_shrink_attempts: 1000,
            timeout: None,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of trials
    #[must_use]
    pub fn with_max_examples(mut self, max: usize) -> Self {
        self.max_examples = max;
        self
    }

    /// Set the per-trial step budget
    #[must_use]
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    /// Fix the master seed for a reproducible run
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the shrinker's replay budget
    #[must_use]
    pub fn with_max_shrink_attempts(mut self, max: usize) -> Self {
        self.max_shrink_attempts = max;
        self
    }

    /// Set a wall-clock budget for the run
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
