//! Recorded rule applications
//!
//! A `Step` is one rule application with its concrete arguments; a `Trace` is
//! the ordered, append-only list of steps recorded during a trial. The trace
//! is the unit the shrinker minimizes and the artifact a counterexample
//! carries, so both types serialize cleanly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::ArgValue;

/// A single recorded rule application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Name of the applied rule
    pub rule: String,
    /// Concrete arguments the rule was applied with
    pub args: Vec<ArgValue>,
}

impl Step {
    /// Create a new step
    #[must_use]
    pub fn new(rule: impl Into<String>, args: Vec<ArgValue>) -> Self {
        Self {
            rule: rule.into(),
            args,
        }
    }

    /// Render the step as `rule(arg, ...)`
    #[must_use]
    pub fn signature(&self) -> String {
        if self.args.is_empty() {
            self.rule.clone()
        } else {
            let args: Vec<_> = self.args.iter().map(ArgValue::canonical_string).collect();
            format!("{}({})", self.rule, args.join(", "))
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}

/// An ordered sequence of steps recorded during one trial
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Create an empty trace
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Number of recorded steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if no steps were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The recorded steps, in application order
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Copy of this trace with the step at `index` removed
    #[must_use]
    pub fn without_step(&self, index: usize) -> Trace {
        let mut steps = self.steps.clone();
        steps.remove(index);
        Trace { steps }
    }

    /// Copy of this trace with the steps in `start..start + len` removed
    #[must_use]
    pub fn without_range(&self, start: usize, len: usize) -> Trace {
        let mut steps = self.steps.clone();
        steps.drain(start..start + len);
        Trace { steps }
    }

    /// Copy of this trace with one argument of one step replaced
    #[must_use]
    pub fn with_arg(&self, step_index: usize, arg_index: usize, value: ArgValue) -> Trace {
        let mut steps = self.steps.clone();
        steps[step_index].args[arg_index] = value;
        Trace { steps }
    }
}

impl From<Vec<Step>> for Trace {
    fn from(steps: Vec<Step>) -> Self {
        Trace { steps }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {}. {step}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(rule: &str, args: &[i64]) -> Step {
        Step::new(rule, args.iter().map(|&a| ArgValue::Int(a)).collect())
    }

    #[test]
    fn test_signature_formats_args() {
        assert_eq!(step("move", &[0, 2]).signature(), "move(0, 2)");
        assert_eq!(Step::new("reset", Vec::new()).signature(), "reset");
    }

    #[test]
    fn test_without_step() {
        let trace = Trace::from(vec![step("a", &[1]), step("b", &[2]), step("c", &[3])]);
        let smaller = trace.without_step(1);
        assert_eq!(smaller.len(), 2);
        assert_eq!(smaller.steps()[0].rule, "a");
        assert_eq!(smaller.steps()[1].rule, "c");
        // original untouched
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn test_without_range() {
        let trace = Trace::from(vec![
            step("a", &[]),
            step("b", &[]),
            step("c", &[]),
            step("d", &[]),
        ]);
        let smaller = trace.without_range(1, 2);
        let names: Vec<_> = smaller.steps().iter().map(|s| s.rule.as_str()).collect();
        assert_eq!(names, vec!["a", "d"]);
    }

    #[test]
    fn test_with_arg_replaces_single_value() {
        let trace = Trace::from(vec![step("move", &[2, 1])]);
        let simpler = trace.with_arg(0, 0, ArgValue::Int(0));
        assert_eq!(simpler.steps()[0].args, vec![ArgValue::Int(0), ArgValue::Int(1)]);
        assert_eq!(trace.steps()[0].args[0], ArgValue::Int(2));
    }

    #[test]
    fn test_serde_roundtrip() {
        let trace = Trace::from(vec![step("move", &[0, 2]), step("move", &[1, 2])]);
        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, back);
    }
}
