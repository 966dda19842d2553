//! Rule definitions and the rule registry
//!
//! A [`RuleDef`] is a closed description of one state-mutating action: a
//! name, the shapes its arguments are drawn from, an optional precondition
//! over the current state, and the transition body. Rules are registered
//! once at setup into a [`RuleRegistry`], which is read-only for the rest of
//! the run; trials only select from it and look rules up by name.

use indexmap::IndexMap;
use rand::Rng;

use rulecheck_core::{ArgValue, EngineError, EngineResult, Shape};

/// A single state-mutating rule
///
/// The transition body must be total over well-typed arguments: for any
/// argument vector drawn from the declared shapes it must leave the state in
/// a valid configuration, falling back to a no-op where the arguments are
/// meaningless in the current state (e.g. taking from an empty container).
pub struct RuleDef<S> {
    name: String,
    params: Vec<(String, Shape)>,
    precondition: Option<Box<dyn Fn(&S) -> bool>>,
    body: Box<dyn Fn(&mut S, &[ArgValue])>,
}

impl<S> RuleDef<S> {
    /// Create a rule from a name and transition body
    pub fn new(name: impl Into<String>, body: impl Fn(&mut S, &[ArgValue]) + 'static) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            precondition: None,
            body: Box::new(body),
        }
    }

    /// Declare a named parameter with its shape
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.params.push((name.into(), shape));
        self
    }

    /// Guard the rule on a predicate over the current state
    ///
    /// A rule whose precondition does not hold is never selected; if no
    /// rule's precondition holds the executor records a skipped step.
    #[must_use]
    pub fn with_precondition(mut self, precondition: impl Fn(&S) -> bool + 'static) -> Self {
        self.precondition = Some(Box::new(precondition));
        self
    }

    /// The rule's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters, in argument order
    #[must_use]
    pub fn params(&self) -> &[(String, Shape)] {
        &self.params
    }

    /// Check whether the precondition (if any) holds for `state`
    pub fn applicable(&self, state: &S) -> bool {
        self.precondition.as_ref().map_or(true, |pre| pre(state))
    }

    /// Draw one argument per parameter from the given RNG
    pub fn sample_args<R: Rng>(&self, rng: &mut R) -> Vec<ArgValue> {
        self.params
            .iter()
            .map(|(_, shape)| shape.sample(rng))
            .collect()
    }

    /// Apply the transition body to `state`
    pub fn apply(&self, state: &mut S, args: &[ArgValue]) {
        (self.body)(state, args);
    }
}

impl<S> std::fmt::Debug for RuleDef<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("guarded", &self.precondition.is_some())
            .finish()
    }
}

/// The set of rules available to the engine
///
/// Built once at setup; read-only afterwards. Registration order is
/// preserved and determines nothing beyond iteration order in diagnostics;
/// selection is uniform over the applicable subset.
#[derive(Debug)]
pub struct RuleRegistry<S> {
    rules: IndexMap<String, RuleDef<S>>,
}

impl<S> Default for RuleRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RuleRegistry<S> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Register a rule, validating its parameter shapes
    ///
    /// Empty shapes and duplicate names are rejected here, at setup time,
    /// so generation during a run can never fail.
    pub fn register(&mut self, rule: RuleDef<S>) -> EngineResult<()> {
        for (param, shape) in rule.params() {
            shape.validate().map_err(|source| EngineError::InvalidShape {
                rule: rule.name().to_string(),
                param: param.clone(),
                source,
            })?;
        }
        if self.rules.contains_key(rule.name()) {
            return Err(EngineError::DuplicateRule(rule.name().to_string()));
        }
        self.rules.insert(rule.name().to_string(), rule);
        Ok(())
    }

    /// Select uniformly among rules whose precondition holds for `state`
    ///
    /// Returns `None` when no rule is applicable; the executor treats that
    /// as a skipped no-op step, not a failure.
    pub fn select<R: Rng>(&self, rng: &mut R, state: &S) -> Option<&RuleDef<S>> {
        let applicable: Vec<&RuleDef<S>> = self
            .rules
            .values()
            .filter(|rule| rule.applicable(state))
            .collect();
        if applicable.is_empty() {
            return None;
        }
        Some(applicable[rng.gen_range(0..applicable.len())])
    }

    /// Look up a rule by name (used when replaying recorded traces)
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleDef<S>> {
        self.rules.get(name)
    }

    /// Number of registered rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered rule names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}
