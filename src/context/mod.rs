//! Render Context
//!
//! Per-render evaluation environment. A [`Context`] binds an expression
//! evaluator to the scope of one viewer/session; the render engine borrows it
//! and never keeps it.

pub mod evaluator;
pub mod value;

pub use evaluator::{ExpressionEvaluator, Scope, TemplateEvaluator};
pub use value::Value;

use crate::error::EvaluationError;
use std::fmt;
use std::sync::Arc;

/// Expression evaluator bound to a scope
#[derive(Clone)]
pub struct Context {
    evaluator: Arc<dyn ExpressionEvaluator>,
    scope: Scope,
}

impl Context {
    pub fn new(evaluator: Arc<dyn ExpressionEvaluator>, scope: Scope) -> Self {
        Self { evaluator, scope }
    }

    /// Context over the built-in `{{name}}` evaluator
    pub fn templated(scope: Scope) -> Self {
        Self::new(Arc::new(TemplateEvaluator::new()), scope)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn evaluator(&self) -> &dyn ExpressionEvaluator {
        self.evaluator.as_ref()
    }

    /// Copy of this context with one more variable bound
    pub fn with_variable(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut scope = self.scope.clone();
        scope.variables.insert(name.into(), value.into());
        Self {
            evaluator: Arc::clone(&self.evaluator),
            scope,
        }
    }

    pub fn parse(&self, input: &str) -> Result<Value, EvaluationError> {
        self.evaluator.evaluate(input, &self.scope)
    }

    /// Evaluate as display text, keeping the result exactly as produced.
    pub fn parse_text(&self, input: &str) -> Result<String, EvaluationError> {
        self.evaluator.evaluate_text(input, &self.scope)
    }

    /// Evaluate each line independently, preserving order.
    pub fn parse_lines(&self, lines: &[String]) -> Result<Vec<String>, EvaluationError> {
        lines.iter().map(|line| self.parse_text(line)).collect()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("scope", &self.scope).finish()
    }
}
