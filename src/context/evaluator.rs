//! Expression evaluation boundary and the built-in template evaluator.

use crate::context::value::Value;
use crate::error::EvaluationError;
use std::collections::BTreeMap;

/// Request-scoped environment an expression is evaluated in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    /// Name of the viewer the render is for, if any
    pub viewer: Option<String>,
    pub variables: BTreeMap<String, String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_viewer(viewer: impl Into<String>) -> Self {
        Self {
            viewer: Some(viewer.into()),
            variables: BTreeMap::new(),
        }
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|s| s.as_str())
    }
}

/// Evaluates raw template text into a value
///
/// Implemented by the host's scripting layer. Evaluators hold no per-render
/// state; everything request-specific arrives through the [`Scope`].
pub trait ExpressionEvaluator: Send + Sync {
    fn evaluate(&self, input: &str, scope: &Scope) -> Result<Value, EvaluationError>;

    /// Evaluate `input` as display text.
    ///
    /// Implementations that type their results should return the text as
    /// produced, without a round trip through [`Value`].
    fn evaluate_text(&self, input: &str, scope: &Scope) -> Result<String, EvaluationError> {
        self.evaluate(input, scope).map(|v| v.as_text())
    }

    /// Whether `input` evaluates to itself in every scope.
    ///
    /// Frame definitions use this to precompute static overrides.
    fn is_constant(&self, _input: &str) -> bool {
        false
    }
}

/// `{{name}}` substitution against scope variables
///
/// `{{viewer}}` resolves to the viewer name when no variable shadows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEvaluator;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

impl TemplateEvaluator {
    pub fn new() -> Self {
        TemplateEvaluator
    }

    fn substitute(&self, input: &str, scope: &Scope) -> Result<String, EvaluationError> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];
            let end = after.find(CLOSE).ok_or_else(|| EvaluationError::Malformed {
                input: input.to_string(),
                reason: "unterminated placeholder".to_string(),
            })?;
            let name = after[..end].trim();
            if name.is_empty() {
                return Err(EvaluationError::Malformed {
                    input: input.to_string(),
                    reason: "empty placeholder".to_string(),
                });
            }
            let value = match scope.variable(name) {
                Some(v) => v,
                None if name == "viewer" => scope
                    .viewer
                    .as_deref()
                    .ok_or_else(|| EvaluationError::UnknownVariable(name.to_string()))?,
                None => return Err(EvaluationError::UnknownVariable(name.to_string())),
            };
            out.push_str(value);
            rest = &after[end + CLOSE.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

impl ExpressionEvaluator for TemplateEvaluator {
    fn evaluate(&self, input: &str, scope: &Scope) -> Result<Value, EvaluationError> {
        let text = self.substitute(input, scope)?;
        Ok(Value::infer(&text))
    }

    fn evaluate_text(&self, input: &str, scope: &Scope) -> Result<String, EvaluationError> {
        self.substitute(input, scope)
    }

    fn is_constant(&self, input: &str) -> bool {
        !input.contains(OPEN)
    }
}
