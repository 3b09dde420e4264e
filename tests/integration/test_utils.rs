//! Shared fixtures for integration tests

use invero::context::{Context, ExpressionEvaluator, Scope, TemplateEvaluator, Value};
use invero::error::EvaluationError;
use invero::item::{ItemStack, NamespacedKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Template evaluator that counts how often it is asked to evaluate
#[derive(Default)]
pub struct CountingEvaluator {
    calls: AtomicUsize,
}

impl CountingEvaluator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExpressionEvaluator for CountingEvaluator {
    fn evaluate(&self, input: &str, scope: &Scope) -> Result<Value, EvaluationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TemplateEvaluator::new().evaluate(input, scope)
    }

    fn is_constant(&self, input: &str) -> bool {
        TemplateEvaluator::new().is_constant(input)
    }
}

pub fn item(material: &str) -> ItemStack {
    ItemStack::new(NamespacedKey::minecraft(material).unwrap())
}

/// Context for viewer "Steve" with the given variables
pub fn viewer_context(variables: &[(&str, &str)]) -> Context {
    let mut scope = Scope::for_viewer("Steve");
    for (k, v) in variables {
        scope.variables.insert(k.to_string(), v.to_string());
    }
    Context::templated(scope)
}

pub fn counting_context(evaluator: &Arc<CountingEvaluator>) -> Context {
    Context::new(evaluator.clone(), Scope::for_viewer("Steve"))
}
