//! Property-based tests for the resolution engine

use invero::context::{Context, ExpressionEvaluator, Scope, TemplateEvaluator, Value};
use invero::error::EvaluationError;
use invero::frame::Frame;
use invero::item::{Enchantment, ItemStack, NamespacedKey};
use invero::render::text::prefix_colored;
use invero::render::Renderer;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingEvaluator {
    calls: AtomicUsize,
}

impl ExpressionEvaluator for CountingEvaluator {
    fn evaluate(&self, input: &str, scope: &Scope) -> Result<Value, EvaluationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TemplateEvaluator::new().evaluate(input, scope)
    }
}

fn material(key: &str) -> ItemStack {
    ItemStack::new(NamespacedKey::minecraft(key).unwrap())
}

fn context_with(name: &str, value: &str) -> Context {
    let mut scope = Scope::for_viewer("Steve");
    scope.variables.insert(name.to_string(), value.to_string());
    Context::templated(scope)
}

/// A static amount is used as-is; neither the frame's nor the fallback's
/// expression is evaluated for it
#[test]
fn test_static_amount_never_evaluated() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<i32>(), "[a-z]{1,8}"), |(amount, variable)| {
            let evaluator = Arc::new(CountingEvaluator::default());
            let ctx = Context::new(evaluator.clone(), Scope::new());
            let frame = Frame::builder()
                .amount(format!("{{{{{}}}}}", variable))
                .static_amount(amount)
                .build();
            let fallback = Frame::builder()
                .amount(format!("{{{{{}_fallback}}}}", variable))
                .build();

            let alone = Renderer::default().generate_properties(material("stone"), &frame, &frame, &ctx);
            prop_assert_eq!(alone.amount, amount.max(0) as u32);
            let out = Renderer::default().generate_properties(material("stone"), &frame, &fallback, &ctx);
            prop_assert_eq!(out.amount, amount.max(0) as u32);
            prop_assert_eq!(evaluator.calls.load(Ordering::SeqCst), 0);
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// Any integer amount renders non-negative and equal to the clamped value
    #[test]
    fn prop_amount_clamped(amount in any::<i32>()) {
        let frame = Frame::builder().amount("{{n}}").build();
        let ctx = context_with("n", &amount.to_string());
        let out = Renderer::default().generate_properties(material("stone"), &frame, &frame, &ctx);
        prop_assert_eq!(out.amount, amount.max(0) as u32);
    }

    /// Colouring twice is the same as colouring once
    #[test]
    fn prop_prefix_idempotent(text in "\\PC{0,24}") {
        let once = prefix_colored(&text);
        prop_assert_eq!(prefix_colored(&once), once.clone());
        if !text.trim().is_empty() {
            prop_assert!(once.starts_with('§'));
        }
    }

    /// Turning glow off removes the marker from both enchantment maps
    #[test]
    fn prop_glow_off_clears_marker(book in any::<bool>(), direct in any::<bool>(), stored in any::<bool>()) {
        let mut base = material(if book { "enchanted_book" } else { "stone" });
        if direct {
            base.enchants.insert(Enchantment::GLOW_MARKER, 1);
        }
        if stored {
            base.stored_enchants.insert(Enchantment::GLOW_MARKER, 1);
        }
        base.enchants.insert(Enchantment::Sharpness, 2);

        let frame = Frame::builder().glow("false").build();
        let out = Renderer::default().generate_properties(base, &frame, &frame, &context_with("x", "y"));
        prop_assert!(!out.enchants.contains_key(&Enchantment::GLOW_MARKER));
        prop_assert!(!out.stored_enchants.contains_key(&Enchantment::GLOW_MARKER));
        prop_assert_eq!(out.enchants.get(&Enchantment::Sharpness), Some(&2));
    }

    /// Rendering the same frame twice with the same context gives the same item
    #[test]
    fn prop_render_deterministic(name in "[A-Za-z ]{0,16}", count in 0i32..64) {
        let frame = Frame::builder().name(name.clone()).amount("{{count}}").build();
        let ctx = context_with("count", &count.to_string());
        let renderer = Renderer::default();
        let a = renderer.generate_properties(material("paper"), &frame, &frame, &ctx);
        let b = renderer.generate_properties(material("paper"), &frame, &frame, &ctx);
        prop_assert_eq!(a, b);
    }
}
