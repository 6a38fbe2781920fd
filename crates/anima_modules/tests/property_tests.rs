//! Property-based tests over the real module tables.
//!
//! Every module runs in pipeline order with the results of the modules
//! before it, the same way a brain pass feeds them.

use anima_core::{
    CognitiveModule, ConfiguredModule, InputContext, ModuleInput, ModuleOverrides, ModuleResult,
};
use anima_modules::MODULE_ORDER;
use chrono::Utc;
use proptest::prelude::*;
use serde_json::json;

fn all_modules(history_cap: Option<usize>) -> Vec<ConfiguredModule> {
    let overrides = ModuleOverrides {
        history_cap,
        ..ModuleOverrides::default()
    };
    MODULE_ORDER
        .iter()
        .map(|(_, factory)| {
            let config = factory().unwrap().with_overrides(&overrides).unwrap();
            ConfiguredModule::new(config)
        })
        .collect()
}

fn run_pass(modules: &mut [ConfiguredModule], text: &str, ctx: &InputContext) -> Vec<ModuleResult> {
    let now = Utc::now();
    let mut results = Vec::with_capacity(modules.len());
    for module in modules.iter_mut() {
        let result = {
            let input = ModuleInput::new(text, ctx, &results, now);
            module.process(&input)
        };
        results.push(result);
    }
    results
}

// ============================================================================
// Strategies
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("eu te amo mamãe".to_string()),
        Just("vamos brincar de pega-pega!!".to_string()),
        Just("tenho medo do escuro, não quero dormir".to_string()),
        Just("por que o céu é azul?".to_string()),
        Just("que dia triste, estou com raiva".to_string()),
        Just("tchau, vou embora".to_string()),
        Just("hahaha que engraçado kkkk".to_string()),
        ".{0,80}",
    ]
}

fn arb_context() -> impl Strategy<Value = InputContext> {
    (
        prop::option::of(prop_oneof![
            Just("mamãe".to_string()),
            Just("vovó".to_string()),
            Just("amigo".to_string()),
            Just("estranho".to_string()),
            Just("robô".to_string()),
        ]),
        prop::option::of(-1.0f32..2.0),
        any::<bool>(),
    )
        .prop_map(|(role, hint, asleep)| {
            let mut ctx = InputContext {
                role,
                emotional_intensity_hint: hint,
                ..InputContext::default()
            };
            if asleep {
                ctx = ctx.with_value("asleep", json!(true));
            }
            ctx
        })
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every signal of every module stays in [0, 1] across whole passes,
    /// and learning rates stay within their bounds.
    #[test]
    fn pipeline_signals_stay_in_unit_range(
        inputs in prop::collection::vec((arb_text(), arb_context()), 1..40),
    ) {
        let mut modules = all_modules(None);
        for (text, ctx) in &inputs {
            let results = run_pass(&mut modules, text, ctx);
            prop_assert_eq!(results.len(), MODULE_ORDER.len());
            for (module, result) in modules.iter().zip(&results) {
                for reading in result.signals_after.iter() {
                    prop_assert!(
                        reading.value.is_finite() && (0.0..=1.0).contains(&reading.value),
                        "{}.{} out of range: {}", result.module, reading.name, reading.value
                    );
                }
                let spec = module.config().learning_rate;
                let lr = module.learning_rate();
                prop_assert!(lr >= spec.min && lr <= spec.max,
                    "{} learning rate {} outside [{}, {}]", result.module, lr, spec.min, spec.max);
            }
        }
    }

    /// History of every module stays within its cap, whatever the input.
    #[test]
    fn pipeline_history_within_cap(
        cap in 1usize..6,
        inputs in prop::collection::vec((arb_text(), arb_context()), 0..20),
    ) {
        let mut modules = all_modules(Some(cap));
        for (text, ctx) in &inputs {
            run_pass(&mut modules, text, ctx);
            for module in &modules {
                prop_assert!(module.history_len() <= cap, "{} over cap", module.name());
            }
        }
        for module in &modules {
            prop_assert_eq!(module.history_len(), inputs.len().min(cap));
        }
    }

    /// A fresh pipeline fed only empty input never produces a factor.
    #[test]
    fn fresh_pipeline_is_quiet_on_empty_input(passes in 1usize..30) {
        let mut modules = all_modules(None);
        let ctx = InputContext::default();
        for _ in 0..passes {
            for result in run_pass(&mut modules, "", &ctx) {
                prop_assert!(result.factors.is_empty(),
                    "{} fired {:?}", result.module, result.factors);
            }
        }
    }
}
