#![no_main]

use arbitrary::Arbitrary;
use glossa::{
    ComponentConfig, EngineConfig, LocaleStrings, PluralCategory, PluralForms, TranslationEngine,
    Variables,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    template: String,
    variables: Vec<(String, String)>,
    count: Option<i64>,
    language: Option<String>,
}

fuzz_target!(|input: Input| {
    if input.template.len() > 4096 || input.variables.len() > 32 {
        return;
    }

    let Ok(mut engine) = TranslationEngine::new(EngineConfig::default().default_language("en"))
    else {
        return;
    };
    let component = ComponentConfig::new("app").alias("a").language(
        "en",
        LocaleStrings::new().with("greet", "Hello, {name}!").with(
            "files",
            PluralForms::new()
                .with(PluralCategory::One, "{count} file")
                .with(PluralCategory::Other, "{count} files"),
        ),
    );
    if engine.register_component(component).is_err() {
        return;
    }

    let mut vars: Variables = input.variables.into_iter().collect();
    if let Some(count) = input.count {
        vars.insert("count", count);
    }
    let language = input.language.as_deref();

    // t() must never panic and must be deterministic.
    let first = engine.t(&input.template, &vars, language);
    let second = engine.t(&input.template, &vars, language);
    assert_eq!(first, second, "template output must be deterministic");

    // Text without any brace is returned unchanged.
    if !input.template.contains(['{', '}']) {
        assert_eq!(first, input.template);
    }
});
