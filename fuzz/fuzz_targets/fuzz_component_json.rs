#![no_main]

use glossa::{ComponentConfig, TranslationEngine, Variables};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 8192 {
        return;
    }

    // Arbitrary JSON must parse or fail cleanly.
    let Ok(component) = ComponentConfig::from_json_str(text) else {
        return;
    };
    let id = component.id.clone();
    let keys: Vec<(String, String)> = component
        .strings
        .iter()
        .flat_map(|(language, table)| {
            table
                .keys()
                .map(move |key| (language.to_owned(), key.to_owned()))
        })
        .take(64)
        .collect();

    let mut engine = TranslationEngine::default();
    if engine.register_component(component).is_err() {
        return;
    }

    // Every registered key renders through the safe path without panicking.
    let vars = Variables::new().with("count", 3);
    for (language, key) in keys {
        let _ = engine.safe_translate(&id, &key, &vars, Some(&language));
    }
});
