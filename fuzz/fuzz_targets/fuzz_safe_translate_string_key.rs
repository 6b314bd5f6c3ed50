#![no_main]

use glossa::{
    ComponentConfig, EngineConfig, LocaleStrings, StringKeyEnum, TranslationEngine, Variables,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = std::str::from_utf8(data) else {
        return;
    };
    if value.len() > 1024 {
        return;
    }

    let Ok(mut engine) = TranslationEngine::new(EngineConfig::default().default_language("en"))
    else {
        return;
    };
    let status = ComponentConfig::new("status").language(
        "en",
        LocaleStrings::new().with("active", "Active").with("idle", "Idle {since}"),
    );
    let scanned = ComponentConfig::new("scanned")
        .language("en", LocaleStrings::new().with("orphan", "Orphan"));
    if engine.register_component(status).is_err() || engine.register_component(scanned).is_err() {
        return;
    }
    if engine
        .register_string_key_enum(&StringKeyEnum::new("status", ["active", "idle"]), None)
        .is_err()
    {
        return;
    }

    // Must never panic, with or without an explicit (arbitrary) language.
    let out = engine.safe_translate_string_key(value, &Variables::new(), None);
    let _ = engine.safe_translate_string_key(value, &Variables::new(), Some(value));

    match value {
        "active" => assert_eq!(out, "Active"),
        "idle" => assert_eq!(out, "Idle {since}"),
        "orphan" => assert_eq!(out, "Orphan"),
        _ => assert_eq!(out, format!("[unknown.{value}]")),
    }
});
