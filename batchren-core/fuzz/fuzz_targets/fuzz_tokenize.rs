#![no_main]

use batchren_core::{classify_and_suggest, tokenize_filename, tokenize_pattern, Policy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut parts = input.splitn(3, '\n').map(|s| s.chars().take(100).collect::<String>());
    let name = parts.next().unwrap_or_default();
    let prefix = parts.next().unwrap_or_default();
    let replacement = parts.next().unwrap_or_default();

    let joined: String = tokenize_filename(&name).iter().map(|t| t.text.as_str()).collect();
    assert_eq!(joined, name);

    let _ = tokenize_pattern(&prefix, &Policy::default());
    let _ = classify_and_suggest(&name, &prefix, &replacement);
});
