#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Normalization must never panic, must be idempotent, and its
    // position maps must stay within the original string.
    let once = fragmatch::normalize(data);
    let twice = fragmatch::normalize(once.text());
    assert_eq!(once.text(), twice.text());

    let span = once.to_original(0..once.len());
    assert!(span.end <= data.len());

    let compact = once.compact();
    assert!(compact.len() <= once.len());
    let alnum = once.alnum();
    assert!(alnum.text().chars().all(|c| c.is_ascii_alphanumeric()));
});
