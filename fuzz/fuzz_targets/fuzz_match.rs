#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<String>, Vec<String>)| {
    let (pages, fragments) = input;
    // Matching arbitrary fragments against arbitrary pages must never
    // panic, and every reported span must slice its page cleanly.
    let doc = fragmatch::DocumentIndex::new(pages);
    let engine = fragmatch::AnchorEngine::new(&doc);
    let fragment_refs: Vec<&str> = fragments.iter().map(String::as_str).collect();
    for group in engine.match_all(&fragment_refs) {
        for result in group {
            let page = doc.page(result.page).expect("result names a real page");
            assert!(result.start <= result.end);
            assert_eq!(&page.raw()[result.start..result.end], result.matched_text);
        }
    }
});
