#![no_main]

use cmdtree::dispatch::link::{SUMMARY_MAX_CHARS, short_summary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|description: &str| {
    let summary = short_summary(Some(description)).unwrap_or_default();
    assert!(summary.chars().count() <= SUMMARY_MAX_CHARS);
});
