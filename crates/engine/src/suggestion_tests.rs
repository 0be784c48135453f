// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sy_core::test_support::{test_context, TestSender};
use yare::parameterized;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn filter(processor: impl SuggestionProcessor<TestSender>, input: &str, raw: &[&str]) -> Vec<String> {
    processor.process(&test_context(), input, words(raw))
}

#[parameterized(
    empty_keeps_all = { "", &["stop", "start", "give"], &["stop", "start", "give"] },
    prefix = { "st", &["stop", "start", "give"], &["stop", "start"] },
    ignores_case = { "ST", &["stop", "Start"], &["stop", "Start"] },
    no_match = { "x", &["stop"], &[] },
    dedupes = { "s", &["stop", "stop", "start"], &["stop", "start"] },
)]
fn filtering(input: &str, raw: &[&str], expected: &[&str]) {
    assert_eq!(filter(FilteringSuggestionProcessor::default(), input, raw), expected);
}

#[test]
fn case_sensitive_filtering() {
    let processor = FilteringSuggestionProcessor::case_sensitive();
    assert_eq!(filter(processor, "S", &["stop", "Start"]), vec!["Start"]);
}

#[test]
fn sorting_wraps_another_processor() {
    let processor = SortingSuggestionProcessor::new(FilteringSuggestionProcessor::default());
    assert_eq!(
        filter(processor, "s", &["stop", "start", "give", "say"]),
        vec!["say", "start", "stop"]
    );
}
