//! Integration tests for marginalia-matcher
//!
//! These tests run the matcher over records built from JSON, the way the
//! host hands them over, and over mixed-script chapter text.

use marginalia_domain::{BookKind, Category, KnowledgeRecord};
use marginalia_matcher::{
    collect_match_spans, count_item_occurrences, find_items_in_chapter, is_word_char,
    merge_spans, MatchSpan, Matcher, MatcherConfig,
};
use proptest::prelude::*;
use serde_json::json;

fn record() -> KnowledgeRecord {
    KnowledgeRecord::from_json(
        json!({
            "characters": [
                {"name": "Elizabeth Bennet", "aliases": ["Lizzy", "Eliza"]},
                {"name": "Fitzwilliam Darcy", "aliases": "Darcy"},
                {"name": "Jane Bennet", "aliases": ["Jane"]}
            ],
            "locations": [{"name": "Pemberley"}],
            "themes": [{"name": "Pride"}],
            "timeline": [{"event": "Darcy proposes"}],
            "current_state": {"summary": "Darcy has left Hunsford."}
        }),
        Some(BookKind::Fiction),
    )
    .unwrap()
}

#[test]
fn test_chapter_report() {
    let chapter = "\u{201C}Lizzy!\u{201D} cried Jane. Elizabeth Bennet turned. \
                   Darcy, pride wounded, rode to Pemberley. Darcy did not look back.";
    let record = record();
    let mentions = find_items_in_chapter(&record, chapter);

    let names: Vec<(&str, usize)> = mentions
        .iter()
        .map(|m| (m.entity.name.as_str(), m.count))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Elizabeth Bennet", 2),
            ("Fitzwilliam Darcy", 2),
            ("Jane Bennet", 1),
            ("Pemberley", 1),
            ("Pride", 1),
        ]
    );
    assert!(mentions.iter().all(|m| m.category != Category::Timeline));
}

#[test]
fn test_mixed_script_chapter() {
    let mut record = KnowledgeRecord::new(BookKind::Fiction);
    record.upsert_entity(
        Category::Figures,
        marginalia_domain::Entity::new("Наташа").with_alias("Natasha"),
    );
    record.upsert_entity(Category::Locations, marginalia_domain::Entity::new("会社"));

    let chapter = "Наташа вошла. Natasha! С Наташами. 彼は会社に行った。会社員";
    let mentions = find_items_in_chapter(&record, chapter);
    let counts: Vec<usize> = mentions.iter().map(|m| m.count).collect();
    // "Наташами" is a longer Cyrillic word; "会社員" still counts in CJK
    assert_eq!(counts, vec![2, 2]);
}

#[test]
fn test_cjk_needle_counts_without_boundaries() {
    let spans = collect_match_spans("彼は会社に行った。社長も会社にいる。", "社");
    assert_eq!(spans.len(), 3);
}

#[test]
fn test_entity_with_overlapping_alias() {
    let record = record();
    let elizabeth = &record.entities(Category::Figures)[0];
    assert_eq!(
        count_item_occurrences(elizabeth, "elizabeth bennet, lizzy to her sister, eliza to others"),
        3
    );
}

#[test]
fn test_custom_term_length() {
    let matcher = Matcher::new(MatcherConfig {
        min_term_length: 6,
        max_text_length: None,
    })
    .unwrap();
    let record = record();
    let elizabeth = &record.entities(Category::Figures)[0];
    // "lizzy" and "eliza" are now too short to search
    assert_eq!(matcher.count_occurrences(elizabeth, "lizzy and eliza"), 0);
}

proptest! {
    /// Property: the classifier never panics, wherever it is pointed
    #[test]
    fn test_is_word_char_total(text in ".{0,24}", pos in 0usize..40, scan_back: bool) {
        let _ = is_word_char(text.as_bytes(), pos, scan_back);
    }

    /// Property: spans lie inside the text and cover the needle exactly
    #[test]
    fn test_spans_cover_needle(text in "[a-c ]{0,40}", needle in "[a-c]{1,3}") {
        for span in collect_match_spans(&text, &needle) {
            prop_assert!(span.end < text.len());
            prop_assert_eq!(&text[span.start..=span.end], needle.as_str());
        }
    }

    /// Property: merged spans are disjoint and never outnumber the input
    #[test]
    fn test_merged_spans_disjoint(raw in prop::collection::vec((0usize..50, 0usize..6), 0..20)) {
        let spans: Vec<MatchSpan> = raw.iter().map(|&(s, l)| MatchSpan::new(s, s + l)).collect();
        let merged = merge_spans(spans.clone());
        prop_assert!(merged.len() <= spans.len());
        for pair in merged.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }

    /// Property: the union count never exceeds the sum of per-term counts
    #[test]
    fn test_union_count_bounded(text in "[a-d ]{0,60}") {
        let entity = marginalia_domain::Entity::new("ab").with_alias("abc").with_alias("abcd");
        let union = count_item_occurrences(&entity, &text);
        let sum: usize = ["ab", "abc", "abcd"]
            .iter()
            .map(|t| collect_match_spans(&text, t).len())
            .sum();
        prop_assert!(union <= sum);
    }
}
