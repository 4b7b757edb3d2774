//! Integration tests for marginalia-render
//!
//! Records here come from JSON the way the host stores them, so rendering
//! is exercised over source-vocabulary payloads.

use marginalia_domain::{BookKind, Category, KnowledgeRecord};
use marginalia_matcher::find_items_in_chapter;
use marginalia_render::{render_chapter_mentions, render_entity, render_markdown, search_all};
use proptest::prelude::*;
use serde_json::json;

fn nonfiction() -> KnowledgeRecord {
    KnowledgeRecord::from_json(
        json!({
            "key_figures": [
                {"name": "Immanuel Kant", "aliases": ["Kant"], "role": "author",
                 "references": ["David Hume (awakened him)"]},
                {"name": "David Hume", "significance": "Skeptic of causation."}
            ],
            "core_concepts": [
                {"name": "Synthetic a priori", "description": "Knowledge that is informative yet necessary."}
            ],
            "terminology": [{"term": "Noumenon", "definition": "The thing in itself."}],
            "argument_development": [
                {"event": "Transcendental Aesthetic", "chapter": "I", "description": "Space and time as forms."}
            ],
            "current_position": {"summary": "The Analytic begins.", "key_question": "How are categories justified?"},
            "conclusion": "Metaphysics must be limited."
        }),
        Some(BookKind::NonFiction),
    )
    .unwrap()
}

#[test]
fn test_nonfiction_document() {
    let md = render_markdown(&nonfiction(), Some("Critique of Pure Reason"), Some("Ch. 5"));
    let expected = "\
# Critique of Pure Reason

*Progress: Ch. 5*

## Key Figures

**Immanuel Kant** (author)
- Aliases: Kant
- Connections: David Hume (awakened him)

**David Hume**
- Significance: Skeptic of causation.

## Core Concepts

**Synthetic a priori**: Knowledge that is informative yet necessary.

## Terminology

**Noumenon**: The thing in itself.

## Argument Development

[I] **Transcendental Aesthetic**: Space and time as forms.

## Current Position

The Analytic begins.

**Key Question:** How are categories justified?

## Conclusion

Metaphysics must be limited.
";
    assert_eq!(md, expected);
}

#[test]
fn test_render_is_deterministic() {
    let record = nonfiction();
    assert_eq!(
        render_markdown(&record, None, None),
        render_markdown(&record.clone(), None, None)
    );
}

#[test]
fn test_entity_detail_with_reference() {
    let record = nonfiction();
    let (category, kant) = record.find_entity("kant").unwrap();
    let out = render_entity(&record, category, kant);
    assert!(out.starts_with("## Immanuel Kant\n\n*Key Figures*\n"));
    assert!(out.contains("- David Hume (awakened him) → Key Figures\n"));
}

#[test]
fn test_scan_then_render() {
    let record = nonfiction();
    let chapter = "Kant answers Hume. Hume doubted; Kant did not. The noumenon remains.";
    let mentions = find_items_in_chapter(&record, chapter);
    assert_eq!(
        render_chapter_mentions(&record, &mentions),
        "- **Immanuel Kant** (Key Figures): 2 mentions\n\
         - **Noumenon** (Terminology): 1 mention\n"
    );
}

#[test]
fn test_search_across_vocabularies() {
    let record = nonfiction();
    let hits = search_all(&record, "thing in itself");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category, Category::Lexicon);
    assert_eq!(record.kind, Some(BookKind::NonFiction));
}

proptest! {
    /// Property: rendering never panics and always starts with the title
    #[test]
    fn test_render_total(name in "\\PC{0,19}\\p{L}", title in "[A-Za-z ]{1,20}") {
        let record = KnowledgeRecord::from_json(
            json!({"characters": [{"name": name}]}),
            None,
        ).unwrap();
        let md = render_markdown(&record, Some(&title), None);
        let heading = format!("# {}\n", title);
        prop_assert!(md.starts_with(&heading));
    }

    /// Property: every search hit really contains the query somewhere
    #[test]
    fn test_search_hits_contain_query(query in "[a-z]{1,4}") {
        let record = nonfiction();
        for hit in search_all(&record, &query) {
            let entity = hit.entity;
            let haystack = format!(
                "{} {} {} {} {}",
                entity.name,
                entity.aliases.join(" "),
                entity.text("description").unwrap_or(""),
                entity.text("definition").unwrap_or(""),
                entity.text("significance").unwrap_or(""),
            ).to_lowercase();
            prop_assert!(haystack.contains(&query));
        }
    }
}
