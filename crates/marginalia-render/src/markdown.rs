//! Markdown rendering of knowledge records

use marginalia_domain::{
    resolve_connection, BookKind, Category, CategoryData, Entity, KnowledgeRecord, Singleton,
};
use marginalia_matcher::ChapterMention;
use serde_json::Value;
use std::fmt::Write;

const DEFAULT_TITLE: &str = "X-Ray";

/// Render a whole record as a markdown document
///
/// Layout:
///
/// ```text
/// # Title
///
/// *Progress: 42%*
///
/// ## Cast of Characters
///
/// **Elizabeth Bennet** (protagonist): Second Bennet daughter.
/// - Aliases: Lizzy, Eliza
/// ```
///
/// Categories follow the fixed order of the record's kind; categories the
/// order does not list come last. Absent fields produce no output at all.
pub fn render_markdown(
    record: &KnowledgeRecord,
    title: Option<&str>,
    progress: Option<&str>,
) -> String {
    let kind = record.kind_or_default();
    let mut out = String::new();

    let _ = writeln!(out, "# {}", title.unwrap_or(DEFAULT_TITLE));
    if let Some(progress) = progress.map(str::trim).filter(|p| !p.is_empty()) {
        let _ = write!(out, "\n*Progress: {}*\n", progress);
    }
    if let Some(error) = &record.error {
        let _ = write!(out, "\n**Error:** {}\n", error);
    }

    for category in ordered_categories(record, kind) {
        let Some(data) = record.categories.get(&category) else {
            continue;
        };
        let _ = write!(out, "\n## {}\n", category.display_name(kind));
        match data {
            CategoryData::Singleton(singleton) => render_singleton(&mut out, singleton),
            CategoryData::Entities(entities) => {
                for entity in entities {
                    out.push('\n');
                    render_entity_block(&mut out, category, entity);
                }
            }
        }
    }

    tracing::debug!(
        "Rendered {} record: {} categories, {} bytes",
        kind,
        record.categories.len(),
        out.len()
    );
    out
}

/// Render one entity in full, with its connections resolved
///
/// Every payload field is listed. Connections that resolve to another
/// entity of the record show where they point:
/// `Jane Bennet (sister) → Cast of Characters`.
pub fn render_entity(record: &KnowledgeRecord, category: Category, entity: &Entity) -> String {
    let kind = record.kind_or_default();
    let mut out = String::new();

    let _ = writeln!(out, "## {}", entity.name);
    let _ = writeln!(out, "\n*{}*", category.display_name(kind));

    let mut details = Vec::new();
    if !entity.aliases.is_empty() {
        details.push(format!("**Aliases:** {}", entity.aliases.join(", ")));
    }
    for (key, value) in &entity.fields {
        if key == "connections" || key == "references" {
            continue;
        }
        if let Some(text) = display_value(value) {
            details.push(format!("**{}:** {}", field_label(key), text));
        }
    }
    if !details.is_empty() {
        out.push('\n');
        for line in details {
            let _ = writeln!(out, "{}", line);
        }
    }

    let connections = entity.connections();
    if !connections.is_empty() {
        out.push_str("\n### Connections\n\n");
        for connection in connections {
            match resolve_connection(record, connection) {
                Some(resolved) => {
                    let _ = write!(out, "- {}", resolved.entity.name);
                    if let Some(relationship) = &resolved.relationship {
                        let _ = write!(out, " ({})", relationship);
                    }
                    let _ = writeln!(out, " → {}", resolved.category.display_name(kind));
                }
                None => {
                    let _ = writeln!(out, "- {}", connection);
                }
            }
        }
    }
    out
}

/// Render the result of a chapter scan as a markdown list
pub fn render_chapter_mentions(record: &KnowledgeRecord, mentions: &[ChapterMention<'_>]) -> String {
    if mentions.is_empty() {
        return "_No known entities mentioned._\n".to_string();
    }
    let kind = record.kind_or_default();
    let mut out = String::new();
    for mention in mentions {
        let noun = if mention.count == 1 { "mention" } else { "mentions" };
        let _ = writeln!(
            out,
            "- **{}** ({}): {} {}",
            mention.entity.name,
            mention.category.display_name(kind),
            mention.count,
            noun
        );
    }
    out
}

/// Categories present in `record`, in render order for `kind`
fn ordered_categories(record: &KnowledgeRecord, kind: BookKind) -> Vec<Category> {
    let order = Category::render_order(kind);
    let mut categories: Vec<Category> = order
        .iter()
        .copied()
        .filter(|c| record.categories.contains_key(c))
        .collect();
    categories.extend(
        record
            .categories
            .keys()
            .copied()
            .filter(|c| !order.contains(c)),
    );
    categories
}

fn render_singleton(out: &mut String, singleton: &Singleton) {
    if let Some(summary) = singleton.fields.get("summary").and_then(display_value) {
        let _ = write!(out, "\n{}\n", summary);
    }
    let mut wrote_field = false;
    for (key, value) in &singleton.fields {
        if key == "summary" {
            continue;
        }
        let Some(text) = display_value(value) else {
            continue;
        };
        if !wrote_field {
            out.push('\n');
            wrote_field = true;
        }
        let _ = writeln!(out, "**{}:** {}", field_label(key), text);
    }
}

fn render_entity_block(out: &mut String, category: Category, entity: &Entity) {
    if category == Category::Timeline {
        if let Some(chapter) = entity.fields.get("chapter").and_then(display_value) {
            let _ = write!(out, "[{}] ", chapter);
        }
    }
    let _ = write!(out, "**{}**", entity.name);
    if let Some(role) = entity.text("role") {
        let _ = write!(out, " ({})", role);
    }
    if let Some(description) = entity.description() {
        let _ = write!(out, ": {}", description);
    }
    out.push('\n');

    if !entity.aliases.is_empty() {
        let _ = writeln!(out, "- Aliases: {}", entity.aliases.join(", "));
    }
    let connections = entity.connections();
    if !connections.is_empty() {
        let _ = writeln!(out, "- Connections: {}", connections.join(", "));
    }
    if let Some(significance) = entity.text("significance") {
        let _ = writeln!(out, "- Significance: {}", significance);
    }
}

/// Inline text for a payload value; `None` when there is nothing to show
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_value).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        Value::Object(object) => (!object.is_empty()).then(|| value.to_string()),
    }
}

/// `key_question` → `Key Question`
fn field_label(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> KnowledgeRecord {
        let mut record = KnowledgeRecord::new(BookKind::Fiction);
        record.upsert_entity(
            Category::Figures,
            Entity::new("Elizabeth Bennet")
                .with_alias("Lizzy")
                .with_field("role", "protagonist")
                .with_field("description", "Second Bennet daughter.")
                .with_field("connections", json!(["Jane Bennet (sister)", "Wickham"])),
        );
        record.upsert_entity(Category::Figures, Entity::new("Jane Bennet"));
        record.upsert_entity(
            Category::Timeline,
            Entity::new("The Meryton assembly").with_field("chapter", 3),
        );
        record.set_singleton(
            Category::CurrentState,
            Singleton::new()
                .with_field("summary", "Darcy has left.")
                .with_field("open_questions", json!(["Will he return?", "Why?"])),
        );
        record
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(&record(), Some("Pride and Prejudice"), Some("30%"));
        let expected = "\
# Pride and Prejudice

*Progress: 30%*

## Cast of Characters

**Elizabeth Bennet** (protagonist): Second Bennet daughter.
- Aliases: Lizzy
- Connections: Jane Bennet (sister), Wickham

**Jane Bennet**

## Timeline

[3] **The Meryton assembly**

## Current State

Darcy has left.

**Open Questions:** Will he return?; Why?
";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_default_title_and_no_progress() {
        let md = render_markdown(&KnowledgeRecord::new(BookKind::Fiction), None, Some("  "));
        assert_eq!(md, "# X-Ray\n");
    }

    #[test]
    fn test_error_record() {
        let record = KnowledgeRecord {
            error: Some("quota exceeded".to_string()),
            ..KnowledgeRecord::default()
        };
        assert_eq!(
            render_markdown(&record, None, None),
            "# X-Ray\n\n**Error:** quota exceeded\n"
        );
    }

    #[test]
    fn test_nonfiction_order_and_names() {
        let mut record = KnowledgeRecord::new(BookKind::NonFiction);
        record.upsert_entity(Category::Locations, Entity::new("Königsberg"));
        record.upsert_entity(
            Category::Lexicon,
            Entity::new("Noumenon").with_field("definition", "The thing in itself."),
        );
        record.upsert_entity(Category::Figures, Entity::new("Kant"));

        let md = render_markdown(&record, None, None);
        let figures = md.find("## Key Figures").unwrap();
        let terms = md.find("## Terminology").unwrap();
        let places = md.find("## Locations").unwrap();
        assert!(figures < terms && terms < places);
        assert!(md.contains("**Noumenon**: The thing in itself.\n"));
    }

    #[test]
    fn test_category_outside_order_still_rendered() {
        let mut record = KnowledgeRecord::new(BookKind::Fiction);
        record.upsert_entity(Category::Arguments, Entity::new("Marriage is a market"));
        let md = render_markdown(&record, None, None);
        assert!(md.contains("**Marriage is a market**"));
    }

    #[test]
    fn test_render_entity_resolves_connections() {
        let record = record();
        let lizzy = &record.entities(Category::Figures)[0];
        let out = render_entity(&record, Category::Figures, lizzy);
        let expected = "\
## Elizabeth Bennet

*Cast of Characters*

**Aliases:** Lizzy
**Role:** protagonist
**Description:** Second Bennet daughter.

### Connections

- Jane Bennet (sister) → Cast of Characters
- Wickham
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_chapter_mentions() {
        let record = record();
        let figures = record.entities(Category::Figures);
        let mentions = vec![
            ChapterMention {
                entity: &figures[0],
                category: Category::Figures,
                count: 3,
            },
            ChapterMention {
                entity: &figures[1],
                category: Category::Figures,
                count: 1,
            },
        ];
        assert_eq!(
            render_chapter_mentions(&record, &mentions),
            "- **Elizabeth Bennet** (Cast of Characters): 3 mentions\n\
             - **Jane Bennet** (Cast of Characters): 1 mention\n"
        );
        assert_eq!(
            render_chapter_mentions(&record, &[]),
            "_No known entities mentioned._\n"
        );
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("key_question"), "Key Question");
        assert_eq!(field_label("tone"), "Tone");
        assert_eq!(field_label("reader-notes"), "Reader Notes");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(null)), None);
        assert_eq!(display_value(&json!("  ")), None);
        assert_eq!(display_value(&json!([])), None);
        assert_eq!(display_value(&json!(["a", 2, null])), Some("a; 2".to_string()));
        assert_eq!(display_value(&json!(7)), Some("7".to_string()));
    }
}
