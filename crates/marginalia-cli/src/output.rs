//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use marginalia_domain::{
    Category, CategoryData, Entity, KnowledgeRecord, MergeSummary, ResolvedConnection,
};
use marginalia_matcher::ChapterMention;
use marginalia_render::{render_entity, SearchHit};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Names listed per category in the record overview
const OVERVIEW_NAMES: usize = 5;

/// Longest description shown in a table cell
const CELL_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a whole record.
    pub fn format_record(&self, record: &KnowledgeRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&record.to_json())?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
            OutputFormat::Quiet => Ok(entity_names(record.iter_entities().map(|(_, e)| e))),
        }
    }

    /// Overview table: one row per category.
    fn format_record_table(&self, record: &KnowledgeRecord) -> String {
        if let Some(error) = &record.error {
            return self.error(&format!("Analysis reported an error: {}", error));
        }
        if record.categories.is_empty() {
            return self.warning("Record has no categories.");
        }

        let kind = record.kind_or_default();
        let mut builder = Builder::default();
        builder.push_record(["Category", "Entries", "Names"]);

        for (category, data) in &record.categories {
            let (entries, names) = match data {
                CategoryData::Entities(entities) => {
                    let mut names: Vec<&str> = entities
                        .iter()
                        .take(OVERVIEW_NAMES)
                        .map(|e| e.name.as_str())
                        .collect();
                    if entities.len() > OVERVIEW_NAMES {
                        names.push("…");
                    }
                    (entities.len().to_string(), names.join(", "))
                }
                CategoryData::Singleton(singleton) => (
                    "-".to_string(),
                    truncate(singleton.text("summary").unwrap_or(""), CELL_WIDTH),
                ),
            };
            builder.push_record([category.display_name(kind).to_string(), entries, names]);
        }

        let header = self.info(&format!(
            "{} record, {} entities",
            kind,
            record.entity_count()
        ));
        format!("{}\n{}", header, styled(builder))
    }

    /// Format chapter scan results.
    pub fn format_mentions(
        &self,
        record: &KnowledgeRecord,
        mentions: &[ChapterMention<'_>],
    ) -> Result<String> {
        let kind = record.kind_or_default();
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = mentions
                    .iter()
                    .map(|m| {
                        json!({
                            "name": m.entity.name,
                            "category": m.category.key(kind),
                            "count": m.count,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(entity_names(mentions.iter().map(|m| m.entity))),
            OutputFormat::Table => {
                if mentions.is_empty() {
                    return Ok(self.warning("No known entities mentioned."));
                }
                let mut builder = Builder::default();
                builder.push_record(["Name", "Category", "Mentions"]);
                for mention in mentions {
                    builder.push_record([
                        mention.entity.name.clone(),
                        mention.category.display_name(kind).to_string(),
                        mention.count.to_string(),
                    ]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format search results.
    pub fn format_hits(&self, record: &KnowledgeRecord, hits: &[SearchHit<'_>]) -> Result<String> {
        let kind = record.kind_or_default();
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = hits
                    .iter()
                    .map(|h| {
                        json!({
                            "name": h.entity.name,
                            "category": h.category.key(kind),
                            "match_field": h.match_field,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(entity_names(hits.iter().map(|h| h.entity))),
            OutputFormat::Table => {
                if hits.is_empty() {
                    return Ok(self.warning("No matching entities."));
                }
                let mut builder = Builder::default();
                builder.push_record(["Name", "Category", "Matched", "Description"]);
                for hit in hits {
                    builder.push_record([
                        hit.entity.name.clone(),
                        hit.category.display_name(kind).to_string(),
                        format!("{:?}", hit.match_field).to_lowercase(),
                        truncate(hit.entity.description().unwrap_or(""), CELL_WIDTH),
                    ]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format a resolved connection.
    pub fn format_connection(
        &self,
        record: &KnowledgeRecord,
        resolved: &ResolvedConnection<'_>,
    ) -> Result<String> {
        let kind = record.kind_or_default();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "name": resolved.entity.name,
                "category": resolved.category.key(kind),
                "name_portion": resolved.name_portion,
                "relationship": resolved.relationship,
            }))?),
            OutputFormat::Quiet => Ok(resolved.entity.name.clone()),
            OutputFormat::Table => {
                let mut line = resolved.entity.name.clone();
                if let Some(relationship) = &resolved.relationship {
                    line.push_str(&format!(" ({})", relationship));
                }
                line.push_str(&format!(" → {}", resolved.category.display_name(kind)));
                Ok(self.success(&line))
            }
        }
    }

    /// Format a single entity.
    pub fn format_entity(
        &self,
        record: &KnowledgeRecord,
        category: Category,
        entity: &Entity,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "category": category.key(record.kind_or_default()),
                "entity": entity.to_json(category),
            }))?),
            OutputFormat::Quiet => Ok(entity.name.clone()),
            OutputFormat::Table => Ok(render_entity(record, category, entity)),
        }
    }

    /// Format a rendered markdown document.
    pub fn format_markdown(&self, markdown: String) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "markdown": markdown }))?),
            OutputFormat::Table | OutputFormat::Quiet => Ok(markdown),
        }
    }

    /// Format a merge outcome.
    pub fn merge_result(&self, summary: &MergeSummary) -> String {
        self.success(&format!(
            "Merged: {} replaced, {} appended, {} singleton(s) updated",
            summary.replaced, summary.appended, summary.singletons
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), Color::Red)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn entity_names<'a>(entities: impl Iterator<Item = &'a Entity>) -> String {
    entities
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shorten to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
