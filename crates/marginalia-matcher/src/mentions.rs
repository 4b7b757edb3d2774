//! Entity mentions in chapter text

use crate::config::MatcherConfig;
use crate::error::MatcherError;
use crate::span::{collect_match_spans, merge_spans, MatchSpan};
use marginalia_domain::{split_parenthetical, Category, Entity, KnowledgeRecord};
use tracing::{debug, warn};

/// An entity found in a chapter
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterMention<'a> {
    /// The mentioned entity
    pub entity: &'a Entity,

    /// Category the entity belongs to
    pub category: Category,

    /// Number of distinct mentions
    pub count: usize,
}

/// Counts entity mentions in text
///
/// # Examples
///
/// ```
/// use marginalia_domain::Entity;
/// use marginalia_matcher::Matcher;
///
/// let matcher = Matcher::default();
/// let entity = Entity::new("Elizabeth Bennet").with_alias("Lizzy");
/// let count = matcher.count_occurrences(&entity, "lizzy laughed. elizabeth bennet did not.");
/// assert_eq!(count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher with the given configuration
    pub fn new(config: MatcherConfig) -> Result<Self, MatcherError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Lowercase search terms for an entity: its primary name, the parts of
    /// a parenthetical name ("Theosis (Deification)"), and its aliases
    ///
    /// Alternates and aliases shorter than `min_term_length` bytes are
    /// dropped. Duplicates are removed.
    pub fn search_terms(&self, entity: &Entity) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        let mut push = |term: &str, filtered: bool| {
            let term = term.trim().to_lowercase();
            if term.is_empty() || (filtered && term.len() < self.config.min_term_length) {
                return;
            }
            if !terms.contains(&term) {
                terms.push(term);
            }
        };

        let (base, alternate) = split_parenthetical(&entity.name);
        match alternate {
            Some(alternate) => {
                push(base, true);
                push(alternate, true);
            }
            None => push(&entity.name, false),
        }
        for alias in &entity.aliases {
            push(alias, true);
        }
        terms
    }

    /// Disjoint mention spans of an entity in already-lowercased text
    pub fn mention_spans(&self, entity: &Entity, text_lowered: &str) -> Vec<MatchSpan> {
        self.union_spans(entity, self.bounded(text_lowered))
    }

    /// Union mention count of an entity in already-lowercased text
    ///
    /// A name and an alias hitting the same place count once.
    pub fn count_occurrences(&self, entity: &Entity, text_lowered: &str) -> usize {
        self.mention_spans(entity, text_lowered).len()
    }

    fn union_spans(&self, entity: &Entity, text: &str) -> Vec<MatchSpan> {
        let spans = self
            .search_terms(entity)
            .iter()
            .flat_map(|term| collect_match_spans(text, term))
            .collect();
        merge_spans(spans)
    }

    /// Entities of a record mentioned in a chapter, most mentioned first
    ///
    /// Timeline entries and singleton categories are skipped: their "names"
    /// are free-text phrases that only produce incidental matches. Ties keep
    /// record order.
    pub fn find_items_in_chapter<'a>(
        &self,
        record: &'a KnowledgeRecord,
        chapter_text: &str,
    ) -> Vec<ChapterMention<'a>> {
        let lowered = self.bounded(chapter_text).to_lowercase();

        let mut mentions: Vec<ChapterMention<'a>> = record
            .iter_entities()
            .filter(|(category, _)| category.is_mention_searchable())
            .filter_map(|(category, entity)| {
                let count = self.union_spans(entity, &lowered).len();
                (count > 0).then_some(ChapterMention {
                    entity,
                    category,
                    count,
                })
            })
            .collect();

        mentions.sort_by(|a, b| b.count.cmp(&a.count));
        debug!(
            "Found {} mentioned entities in {} bytes of chapter text",
            mentions.len(),
            lowered.len()
        );
        mentions
    }

    /// Mention count of one entity in each chapter, in chapter order
    pub fn chapter_distribution<S: AsRef<str>>(&self, entity: &Entity, chapters: &[S]) -> Vec<usize> {
        chapters
            .iter()
            .map(|chapter| {
                let lowered = self.bounded(chapter.as_ref()).to_lowercase();
                self.union_spans(entity, &lowered).len()
            })
            .collect()
    }

    /// Truncate text to the configured limit on a char boundary
    fn bounded<'t>(&self, text: &'t str) -> &'t str {
        match self.config.max_text_length {
            Some(limit) if text.len() > limit => {
                let mut cut = limit;
                while cut > 0 && !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                warn!(
                    "Text of {} bytes exceeds max_text_length {}, scanning the first {} bytes",
                    text.len(),
                    limit,
                    cut
                );
                &text[..cut]
            }
            _ => text,
        }
    }
}

/// Union mention count of an entity using the default configuration
pub fn count_item_occurrences(entity: &Entity, text_lowered: &str) -> usize {
    Matcher::default().count_occurrences(entity, text_lowered)
}

/// Entities mentioned in a chapter using the default configuration
pub fn find_items_in_chapter<'a>(
    record: &'a KnowledgeRecord,
    chapter_text: &str,
) -> Vec<ChapterMention<'a>> {
    Matcher::default().find_items_in_chapter(record, chapter_text)
}
