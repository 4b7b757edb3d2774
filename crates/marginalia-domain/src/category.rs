//! Category module - the sections of a book analysis
//!
//! Fiction and non-fiction analyses use parallel vocabularies for the same
//! roles. Everything downstream works against [`Category`]; the source key
//! only matters at the JSON boundary.

use crate::BookKind;

/// One section of a knowledge record
///
/// Declaration order is the storage order of a record's categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `characters` / `key_figures`
    Figures,

    /// `locations`
    Locations,

    /// `themes` / `core_concepts`
    Themes,

    /// `lexicon` / `terminology`
    Lexicon,

    /// `arguments` (non-fiction only in practice)
    Arguments,

    /// `timeline` / `argument_development`
    Timeline,

    /// `reader_engagement`
    ReaderEngagement,

    /// `current_state` / `current_position`
    CurrentState,

    /// `conclusion`
    Conclusion,
}

const FICTION_ORDER: [Category; 8] = [
    Category::Figures,
    Category::Locations,
    Category::Themes,
    Category::Lexicon,
    Category::Timeline,
    Category::ReaderEngagement,
    Category::CurrentState,
    Category::Conclusion,
];

const NONFICTION_ORDER: [Category; 9] = [
    Category::Figures,
    Category::Themes,
    Category::Arguments,
    Category::Lexicon,
    Category::Timeline,
    Category::Locations,
    Category::ReaderEngagement,
    Category::CurrentState,
    Category::Conclusion,
];

impl Category {
    /// Every category, in storage order
    pub const ALL: [Category; 9] = [
        Category::Figures,
        Category::Locations,
        Category::Themes,
        Category::Lexicon,
        Category::Arguments,
        Category::Timeline,
        Category::ReaderEngagement,
        Category::CurrentState,
        Category::Conclusion,
    ];

    /// Source key for this category under the given kind's vocabulary
    pub fn key(&self, kind: BookKind) -> &'static str {
        match (self, kind) {
            (Category::Figures, BookKind::Fiction) => "characters",
            (Category::Figures, BookKind::NonFiction) => "key_figures",
            (Category::Locations, _) => "locations",
            (Category::Themes, BookKind::Fiction) => "themes",
            (Category::Themes, BookKind::NonFiction) => "core_concepts",
            (Category::Lexicon, BookKind::Fiction) => "lexicon",
            (Category::Lexicon, BookKind::NonFiction) => "terminology",
            (Category::Arguments, _) => "arguments",
            (Category::Timeline, BookKind::Fiction) => "timeline",
            (Category::Timeline, BookKind::NonFiction) => "argument_development",
            (Category::ReaderEngagement, _) => "reader_engagement",
            (Category::CurrentState, BookKind::Fiction) => "current_state",
            (Category::CurrentState, BookKind::NonFiction) => "current_position",
            (Category::Conclusion, _) => "conclusion",
        }
    }

    /// Map a source key to its category and the kind the key implies
    ///
    /// Keys shared by both vocabularies (`locations`, `arguments`,
    /// `reader_engagement`, `conclusion`) imply no kind.
    pub fn from_key(key: &str) -> Option<(Category, Option<BookKind>)> {
        let found = match key {
            "characters" => (Category::Figures, Some(BookKind::Fiction)),
            "key_figures" => (Category::Figures, Some(BookKind::NonFiction)),
            "locations" => (Category::Locations, None),
            "themes" => (Category::Themes, Some(BookKind::Fiction)),
            "core_concepts" => (Category::Themes, Some(BookKind::NonFiction)),
            "lexicon" => (Category::Lexicon, Some(BookKind::Fiction)),
            "terminology" => (Category::Lexicon, Some(BookKind::NonFiction)),
            "arguments" => (Category::Arguments, None),
            "timeline" => (Category::Timeline, Some(BookKind::Fiction)),
            "argument_development" => (Category::Timeline, Some(BookKind::NonFiction)),
            "reader_engagement" => (Category::ReaderEngagement, None),
            "current_state" => (Category::CurrentState, Some(BookKind::Fiction)),
            "current_position" => (Category::CurrentState, Some(BookKind::NonFiction)),
            "conclusion" => (Category::Conclusion, None),
            _ => return None,
        };
        Some(found)
    }

    /// Field that carries an entity's primary name in this category
    pub fn name_field(&self) -> &'static str {
        match self {
            Category::Lexicon => "term",
            Category::Timeline => "event",
            _ => "name",
        }
    }

    /// Categories that hold one record rather than a list
    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            Category::ReaderEngagement | Category::CurrentState | Category::Conclusion
        )
    }

    /// Categories whose entries are free-text events, appended and never merged
    pub fn is_append_only(&self) -> bool {
        matches!(self, Category::Timeline)
    }

    /// Whether primary names in this category are proper nouns worth
    /// searching for in chapter text
    ///
    /// Argument names are free-text claims, like timeline events.
    pub fn is_mention_searchable(&self) -> bool {
        !self.is_singleton() && !self.is_append_only() && *self != Category::Arguments
    }

    /// Human-readable section title
    pub fn display_name(&self, kind: BookKind) -> &'static str {
        match (self, kind) {
            (Category::Figures, BookKind::Fiction) => "Cast of Characters",
            (Category::Figures, BookKind::NonFiction) => "Key Figures",
            (Category::Locations, _) => "Locations",
            (Category::Themes, BookKind::Fiction) => "Themes",
            (Category::Themes, BookKind::NonFiction) => "Core Concepts",
            (Category::Lexicon, BookKind::Fiction) => "Lexicon",
            (Category::Lexicon, BookKind::NonFiction) => "Terminology",
            (Category::Arguments, _) => "Arguments",
            (Category::Timeline, BookKind::Fiction) => "Timeline",
            (Category::Timeline, BookKind::NonFiction) => "Argument Development",
            (Category::ReaderEngagement, _) => "Reader Engagement",
            (Category::CurrentState, BookKind::Fiction) => "Current State",
            (Category::CurrentState, BookKind::NonFiction) => "Current Position",
            (Category::Conclusion, _) => "Conclusion",
        }
    }

    /// Fixed presentation order for a kind
    pub fn render_order(kind: BookKind) -> &'static [Category] {
        match kind {
            BookKind::Fiction => &FICTION_ORDER,
            BookKind::NonFiction => &NONFICTION_ORDER,
        }
    }
}
