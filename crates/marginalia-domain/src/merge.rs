//! Folding incremental updates into an existing record
//!
//! Later analyses resend only what changed as the reader advances. Merging
//! is additive or overwriting, never destructive: categories and entities
//! the update does not mention survive untouched.

use crate::record::{CategoryData, KnowledgeRecord};

/// Counts of what a merge did, for logging and callers that report progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Entities that replaced an existing entity of the same name
    pub replaced: usize,

    /// Entities appended to a category
    pub appended: usize,

    /// Singleton categories overwritten
    pub singletons: usize,
}

impl KnowledgeRecord {
    /// Merge `partial` into this record in place
    ///
    /// - kind: kept if already set, otherwise taken from `partial`
    /// - singleton categories: replaced wholesale
    /// - append-only categories (timeline): items appended verbatim
    /// - other list categories: matched by case-insensitive name; a match is
    ///   replaced by the incoming entity, anything else is appended
    pub fn merge(&mut self, partial: KnowledgeRecord) -> MergeSummary {
        let mut summary = MergeSummary::default();

        if self.kind.is_none() {
            self.kind = partial.kind;
        }

        if let Some(error) = &partial.error {
            tracing::warn!("Ignoring error payload in incremental update: {}", error);
        }

        for (category, data) in partial.categories {
            match data {
                CategoryData::Singleton(singleton) => {
                    self.set_singleton(category, singleton);
                    summary.singletons += 1;
                }
                CategoryData::Entities(entities) => {
                    if entities.is_empty() {
                        self.categories
                            .entry(category)
                            .or_insert_with(|| CategoryData::Entities(Vec::new()));
                    }
                    for entity in entities {
                        if self.upsert_entity(category, entity) {
                            summary.replaced += 1;
                        } else {
                            summary.appended += 1;
                        }
                    }
                }
            }
        }

        for (key, value) in partial.extras {
            self.extras.insert(key, value);
        }

        tracing::debug!(
            "Merged update: {} replaced, {} appended, {} singletons",
            summary.replaced,
            summary.appended,
            summary.singletons
        );

        summary
    }
}

/// Merge `partial` into `old` and return the result
pub fn merge(mut old: KnowledgeRecord, partial: KnowledgeRecord) -> KnowledgeRecord {
    old.merge(partial);
    old
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BookKind, Category, Entity, Singleton};

    fn base() -> KnowledgeRecord {
        let mut record = KnowledgeRecord::new(BookKind::Fiction);
        record.upsert_entity(
            Category::Figures,
            Entity::new("Elizabeth Bennet").with_field("role", "Protagonist"),
        );
        record.upsert_entity(Category::Figures, Entity::new("Jane Bennet"));
        record.upsert_entity(Category::Timeline, Entity::new("Bingley arrives"));
        record.set_singleton(
            Category::CurrentState,
            Singleton::new().with_field("summary", "Chapter 3"),
        );
        record
    }

    #[test]
    fn test_matching_entity_is_replaced_in_place() {
        let mut partial = KnowledgeRecord::default();
        partial.upsert_entity(
            Category::Figures,
            Entity::new("elizabeth bennet").with_alias("Lizzy"),
        );

        let mut record = base();
        let summary = record.merge(partial);

        let figures = record.entities(Category::Figures);
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].name, "elizabeth bennet");
        assert_eq!(figures[0].aliases, vec!["Lizzy"]);
        // Full replacement, not a field merge
        assert!(figures[0].text("role").is_none());
        assert_eq!(summary.replaced, 1);
    }

    #[test]
    fn test_new_entity_is_appended() {
        let mut partial = KnowledgeRecord::default();
        partial.upsert_entity(Category::Figures, Entity::new("Mr. Darcy"));
        let record = merge(base(), partial);
        let names: Vec<_> = record
            .entities(Category::Figures)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Elizabeth Bennet", "Jane Bennet", "Mr. Darcy"]);
    }

    #[test]
    fn test_timeline_appends_without_dedup() {
        let mut partial = KnowledgeRecord::default();
        partial.upsert_entity(Category::Timeline, Entity::new("Bingley arrives"));
        let record = merge(base(), partial);
        assert_eq!(record.entities(Category::Timeline).len(), 2);
    }

    #[test]
    fn test_singleton_is_replaced() {
        let mut partial = KnowledgeRecord::default();
        partial.set_singleton(
            Category::CurrentState,
            Singleton::new().with_field("summary", "Chapter 9"),
        );
        let record = merge(base(), partial);
        assert_eq!(
            record.singleton(Category::CurrentState).unwrap().text("summary"),
            Some("Chapter 9")
        );
    }

    #[test]
    fn test_absent_categories_survive() {
        let mut partial = KnowledgeRecord::default();
        partial.upsert_entity(Category::Locations, Entity::new("Longbourn"));
        let record = merge(base(), partial);
        assert_eq!(record.entities(Category::Figures).len(), 2);
        assert_eq!(record.entities(Category::Timeline).len(), 1);
        assert_eq!(record.entities(Category::Locations).len(), 1);
        assert!(record.singleton(Category::CurrentState).is_some());
    }

    #[test]
    fn test_kind_inheritance() {
        let mut old = KnowledgeRecord::default();
        old.merge(KnowledgeRecord::new(BookKind::NonFiction));
        assert_eq!(old.kind, Some(BookKind::NonFiction));

        let mut old = KnowledgeRecord::new(BookKind::Fiction);
        old.merge(KnowledgeRecord::new(BookKind::NonFiction));
        assert_eq!(old.kind, Some(BookKind::Fiction));
    }

    #[test]
    fn test_error_payload_does_not_poison_record() {
        let partial = KnowledgeRecord {
            error: Some("rate limited".to_string()),
            ..KnowledgeRecord::default()
        };
        let record = merge(base(), partial);
        assert!(!record.is_error());
        assert_eq!(record.entity_count(), 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::{Category, Entity};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-dA-D]{1,3}", 0..10)
    }

    fn build(names: &[String], category: Category) -> KnowledgeRecord {
        let mut record = KnowledgeRecord::default();
        for name in names {
            record.upsert_entity(category, Entity::new(name.clone()));
        }
        record
    }

    proptest! {
        /// Property: merging never loses an entity of the old record
        #[test]
        fn test_merge_is_monotonic(a in names(), b in names()) {
            let old = build(&a, Category::Figures);
            let partial = build(&b, Category::Figures);
            let merged = merge(old.clone(), partial.clone());

            let merged_entities = merged.entities(Category::Figures);
            prop_assert!(merged_entities.len() >= old.entities(Category::Figures).len());
            prop_assert!(merged_entities.len() >= partial.entities(Category::Figures).len());
            for entity in old.entities(Category::Figures) {
                prop_assert!(merged_entities.iter().any(|m| m.merge_key() == entity.merge_key()));
            }
        }

        /// Property: merge keys stay unique in list categories
        #[test]
        fn test_merge_keeps_names_unique(a in names(), b in names()) {
            let merged = merge(build(&a, Category::Themes), build(&b, Category::Themes));
            let keys: HashSet<String> = merged
                .entities(Category::Themes)
                .iter()
                .map(|e| e.merge_key())
                .collect();
            prop_assert_eq!(keys.len(), merged.entities(Category::Themes).len());
        }

        /// Property: the timeline grows by exactly the appended count
        #[test]
        fn test_timeline_appends_everything(a in names(), b in names()) {
            let merged = merge(build(&a, Category::Timeline), build(&b, Category::Timeline));
            prop_assert_eq!(merged.entities(Category::Timeline).len(), a.len() + b.len());
        }
    }
}
