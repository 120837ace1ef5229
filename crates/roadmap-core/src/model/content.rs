//! Categorized input handed over by the content-categorization collaborator.

use serde::{Deserialize, Serialize};

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ContentItem {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Learning material already sorted into buckets.
///
/// Source order inside each bucket is preserved into the dependency chains
/// the builder produces. Missing buckets deserialize as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedContent {
    /// Label used for the start/completion milestones and for tags.
    pub topic: String,
    #[serde(default)]
    pub prerequisites: Vec<ContentItem>,
    #[serde(default)]
    pub core_topics: Vec<ContentItem>,
    #[serde(default)]
    pub projects: Vec<ContentItem>,
    #[serde(default)]
    pub advanced_topics: Vec<ContentItem>,
}

impl CategorizedContent {
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Number of content items across all buckets.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.prerequisites.len()
            + self.core_topics.len()
            + self.projects.len()
            + self.advanced_topics.len()
    }

    /// All items in bucket order (prerequisites, core, projects, advanced).
    pub fn items(&self) -> impl Iterator<Item = &ContentItem> {
        self.prerequisites
            .iter()
            .chain(&self.core_topics)
            .chain(&self.projects)
            .chain(&self.advanced_topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_buckets_default_to_empty() {
        let content: CategorizedContent =
            serde_json::from_str(r#"{"topic":"Rust","coreTopics":[{"title":"Ownership"}]}"#)
                .expect("parse");
        assert_eq!(content.topic, "Rust");
        assert!(content.prerequisites.is_empty());
        assert_eq!(content.core_topics.len(), 1);
        assert_eq!(content.core_topics[0].description, "");
        assert_eq!(content.item_count(), 1);
    }
}
