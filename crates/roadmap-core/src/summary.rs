//! Aggregate metadata over a finished roadmap.
//!
//! All values are pure functions of the node list and the source content;
//! none of them can fail.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use std::collections::HashMap;

use tracing::instrument;

use crate::config::SummaryConfig;
use crate::model::{CategorizedContent, Difficulty, LearningNode, NodeStatus, RoadmapMetadata};

const MIN_TAG_LEN: usize = 4;

const STOP_WORDS: &[&str] = &[
    "about", "after", "also", "been", "before", "from", "have", "into", "more", "most", "only",
    "other", "over", "such", "than", "that", "them", "then", "there", "these", "they", "this",
    "through", "using", "very", "what", "when", "where", "which", "while", "will", "with",
    "within", "without", "your",
];

/// Compute [`RoadmapMetadata`] for `nodes` built from `content`.
#[must_use]
#[instrument(skip_all, fields(nodes = nodes.len()))]
pub fn summarize(
    content: &CategorizedContent,
    nodes: &[LearningNode],
    config: &SummaryConfig,
) -> RoadmapMetadata {
    RoadmapMetadata {
        total_nodes: nodes.len(),
        estimated_duration: format_duration(total_hours(nodes), config),
        difficulty: overall_difficulty(nodes),
        tags: extract_tags(content, config.tag_limit),
        completion_rate: completion_rate(nodes),
    }
}

/// First unsigned integer in a time label, e.g. `4` for `"4-6 hours"`.
///
/// Values too large for `u32` saturate at `u32::MAX`.
#[must_use]
pub fn parse_hours(label: &str) -> Option<u32> {
    let mut digits = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .map_while(|c| c.to_digit(10))
        .peekable();
    digits.peek()?;
    Some(digits.fold(0, |acc: u32, d| acc.saturating_mul(10).saturating_add(d)))
}

/// Sum of the parsed time labels. Unparseable labels count as zero.
#[must_use]
pub fn total_hours(nodes: &[LearningNode]) -> u32 {
    nodes
        .iter()
        .filter_map(|n| parse_hours(&n.estimated_time))
        .fold(0, u32::saturating_add)
}

/// `"N hours"`, or `"N weeks"` once the total passes the week threshold.
#[must_use]
pub fn format_duration(hours: u32, config: &SummaryConfig) -> String {
    if hours > config.week_threshold_hours && config.hours_per_week > 0 {
        format!("{} weeks", hours.div_ceil(config.hours_per_week))
    } else {
        format!("{hours} hours")
    }
}

/// Hardest difficulty present, [`Difficulty::Beginner`] when empty.
#[must_use]
pub fn overall_difficulty(nodes: &[LearningNode]) -> Difficulty {
    nodes
        .iter()
        .map(|n| n.difficulty)
        .max()
        .unwrap_or_default()
}

/// Rounded percentage of completed nodes.
#[must_use]
pub fn completion_rate(nodes: &[LearningNode]) -> u32 {
    if nodes.is_empty() {
        return 0;
    }
    let completed = nodes
        .iter()
        .filter(|n| n.status == NodeStatus::Completed)
        .count();
    (completed as f64 * 100.0 / nodes.len() as f64).round() as u32
}

/// Topic words followed by the `limit` most frequent content words.
///
/// Frequent words are alphabetic, at least four letters, not stop words and
/// not already present. Ties go to the word seen first.
#[must_use]
pub fn extract_tags(content: &CategorizedContent, limit: usize) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for word in content.topic.split(|c: char| !c.is_alphanumeric()) {
        let word = word.to_lowercase();
        if !word.is_empty() && !tags.contains(&word) {
            tags.push(word);
        }
    }

    // word -> (count, first occurrence)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let words = content
        .items()
        .flat_map(|item| [item.title.as_str(), item.description.as_str()])
        .flat_map(|text| text.split(|c: char| !c.is_alphabetic()))
        .filter(|w| w.chars().count() >= MIN_TAG_LEN)
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()));
    for (position, word) in words.enumerate() {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts
        .into_iter()
        .filter(|(word, _)| !tags.contains(word))
        .collect();
    ranked.sort_by(|(_, (ca, fa)), (_, (cb, fb))| cb.cmp(ca).then(fa.cmp(fb)));

    tags.extend(ranked.into_iter().take(limit).map(|(word, _)| word));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentItem, NodeType};

    fn timed(id: &str, label: &str, difficulty: Difficulty) -> LearningNode {
        let mut node = LearningNode::new(id, id, NodeType::Core);
        node.estimated_time = label.to_string();
        node.difficulty = difficulty;
        node
    }

    #[test]
    fn parse_hours_takes_first_integer() {
        assert_eq!(parse_hours("4-6 hours"), Some(4));
        assert_eq!(parse_hours("about 12 hours"), Some(12));
        assert_eq!(parse_hours("0 hours"), Some(0));
        assert_eq!(parse_hours("a while"), None);
        assert_eq!(parse_hours(""), None);
    }

    #[test]
    fn oversized_hours_saturate() {
        assert_eq!(parse_hours("99999999999 hours"), Some(u32::MAX));
        assert_eq!(parse_hours("4294967295 hours"), Some(u32::MAX));
        assert_eq!(parse_hours("4294967294 hours"), Some(u32::MAX - 1));

        let nodes = vec![
            timed("a", "99999999999 hours", Difficulty::Beginner),
            timed("b", "3 hours", Difficulty::Beginner),
        ];
        assert_eq!(total_hours(&nodes), u32::MAX);
    }

    #[test]
    fn duration_switches_to_weeks_above_threshold() {
        let config = SummaryConfig::default();
        assert_eq!(format_duration(12, &config), "12 hours");
        assert_eq!(format_duration(40, &config), "40 hours");
        assert_eq!(format_duration(41, &config), "5 weeks");
        assert_eq!(format_duration(90, &config), "9 weeks");
    }

    #[test]
    fn unparseable_labels_count_as_zero() {
        let nodes = vec![
            timed("a", "2-3 hours", Difficulty::Beginner),
            timed("b", "soon", Difficulty::Beginner),
            timed("c", "8-12 hours", Difficulty::Beginner),
        ];
        assert_eq!(total_hours(&nodes), 10);
    }

    #[test]
    fn difficulty_is_the_maximum() {
        assert_eq!(overall_difficulty(&[]), Difficulty::Beginner);
        let nodes = vec![
            timed("a", "", Difficulty::Intermediate),
            timed("b", "", Difficulty::Expert),
            timed("c", "", Difficulty::Advanced),
        ];
        assert_eq!(overall_difficulty(&nodes), Difficulty::Expert);
    }

    #[test]
    fn completion_rate_rounds() {
        assert_eq!(completion_rate(&[]), 0);
        let mut nodes = vec![
            timed("a", "", Difficulty::Beginner),
            timed("b", "", Difficulty::Beginner),
            timed("c", "", Difficulty::Beginner),
        ];
        nodes[0].status = NodeStatus::Completed;
        assert_eq!(completion_rate(&nodes), 33);
        nodes[1].status = NodeStatus::Completed;
        assert_eq!(completion_rate(&nodes), 67);
    }

    #[test]
    fn tags_start_with_topic_then_frequent_words() {
        let mut content = CategorizedContent::new("Rust Async");
        content.core_topics = vec![
            ContentItem::new("Futures", "Polling futures with an executor"),
            ContentItem::new("Executors", "Build an executor with futures"),
            ContentItem::new("Pinning", "Why pinning matters for async"),
        ];

        let tags = extract_tags(&content, 3);
        assert_eq!(tags, vec!["rust", "async", "futures", "executor", "pinning"]);
    }

    #[test]
    fn tags_ignore_short_and_stop_words() {
        let mut content = CategorizedContent::new("Go");
        content.prerequisites = vec![ContentItem::new("With this from that", "the a of it")];
        assert_eq!(extract_tags(&content, 5), vec!["go"]);
    }

    #[test]
    fn summarize_fills_every_field() {
        let content = CategorizedContent::new("Rust");
        let nodes = vec![
            timed("a", "4-6 hours", Difficulty::Intermediate),
            timed("b", "8-12 hours", Difficulty::Advanced),
        ];
        let meta = summarize(&content, &nodes, &SummaryConfig::default());
        assert_eq!(meta.total_nodes, 2);
        assert_eq!(meta.estimated_duration, "12 hours");
        assert_eq!(meta.difficulty, Difficulty::Advanced);
        assert_eq!(meta.tags, vec!["rust"]);
        assert_eq!(meta.completion_rate, 0);
    }
}
