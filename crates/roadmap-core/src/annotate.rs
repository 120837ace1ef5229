//! Per-node annotations: time estimate, difficulty, resources and skills.
//!
//! Resource and skill generation belongs to an external collaborator. The
//! builder only needs a pure function `item -> annotation`, expressed here
//! as the [`Annotator`] trait. [`TemplateAnnotator`] is the deterministic
//! stand-in used when no richer provider is wired in.

use crate::model::{ContentItem, Difficulty, NodeType, Resource, ResourceKind};

/// Words that bump a node one difficulty step.
const ESCALATION_KEYWORDS: &[&str] = &[
    "advanced",
    "optimization",
    "distributed",
    "internals",
    "architecture",
];

const MAX_SKILLS: usize = 3;

/// Annotation attached to one node at build time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotation {
    /// Label such as `"4-6 hours"`; the summary parses its first number.
    pub estimated_time: String,
    pub difficulty: Difficulty,
    pub resources: Vec<Resource>,
    pub skills: Vec<String>,
}

/// Source of per-node annotations.
///
/// Implementations must be pure: the same item and type always yield the
/// same annotation, otherwise roadmap generation stops being reproducible.
pub trait Annotator {
    fn annotate(&self, item: &ContentItem, node_type: NodeType) -> Annotation;
}

impl<F> Annotator for F
where
    F: Fn(&ContentItem, NodeType) -> Annotation,
{
    fn annotate(&self, item: &ContentItem, node_type: NodeType) -> Annotation {
        self(item, node_type)
    }
}

/// Template-based annotator with fixed per-type estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateAnnotator;

impl TemplateAnnotator {
    const fn base(node_type: NodeType) -> (&'static str, Difficulty) {
        match node_type {
            NodeType::Prerequisite => ("2-3 hours", Difficulty::Beginner),
            NodeType::Core => ("4-6 hours", Difficulty::Intermediate),
            NodeType::Project => ("8-12 hours", Difficulty::Intermediate),
            NodeType::Advanced => ("6-10 hours", Difficulty::Advanced),
            NodeType::Milestone => ("0 hours", Difficulty::Beginner),
        }
    }
}

impl Annotator for TemplateAnnotator {
    fn annotate(&self, item: &ContentItem, node_type: NodeType) -> Annotation {
        let (time, base) = Self::base(node_type);

        if node_type == NodeType::Milestone {
            return Annotation {
                estimated_time: time.to_string(),
                difficulty: base,
                resources: Vec::new(),
                skills: Vec::new(),
            };
        }

        let text = format!("{} {}", item.title, item.description).to_lowercase();
        let difficulty = if ESCALATION_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            base.step_up()
        } else {
            base
        };

        Annotation {
            estimated_time: time.to_string(),
            difficulty,
            resources: template_resources(&item.title),
            skills: extract_skills(&item.title),
        }
    }
}

fn template_resources(title: &str) -> Vec<Resource> {
    vec![
        Resource {
            title: format!("Reading: {title}"),
            kind: ResourceKind::Article,
            url: None,
        },
        Resource {
            title: format!("Walkthrough: {title}"),
            kind: ResourceKind::Video,
            url: None,
        },
        Resource {
            title: format!("Exercises: {title}"),
            kind: ResourceKind::Practice,
            url: None,
        },
    ]
}

/// Capitalized or long words from a title, in order, without repeats.
fn extract_skills(title: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for word in title.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        if !(capitalized || word.chars().count() >= 6) {
            continue;
        }
        if skills.iter().any(|s| s.eq_ignore_ascii_case(word)) {
            continue;
        }
        skills.push(word.to_string());
        if skills.len() == MAX_SKILLS {
            break;
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_estimates_by_type() {
        let item = ContentItem::new("Ownership", "Moves and borrows");
        let core = TemplateAnnotator.annotate(&item, NodeType::Core);
        assert_eq!(core.estimated_time, "4-6 hours");
        assert_eq!(core.difficulty, Difficulty::Intermediate);
        assert_eq!(core.resources.len(), 3);

        let milestone = TemplateAnnotator.annotate(&item, NodeType::Milestone);
        assert_eq!(milestone.estimated_time, "0 hours");
        assert!(milestone.resources.is_empty());
        assert!(milestone.skills.is_empty());
    }

    #[test]
    fn escalation_keyword_steps_difficulty_up() {
        let item = ContentItem::new("Allocator internals", "");
        let ann = TemplateAnnotator.annotate(&item, NodeType::Advanced);
        assert_eq!(ann.difficulty, Difficulty::Expert);
    }

    #[test]
    fn skills_keep_capitalized_and_long_words() {
        let skills = extract_skills("Async Rust with futures and executors");
        assert_eq!(skills, vec!["Async", "Rust", "futures"]);
    }

    #[test]
    fn closures_are_annotators() {
        let fixed = |_: &ContentItem, _: NodeType| Annotation {
            estimated_time: "1 hours".into(),
            ..Annotation::default()
        };
        let ann = fixed.annotate(&ContentItem::default(), NodeType::Core);
        assert_eq!(ann.estimated_time, "1 hours");
    }
}
