//! Typed entities shared by every stage of roadmap generation.
//!
//! All types serialize to the camelCase JSON consumed by renderers. The
//! structure is a graph of ids: nodes reference each other only by string id,
//! never by pointer, so a [`Roadmap`] serializes without cycles.

pub mod connection;
pub mod content;
pub mod node;
pub mod roadmap;

pub use connection::{Connection, ConnectionType};
pub use content::{CategorizedContent, ContentItem};
pub use node::{Difficulty, LearningNode, NodeStatus, NodeType, Position, Resource, ResourceKind};
pub use roadmap::{Roadmap, RoadmapMetadata};
