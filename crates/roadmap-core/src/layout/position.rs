//! Coordinate assignment for ordered layers.
//!
//! Layer `d` is drawn at `y = d * v_gap`. Inside a layer of `L` nodes the
//! node at index `i` gets `x = i * h_gap - ((L - 1) * h_gap) / 2`, so every
//! layer is centered on `x = 0` independently of its width.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::model::{LearningNode, Position};

/// Compute a position for every id in `layers`.
#[must_use]
pub fn assign_coordinates(layers: &[Vec<String>], config: &LayoutConfig) -> HashMap<String, Position> {
    let mut positions = HashMap::with_capacity(layers.iter().map(Vec::len).sum());

    for (depth, layer) in layers.iter().enumerate() {
        let y = depth as f64 * config.v_gap;
        let offset = (layer.len().saturating_sub(1)) as f64 * config.h_gap / 2.0;
        for (index, id) in layer.iter().enumerate() {
            let x = (index as f64).mul_add(config.h_gap, -offset);
            positions.insert(id.clone(), Position::new(x, y));
        }
    }

    positions
}

/// Write `positions` onto matching nodes. Nodes without an entry keep
/// their current position.
pub fn apply_positions(nodes: &mut [LearningNode], positions: &HashMap<String, Position>) {
    for node in nodes {
        if let Some(position) = positions.get(&node.id) {
            node.position = *position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeType;

    fn config() -> LayoutConfig {
        LayoutConfig {
            h_gap: 100.0,
            v_gap: 50.0,
            iterations: 3,
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn single_node_sits_at_origin() {
        let positions = assign_coordinates(&[ids(&["only"])], &config());
        assert_eq!(positions["only"], Position::new(0.0, 0.0));
    }

    #[test]
    fn layers_are_centered_on_zero() {
        let layers = vec![ids(&["a"]), ids(&["b", "c"]), ids(&["d", "e", "f"])];
        let positions = assign_coordinates(&layers, &config());

        assert_eq!(positions["a"], Position::new(0.0, 0.0));
        assert_eq!(positions["b"], Position::new(-50.0, 50.0));
        assert_eq!(positions["c"], Position::new(50.0, 50.0));
        assert_eq!(positions["d"], Position::new(-100.0, 100.0));
        assert_eq!(positions["e"], Position::new(0.0, 100.0));
        assert_eq!(positions["f"], Position::new(100.0, 100.0));
    }

    #[test]
    fn empty_layout_is_empty() {
        assert!(assign_coordinates(&[], &config()).is_empty());
    }

    #[test]
    fn apply_positions_updates_only_known_nodes() {
        let mut nodes = vec![
            LearningNode::new("a", "A", NodeType::Core),
            LearningNode::new("b", "B", NodeType::Core),
        ];
        nodes[1].position = Position::new(7.0, 7.0);
        let positions = HashMap::from([("a".to_string(), Position::new(3.0, 4.0))]);

        apply_positions(&mut nodes, &positions);
        assert_eq!(nodes[0].position, Position::new(3.0, 4.0));
        assert_eq!(nodes[1].position, Position::new(7.0, 7.0));
    }
}
