//! Layered layout: crossing minimization and coordinates.
//!
//! [`order`] permutes each layer with median sweeps, [`position`] turns the
//! final order into centered coordinates. [`Layout::compute`] runs both.

pub mod order;
pub mod position;

use std::collections::HashMap;

use tracing::instrument;

use crate::config::LayoutConfig;
use crate::model::{Connection, Position};

pub use order::{UNPLACED, count_crossings, minimize_crossings};
pub use position::{apply_positions, assign_coordinates};

/// Final layer order and the coordinate of every placed node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    /// Ids per layer after crossing minimization.
    pub layers: Vec<Vec<String>>,
    /// Coordinate of every placed node, keyed by id.
    pub positions: HashMap<String, Position>,
}

impl Layout {
    /// Order `seed_layers` and assign coordinates.
    #[must_use]
    #[instrument(skip_all, fields(layers = seed_layers.len()))]
    pub fn compute(
        seed_layers: &[Vec<String>],
        connections: &[Connection],
        config: &LayoutConfig,
    ) -> Self {
        let layers = minimize_crossings(seed_layers, connections, config.iterations);
        let positions = assign_coordinates(&layers, config);
        Self { layers, positions }
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }
}
