//! Crossing minimization by the median heuristic.
//!
//! # Algorithm
//!
//! Starting from the seed order produced by layer assignment, each round
//! runs two sweeps:
//!
//! 1. **Down** (layers `1..=max`): every node in layer `i` is keyed by the
//!    median index of its incoming neighbors in layer `i-1`.
//! 2. **Up** (layers `max-1..=0`): every node in layer `i` is keyed by the
//!    median index of its outgoing neighbors in layer `i+1`.
//!
//! Layers are re-sorted by key with a stable sort, so equal keys keep the
//! previous relative order. A node without neighbors in the adjacent layer
//! gets [`UNPLACED`], which sorts after every real key.
//!
//! Keys live in a per-layer side table and every sweep returns a fresh
//! layer vector; nodes themselves are never touched. No randomness is
//! involved, so the same input always yields the same order.
//!
//! Neighbors come from all connections (prerequisite and hint edges alike).
//! Connections naming ids absent from the layers are ignored.

#![allow(clippy::cast_precision_loss)]

use std::collections::{HashMap, HashSet};

use tracing::{instrument, trace};

use crate::model::Connection;

/// Sort key for nodes without a neighbor in the adjacent layer.
pub const UNPLACED: f64 = f64::INFINITY;

/// Incoming and outgoing neighbor ids per node, de-duplicated, in
/// connection order.
#[derive(Debug, Default)]
struct Neighbors<'c> {
    incoming: HashMap<&'c str, Vec<&'c str>>,
    outgoing: HashMap<&'c str, Vec<&'c str>>,
}

impl<'c> Neighbors<'c> {
    fn from_connections(connections: &'c [Connection], known: &HashSet<&str>) -> Self {
        let mut neighbors = Self::default();
        for conn in connections {
            let (from, to) = conn.endpoints();
            if !known.contains(from) || !known.contains(to) {
                continue;
            }
            push_unique(neighbors.outgoing.entry(from).or_default(), to);
            push_unique(neighbors.incoming.entry(to).or_default(), from);
        }
        neighbors
    }
}

fn push_unique<'c>(list: &mut Vec<&'c str>, id: &'c str) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Reorder `layers` to reduce crossings between adjacent layers.
///
/// Runs `iterations` down+up rounds. The result contains exactly the ids of
/// `layers`, layer by layer, in the optimized order.
#[must_use]
#[instrument(skip_all, fields(layers = layers.len(), iterations))]
pub fn minimize_crossings(
    layers: &[Vec<String>],
    connections: &[Connection],
    iterations: usize,
) -> Vec<Vec<String>> {
    let known: HashSet<&str> = layers.iter().flatten().map(String::as_str).collect();
    let neighbors = Neighbors::from_connections(connections, &known);

    let mut current: Vec<Vec<&str>> = layers
        .iter()
        .map(|layer| layer.iter().map(String::as_str).collect())
        .collect();

    for round in 0..iterations {
        current = sweep_down(&current, &neighbors.incoming);
        current = sweep_up(&current, &neighbors.outgoing);
        trace!(round, "crossing minimization round complete");
    }

    current
        .into_iter()
        .map(|layer| layer.into_iter().map(str::to_string).collect())
        .collect()
}

/// One downward sweep: layer `i` follows the order of layer `i-1`.
fn sweep_down<'a>(
    layers: &[Vec<&'a str>],
    incoming: &HashMap<&str, Vec<&str>>,
) -> Vec<Vec<&'a str>> {
    let mut next: Vec<Vec<&'a str>> = Vec::with_capacity(layers.len());
    for layer in layers {
        let reordered = match next.last() {
            Some(above) => reorder_layer(layer, above, incoming),
            None => layer.clone(),
        };
        next.push(reordered);
    }
    next
}

/// One upward sweep: layer `i` follows the order of layer `i+1`.
fn sweep_up<'a>(
    layers: &[Vec<&'a str>],
    outgoing: &HashMap<&str, Vec<&str>>,
) -> Vec<Vec<&'a str>> {
    let mut next: Vec<Vec<&'a str>> = layers.to_vec();
    for i in (0..layers.len().saturating_sub(1)).rev() {
        let reordered = reorder_layer(&next[i], &next[i + 1], outgoing);
        next[i] = reordered;
    }
    next
}

/// Stable-sort `layer` by the median position of each node's neighbors in
/// `reference`.
fn reorder_layer<'a>(
    layer: &[&'a str],
    reference: &[&str],
    adjacent: &HashMap<&str, Vec<&str>>,
) -> Vec<&'a str> {
    let position: HashMap<&str, usize> = reference
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i))
        .collect();

    let keys: HashMap<&str, f64> = layer
        .iter()
        .map(|id| {
            let mut indices: Vec<usize> = adjacent
                .get(id)
                .into_iter()
                .flatten()
                .filter_map(|n| position.get(n).copied())
                .collect();
            (*id, median(&mut indices).unwrap_or(UNPLACED))
        })
        .collect();

    let key = |id: &str| keys.get(id).copied().unwrap_or(UNPLACED);
    let mut ordered = layer.to_vec();
    ordered.sort_by(|a, b| key(*a).total_cmp(&key(*b)));
    ordered
}

/// Median of `indices`; the mean of the two middle values for even counts.
fn median(indices: &mut [usize]) -> Option<f64> {
    if indices.is_empty() {
        return None;
    }
    indices.sort_unstable();
    let mid = indices.len() / 2;
    if indices.len() % 2 == 1 {
        Some(indices[mid] as f64)
    } else {
        Some((indices[mid - 1] + indices[mid]) as f64 / 2.0)
    }
}

/// Count pairwise crossings between edges joining adjacent layers.
///
/// Connections spanning more than one layer, within one layer, or naming
/// unknown ids are not counted. Duplicate endpoint pairs count once.
#[must_use]
pub fn count_crossings(layers: &[Vec<String>], connections: &[Connection]) -> usize {
    let mut slot: HashMap<&str, (usize, usize)> = HashMap::new();
    for (depth, layer) in layers.iter().enumerate() {
        for (index, id) in layer.iter().enumerate() {
            slot.insert(id.as_str(), (depth, index));
        }
    }

    // upper layer depth -> set of (upper index, lower index)
    let mut spans: HashMap<usize, HashSet<(usize, usize)>> = HashMap::new();
    for conn in connections {
        let from = slot.get(conn.from.as_str()).copied();
        let to = slot.get(conn.to.as_str()).copied();
        let (Some((da, ia)), Some((db, ib))) = (from, to) else {
            continue;
        };
        let (upper, segment) = if da + 1 == db {
            (da, (ia, ib))
        } else if db + 1 == da {
            (db, (ib, ia))
        } else {
            continue;
        };
        spans.entry(upper).or_default().insert(segment);
    }

    spans
        .values()
        .map(|segments| {
            let segments: Vec<&(usize, usize)> = segments.iter().collect();
            let mut crossings = 0;
            for (i, a) in segments.iter().enumerate() {
                for b in &segments[i + 1..] {
                    if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                        crossings += 1;
                    }
                }
            }
            crossings
        })
        .sum()
}
