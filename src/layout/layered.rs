// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic layered (Sugiyama-style) placement.
//!
//! - Orders nodes topologically, ties broken by input order. Cycles are broken by
//!   forcing the earliest remaining node, so malformed branch references never fail.
//! - Assigns layers by longest path over forward edges.
//! - Orders each layer with one downward barycenter sweep.
//! - Packs layers into bands sized by their largest node and centres every layer
//!   on the widest one.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use smallvec::SmallVec;

use super::{
    LayoutDirection, LayoutEdge, LayoutEngine, LayoutNode, LayoutSettings, DEFAULT_NODE_SEP,
    DEFAULT_RANK_SEP,
};
use crate::model::graph::{Dimensions, Position};

type Adjacency = Vec<SmallVec<[usize; 4]>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayeredLayout {
    rank_sep: f64,
    node_sep: f64,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self::new(DEFAULT_RANK_SEP, DEFAULT_NODE_SEP)
    }
}

impl LayeredLayout {
    pub fn new(rank_sep: f64, node_sep: f64) -> Self {
        Self { rank_sep: rank_sep.max(0.0), node_sep: node_sep.max(0.0) }
    }

    pub fn from_settings(settings: &LayoutSettings) -> Self {
        Self::new(settings.rank_sep, settings.node_sep)
    }

    pub fn rank_sep(&self) -> f64 {
        self.rank_sep
    }

    pub fn node_sep(&self) -> f64 {
        self.node_sep
    }
}

/// Nodes grouped by layer, in their final in-layer order. Entries are indices into
/// the node slice the layering was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layering {
    layers: Vec<Vec<usize>>,
}

impl Layering {
    pub fn layers(&self) -> &[Vec<usize>] {
        &self.layers
    }
}

fn build_outgoing(nodes: &[LayoutNode<'_>], edges: &[LayoutEdge<'_>]) -> Adjacency {
    let mut index = HashMap::<&str, usize>::with_capacity(nodes.len());
    for (idx, node) in nodes.iter().enumerate() {
        index.entry(node.id.as_str()).or_insert(idx);
    }

    let mut outgoing: Adjacency = vec![SmallVec::new(); nodes.len()];
    let mut dangling = 0usize;
    for edge in edges {
        let (Some(&from), Some(&to)) =
            (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        else {
            dangling += 1;
            continue;
        };
        if from != to {
            outgoing[from].push(to);
        }
    }

    for tos in outgoing.iter_mut() {
        tos.sort_unstable();
        tos.dedup();
    }

    if dangling > 0 {
        tracing::trace!(dangling, "ignoring edges with endpoints outside the layout pass");
    }

    outgoing
}

fn topo_order(outgoing: &Adjacency) -> Vec<usize> {
    let node_count = outgoing.len();
    let mut indegree = vec![0usize; node_count];
    for tos in outgoing {
        for &to in tos {
            indegree[to] += 1;
        }
    }

    let mut ready = indegree
        .iter()
        .enumerate()
        .filter_map(|(idx, degree)| (*degree == 0).then_some(idx))
        .collect::<BTreeSet<_>>();
    let mut visited = vec![false; node_count];
    let mut topo = Vec::<usize>::with_capacity(node_count);

    while topo.len() < node_count {
        let next = match ready.pop_first() {
            Some(next) => next,
            None => {
                let Some(forced) = visited.iter().position(|seen| !seen) else {
                    break;
                };
                tracing::trace!(node = forced, "breaking cycle");
                forced
            }
        };
        if visited[next] {
            continue;
        }
        visited[next] = true;
        topo.push(next);

        for &to in &outgoing[next] {
            let degree = &mut indegree[to];
            *degree = degree.saturating_sub(1);
            if *degree == 0 && !visited[to] {
                ready.insert(to);
            }
        }
    }

    topo
}

fn assign_layers(topo: &[usize], outgoing: &Adjacency) -> Vec<usize> {
    let mut rank_in_topo = vec![0usize; outgoing.len()];
    for (rank, &node) in topo.iter().enumerate() {
        rank_in_topo[node] = rank;
    }

    let mut layers = vec![0usize; outgoing.len()];
    for &from in topo {
        let from_layer = layers[from];
        for &to in &outgoing[from] {
            // Edges pointing back in the order only exist when a cycle was broken.
            if rank_in_topo[to] > rank_in_topo[from] {
                layers[to] = layers[to].max(from_layer + 1);
            }
        }
    }

    layers
}

fn barycenter(
    node: usize,
    prev_positions: &[Option<usize>],
    predecessors: &Adjacency,
) -> Option<(usize, usize)> {
    let (sum, count) = predecessors[node]
        .iter()
        .filter_map(|pred| prev_positions[*pred])
        .fold((0usize, 0usize), |(sum, count), pos| (sum + pos, count + 1));
    (count > 0).then_some((sum, count))
}

fn sort_layer_by_barycenter(
    layer_nodes: &mut [usize],
    prev_positions: &[Option<usize>],
    predecessors: &Adjacency,
) {
    layer_nodes.sort_by(|&a, &b| {
        let bary_a = barycenter(a, prev_positions, predecessors);
        let bary_b = barycenter(b, prev_positions, predecessors);

        match (bary_a, bary_b) {
            (None, None) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((sum_a, count_a)), Some((sum_b, count_b))) => {
                // sum_a/count_a vs sum_b/count_b without floats.
                let left = (sum_a as u128) * (count_b as u128);
                let right = (sum_b as u128) * (count_a as u128);
                left.cmp(&right).then_with(|| a.cmp(&b))
            }
        }
    });
}

/// Computes layers and in-layer order for one layout pass.
pub fn assign_layering(nodes: &[LayoutNode<'_>], edges: &[LayoutEdge<'_>]) -> Layering {
    if nodes.is_empty() {
        return Layering { layers: Vec::new() };
    }

    let outgoing = build_outgoing(nodes, edges);
    let topo = topo_order(&outgoing);
    let node_layers = assign_layers(&topo, &outgoing);

    let mut predecessors: Adjacency = vec![SmallVec::new(); nodes.len()];
    for (from, tos) in outgoing.iter().enumerate() {
        for &to in tos {
            if node_layers[to] > node_layers[from] {
                predecessors[to].push(from);
            }
        }
    }

    let max_layer = node_layers.iter().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::<usize>::new(); max_layer + 1];
    // Input order within each layer to start with.
    for (node, &layer) in node_layers.iter().enumerate() {
        layers[layer].push(node);
    }

    let mut prev_positions = vec![None; nodes.len()];
    for layer_idx in 1..layers.len() {
        prev_positions.fill(None);
        for (pos, &node) in layers[layer_idx - 1].iter().enumerate() {
            prev_positions[node] = Some(pos);
        }
        sort_layer_by_barycenter(&mut layers[layer_idx], &prev_positions, &predecessors);
    }

    Layering { layers }
}

/// `(extent along the rank axis, extent across it)`.
fn extents(size: Dimensions, vertical: bool) -> (f64, f64) {
    if vertical {
        (size.height, size.width)
    } else {
        (size.width, size.height)
    }
}

impl LayoutEngine for LayeredLayout {
    fn place(
        &self,
        nodes: &[LayoutNode<'_>],
        edges: &[LayoutEdge<'_>],
        direction: LayoutDirection,
    ) -> Vec<Position> {
        if nodes.is_empty() {
            return Vec::new();
        }

        let layering = assign_layering(nodes, edges);
        let vertical = direction.is_vertical();

        let thickness = layering
            .layers()
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|&node| extents(nodes[node].size, vertical).0)
                    .fold(0.0, f64::max)
            })
            .collect::<Vec<_>>();
        let spans = layering
            .layers()
            .iter()
            .map(|layer| {
                let total = layer
                    .iter()
                    .map(|&node| extents(nodes[node].size, vertical).1)
                    .sum::<f64>();
                total + self.node_sep * layer.len().saturating_sub(1) as f64
            })
            .collect::<Vec<_>>();
        let widest = spans.iter().copied().fold(0.0, f64::max);
        let total_rank = thickness.iter().sum::<f64>()
            + self.rank_sep * layering.layers().len().saturating_sub(1) as f64;

        let mut centres = vec![Position::ORIGIN; nodes.len()];
        let mut rank_cursor = 0.0;
        for (layer_idx, layer) in layering.layers().iter().enumerate() {
            let mut rank_centre = rank_cursor + thickness[layer_idx] / 2.0;
            if direction.is_reversed() {
                rank_centre = total_rank - rank_centre;
            }

            let mut cross_cursor = (widest - spans[layer_idx]) / 2.0;
            for &node in layer {
                let cross = extents(nodes[node].size, vertical).1;
                let cross_centre = cross_cursor + cross / 2.0;
                cross_cursor += cross + self.node_sep;

                centres[node] = if vertical {
                    Position::new(cross_centre, rank_centre)
                } else {
                    Position::new(rank_centre, cross_centre)
                };
            }

            rank_cursor += thickness[layer_idx] + self.rank_sep;
        }

        centres
    }
}
