// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node placement for conversation graphs.
//!
//! The graph builder only talks to placement through [`LayoutEngine`], so the
//! layered engine in [`layered`] can be swapped for any other hierarchical layout.
//! [`layout_elements`] owns the parts that do not depend on the engine: node
//! footprints, the empty-graph guard, and the centre to top-left re-anchoring.

pub mod layered;

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::graph::{Dimensions, GraphBatch, Position};
use crate::model::ids::NodeId;

pub use layered::LayeredLayout;

/// Footprint used for nodes the rendering surface has not measured yet.
pub const DEFAULT_NODE_SIZE: Dimensions = Dimensions { width: 200.0, height: 180.0 };
pub const DEFAULT_RANK_SEP: f64 = 50.0;
pub const DEFAULT_NODE_SEP: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum LayoutDirection {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl LayoutDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }

    /// Whether successive layers advance along the y axis.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }

    /// Whether layers advance towards negative coordinates.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout direction {0:?} (expected TB, BT, LR or RL)")]
pub struct ParseLayoutDirectionError(String);

impl FromStr for LayoutDirection {
    type Err = ParseLayoutDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopToBottom),
            "BT" => Ok(Self::BottomToTop),
            "LR" => Ok(Self::LeftToRight),
            "RL" => Ok(Self::RightToLeft),
            _ => Err(ParseLayoutDirectionError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LayoutSettings {
    pub direction: LayoutDirection,
    /// Gap between consecutive layers.
    pub rank_sep: f64,
    /// Gap between neighbours within a layer.
    pub node_sep: f64,
    pub default_node_size: Dimensions,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::default(),
            rank_sep: DEFAULT_RANK_SEP,
            node_sep: DEFAULT_NODE_SEP,
            default_node_size: DEFAULT_NODE_SIZE,
        }
    }
}

/// A node as advertised to a layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutNode<'a> {
    pub id: &'a NodeId,
    pub size: Dimensions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEdge<'a> {
    pub source: &'a NodeId,
    pub target: &'a NodeId,
}

/// A hierarchical graph-layout algorithm.
pub trait LayoutEngine {
    /// Returns the centre point of every node, in the order of `nodes`.
    ///
    /// Edges may reference ids that are not in `nodes`; such edges must be ignored.
    /// The result must depend only on the inputs.
    fn place(
        &self,
        nodes: &[LayoutNode<'_>],
        edges: &[LayoutEdge<'_>],
        direction: LayoutDirection,
    ) -> Vec<Position>;
}

/// Positions every node of `batch` and returns it with edges untouched.
///
/// Engine positions are node centres. Nodes are advertised with their measured
/// size, else the default footprint, but only a measured size shifts the result to
/// the top-left corner (`x - width / 2`, `y - height / 2`). Unmeasured nodes keep
/// the engine centre until the rendering surface reports a size.
pub fn layout_elements<E: LayoutEngine + ?Sized>(
    mut batch: GraphBatch,
    engine: &E,
    settings: &LayoutSettings,
) -> GraphBatch {
    if batch.nodes.is_empty() {
        return GraphBatch::default();
    }

    let sizes = batch
        .nodes
        .iter()
        .map(|node| node.measured().unwrap_or(settings.default_node_size))
        .collect::<Vec<_>>();

    let centres = {
        let nodes = batch
            .nodes
            .iter()
            .zip(&sizes)
            .map(|(node, size)| LayoutNode { id: node.id(), size: *size })
            .collect::<Vec<_>>();
        let edges = batch
            .edges
            .iter()
            .map(|edge| LayoutEdge { source: edge.source(), target: edge.target() })
            .collect::<Vec<_>>();
        engine.place(&nodes, &edges, settings.direction)
    };

    if centres.len() != batch.nodes.len() {
        tracing::warn!(
            expected = batch.nodes.len(),
            actual = centres.len(),
            "layout engine returned a different number of positions; missing ones default to the origin"
        );
    }

    for (idx, node) in batch.nodes.iter_mut().enumerate() {
        let centre = centres.get(idx).copied().unwrap_or(Position::ORIGIN);
        let shift = node.measured().unwrap_or(Dimensions::ZERO);
        node.set_position(top_left_of(centre, shift));
    }

    tracing::trace!(
        nodes = batch.nodes.len(),
        edges = batch.edges.len(),
        direction = %settings.direction,
        "layout pass"
    );

    batch
}

/// Converts a centre-anchored position to a top-left anchored one.
pub fn top_left_of(centre: Position, size: Dimensions) -> Position {
    Position::new(centre.x - size.width / 2.0, centre.y - size.height / 2.0)
}
