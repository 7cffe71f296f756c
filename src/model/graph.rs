// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node/edge types consumed by the graph-rendering surface.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Message,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphNode {
    #[schemars(with = "String")]
    id: NodeId,
    label: String,
    kind: NodeKind,
    position: Position,
    /// Size reported by the rendering surface after it drew the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    measured: Option<Dimensions>,
}

impl GraphNode {
    pub fn new(id: NodeId, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            position: Position::ORIGIN,
            measured: None,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn measured(&self) -> Option<Dimensions> {
        self.measured
    }

    pub fn set_measured(&mut self, measured: Option<Dimensions>) {
        self.measured = measured;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EdgeLabel {
    /// Message to one of its follow-up suggestions.
    #[serde(rename = "suggestion")]
    Suggestion,
    /// Clicked suggestion to the message it spawned.
    #[serde(rename = "branching...")]
    Branching,
}

impl EdgeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suggestion => "suggestion",
            Self::Branching => "branching...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GraphEdge {
    #[schemars(with = "String")]
    id: EdgeId,
    #[schemars(with = "String")]
    source: NodeId,
    #[schemars(with = "String")]
    target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<EdgeLabel>,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId, label: Option<EdgeLabel>) -> Self {
        Self {
            id: EdgeId::between(&source, &target),
            source,
            target,
            label,
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn label(&self) -> Option<EdgeLabel> {
        self.label
    }
}

/// The `{nodes, edges}` pair handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GraphBatch {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphBatch {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn extend(&mut self, other: GraphBatch) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|edge| edge.id.as_str() == id)
    }
}
