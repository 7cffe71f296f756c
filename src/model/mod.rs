// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Chat messages (with their parsed annotations) go in; graph nodes and edges come out.

pub mod annotation;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod message;

pub use annotation::{Annotation, Suggestion};
pub use graph::{Dimensions, EdgeLabel, GraphBatch, GraphEdge, GraphNode, NodeKind, Position};
pub use ids::{EdgeId, Id, IdError, MessageId, NodeId, SuggestionId};
pub use message::{Message, MessagePart, Role, SourceRef};
