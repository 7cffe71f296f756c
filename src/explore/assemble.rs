// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Turns messages into graph node/edge batches.
//!
//! A message contributes to the graph only if it is an assistant message with a
//! suggestions annotation. It becomes one root node, one node per suggestion, a
//! `suggestion` edge from the root to each suggestion and, for branch
//! continuations, a `branching...` edge from the clicked suggestion to the root.
//! No deduplication happens here.

use super::extract::{extract_suggestions, ExtractedSuggestions};
use crate::model::graph::{EdgeLabel, GraphBatch, GraphEdge, GraphNode, NodeKind};
use crate::model::ids::NodeId;
use crate::model::message::{Message, Role};

pub const DEFAULT_LABEL_MAX_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assembler {
    label_max_chars: usize,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_MAX_CHARS)
    }
}

impl Assembler {
    pub fn new(label_max_chars: usize) -> Self {
        Self { label_max_chars }
    }

    pub fn label_max_chars(&self) -> usize {
        self.label_max_chars
    }

    /// Root node label: the message text cut to `label_max_chars` characters.
    pub fn message_label(&self, message: &Message) -> String {
        match message.display_text() {
            Some(text) => truncate_label(text, self.label_max_chars),
            None => format!("Msg: {}{ELLIPSIS}", message.id().short()),
        }
    }

    /// Builds the batch for a message whose suggestions were already extracted.
    pub fn assemble(&self, message: &Message, extracted: &ExtractedSuggestions<'_>) -> GraphBatch {
        let root_id = NodeId::from(message.id().clone());

        let mut nodes = Vec::with_capacity(extracted.suggestions.len() + 1);
        let mut edges = Vec::with_capacity(extracted.suggestions.len() + 1);
        nodes.push(GraphNode::new(root_id.clone(), self.message_label(message), NodeKind::Message));

        for suggestion in extracted.suggestions {
            let suggestion_id = NodeId::from(suggestion.id().clone());
            edges.push(GraphEdge::new(
                root_id.clone(),
                suggestion_id.clone(),
                Some(EdgeLabel::Suggestion),
            ));
            nodes.push(GraphNode::new(suggestion_id, suggestion.content(), NodeKind::Suggestion));
        }

        if let Some(origin) = extracted.from_suggestion_id {
            edges.push(GraphEdge::new(
                NodeId::from(origin.clone()),
                root_id,
                Some(EdgeLabel::Branching),
            ));
        }

        GraphBatch::new(nodes, edges)
    }

    /// Builds the batch for `message`, or `None` if it does not belong in the graph.
    pub fn assemble_message(&self, message: &Message) -> Option<GraphBatch> {
        if message.role() != Role::Assistant {
            return None;
        }
        let extracted = extract_suggestions(message)?;
        Some(self.assemble(message, &extracted))
    }

    /// Builds one batch covering a whole transcript, in message order.
    pub fn assemble_history<'a>(
        &self,
        messages: impl IntoIterator<Item = &'a Message>,
    ) -> GraphBatch {
        let mut batch = GraphBatch::default();
        for message in messages {
            match self.assemble_message(message) {
                Some(part) => batch.extend(part),
                None => tracing::debug!(message_id = %message.id(), "message not part of the graph"),
            }
        }
        batch
    }
}

/// Keeps the first `max_chars` characters of `text`, marking the cut with `...`.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_owned(),
    }
}
