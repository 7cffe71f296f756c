// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Running graph state for one conversation view.
//!
//! Live messages are laid out one batch at a time and appended, so nodes that are
//! already on screen never move as the conversation grows. Only hydration from a
//! stored transcript (and an explicit [`GraphAccumulator::relayout_all`]) lays out
//! the whole graph in a single pass.

use std::collections::HashSet;

use super::assemble::Assembler;
use crate::layout::{layout_elements, LayeredLayout, LayoutEngine, LayoutSettings};
use crate::model::graph::{Dimensions, GraphBatch};
use crate::model::ids::{EdgeId, MessageId, NodeId};
use crate::model::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    Empty,
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Appended { nodes: usize, edges: usize },
    /// Not an assistant message with suggestions; the graph is unchanged.
    NotInGraph,
    /// The message id was ingested before; the graph is unchanged.
    AlreadyProcessed,
}

#[derive(Debug, Clone)]
pub struct GraphAccumulator<E = LayeredLayout> {
    assembler: Assembler,
    engine: E,
    settings: LayoutSettings,
    graph: GraphBatch,
    node_ids: HashSet<NodeId>,
    edge_ids: HashSet<EdgeId>,
    processed: HashSet<MessageId>,
}

impl Default for GraphAccumulator<LayeredLayout> {
    fn default() -> Self {
        Self::new(Assembler::default(), LayoutSettings::default())
    }
}

impl GraphAccumulator<LayeredLayout> {
    pub fn new(assembler: Assembler, settings: LayoutSettings) -> Self {
        let engine = LayeredLayout::from_settings(&settings);
        Self::with_engine(assembler, engine, settings)
    }
}

impl<E: LayoutEngine> GraphAccumulator<E> {
    pub fn with_engine(assembler: Assembler, engine: E, settings: LayoutSettings) -> Self {
        Self {
            assembler,
            engine,
            settings,
            graph: GraphBatch::default(),
            node_ids: HashSet::new(),
            edge_ids: HashSet::new(),
            processed: HashSet::new(),
        }
    }

    pub fn state(&self) -> GraphState {
        if self.graph.nodes.is_empty() {
            GraphState::Empty
        } else {
            GraphState::Populated
        }
    }

    pub fn graph(&self) -> &GraphBatch {
        &self.graph
    }

    pub fn into_graph(self) -> GraphBatch {
        self.graph
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn is_processed(&self, message_id: &MessageId) -> bool {
        self.processed.contains(message_id)
    }

    /// Handles one completed message: lays out its batch on its own and appends it.
    pub fn ingest(&mut self, message: &Message) -> IngestOutcome {
        if self.processed.contains(message.id()) {
            tracing::debug!(message_id = %message.id(), "message already in graph");
            return IngestOutcome::AlreadyProcessed;
        }

        let Some(batch) = self.assembler.assemble_message(message) else {
            tracing::debug!(message_id = %message.id(), "message not part of the graph");
            return IngestOutcome::NotInGraph;
        };
        self.processed.insert(message.id().clone());

        let (nodes, edges) = self.lay_out_and_append(batch);
        tracing::debug!(message_id = %message.id(), nodes, edges, "appended message batch");
        IngestOutcome::Appended { nodes, edges }
    }

    /// Rebuilds the graph from a stored transcript with one global layout pass.
    pub fn hydrate<'a>(&mut self, messages: impl IntoIterator<Item = &'a Message>) -> IngestOutcome {
        self.reset();

        let mut batch = GraphBatch::default();
        for message in messages {
            if self.processed.contains(message.id()) {
                tracing::debug!(message_id = %message.id(), "duplicate message in transcript");
                continue;
            }
            if let Some(part) = self.assembler.assemble_message(message) {
                self.processed.insert(message.id().clone());
                batch.extend(part);
            }
        }

        if batch.is_empty() {
            return IngestOutcome::NotInGraph;
        }

        let (nodes, edges) = self.lay_out_and_append(batch);
        tracing::debug!(nodes, edges, "hydrated graph");
        IngestOutcome::Appended { nodes, edges }
    }

    /// Lays out the whole graph again, picking up measured node sizes.
    ///
    /// Node and edge identities and order are unchanged; positions may move.
    pub fn relayout_all(&mut self) {
        let graph = std::mem::take(&mut self.graph);
        self.graph = layout_elements(graph, &self.engine, &self.settings);
    }

    /// Records the size the rendering surface measured for a node.
    ///
    /// Returns `false` when no node has that id.
    pub fn set_measured(&mut self, node_id: &str, dimensions: Dimensions) -> bool {
        match self.graph.nodes.iter_mut().find(|node| node.id().as_str() == node_id) {
            Some(node) => {
                node.set_measured(Some(dimensions));
                true
            }
            None => false,
        }
    }

    /// Drops all state, returning to [`GraphState::Empty`].
    pub fn reset(&mut self) {
        self.graph = GraphBatch::default();
        self.node_ids.clear();
        self.edge_ids.clear();
        self.processed.clear();
    }

    fn lay_out_and_append(&mut self, batch: GraphBatch) -> (usize, usize) {
        let fresh = self.take_fresh(batch);
        let fresh = if fresh.nodes.is_empty() {
            fresh
        } else {
            layout_elements(fresh, &self.engine, &self.settings)
        };

        let counts = (fresh.nodes.len(), fresh.edges.len());
        self.graph.extend(fresh);
        counts
    }

    /// Drops nodes and edges whose ids are already in the graph (or earlier in `batch`).
    fn take_fresh(&mut self, batch: GraphBatch) -> GraphBatch {
        let GraphBatch { nodes, edges } = batch;

        let nodes = nodes
            .into_iter()
            .filter(|node| {
                let fresh = self.node_ids.insert(node.id().clone());
                if !fresh {
                    tracing::debug!(node_id = %node.id(), "skipping duplicate node");
                }
                fresh
            })
            .collect();
        let edges = edges
            .into_iter()
            .filter(|edge| self.edge_ids.insert(edge.id().clone()))
            .collect();

        GraphBatch::new(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::{GraphAccumulator, GraphState, IngestOutcome};
    use crate::model::fixtures::{assistant, simple_branch_conversation, user};
    use crate::model::graph::{Dimensions, EdgeLabel, Position};

    fn positions(acc: &GraphAccumulator) -> HashMap<String, Position> {
        acc.graph()
            .nodes
            .iter()
            .map(|node| (node.id().to_string(), node.position()))
            .collect()
    }

    #[test]
    fn starts_empty_and_becomes_populated() {
        let mut acc = GraphAccumulator::default();
        assert_eq!(acc.state(), GraphState::Empty);

        let outcome = acc.ingest(&assistant("m1", "Rust", &[("s1", "More")], None));
        assert_eq!(outcome, IngestOutcome::Appended { nodes: 2, edges: 1 });
        assert_eq!(acc.state(), GraphState::Populated);
    }

    #[test]
    fn non_qualifying_messages_leave_the_graph_unchanged() {
        let mut acc = GraphAccumulator::default();
        acc.ingest(&assistant("m1", "Rust", &[("s1", "More")], None));
        let before = acc.graph().clone();

        assert_eq!(acc.ingest(&user("u2", "question")), IngestOutcome::NotInGraph);
        assert_eq!(acc.graph(), &before);
    }

    #[test]
    fn appending_a_batch_does_not_move_earlier_nodes() {
        let mut acc = GraphAccumulator::default();
        acc.ingest(&assistant("m1", "Rust", &[("s1", "Tell me more"), ("s2", "X?")], None));
        let first = positions(&acc);

        acc.ingest(&assistant("m3", "Ownership", &[("s3", "Lifetimes")], Some("s1")));
        let second = positions(&acc);

        for (id, position) in &first {
            assert_eq!(second.get(id), Some(position), "node {id} moved");
        }
        assert_eq!(second.len(), 5);
    }

    #[test]
    fn branch_edges_point_at_existing_nodes_after_append() {
        let mut acc = GraphAccumulator::default();
        for message in simple_branch_conversation() {
            acc.ingest(&message);
        }

        let node_ids = acc
            .graph()
            .nodes
            .iter()
            .map(|node| node.id().as_str())
            .collect::<HashSet<_>>();
        for edge in &acc.graph().edges {
            assert!(node_ids.contains(edge.source().as_str()), "dangling source {}", edge.source());
            assert!(node_ids.contains(edge.target().as_str()), "dangling target {}", edge.target());
        }

        let branch = acc.graph().edge("s1-m3").expect("branch edge");
        assert_eq!(branch.label(), Some(EdgeLabel::Branching));
    }

    #[test]
    fn ingesting_the_same_message_twice_is_idempotent() {
        let mut acc = GraphAccumulator::default();
        let message = assistant("m1", "Rust", &[("s1", "More")], None);

        acc.ingest(&message);
        let before = acc.graph().clone();
        assert_eq!(acc.ingest(&message), IngestOutcome::AlreadyProcessed);
        assert_eq!(acc.graph(), &before);
    }

    #[test]
    fn node_ids_stay_unique() {
        let mut acc = GraphAccumulator::default();
        acc.ingest(&assistant("m1", "Rust", &[("s1", "More")], None));
        // A different message reusing a suggestion id must not duplicate the node.
        acc.ingest(&assistant("m2", "Again", &[("s1", "More")], None));

        let ids = acc.graph().nodes.iter().map(|node| node.id().as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["m1", "s1", "m2"]);
        assert_eq!(acc.graph().edges.len(), 2);
    }

    #[test]
    fn hydrate_lays_out_the_whole_history_once() {
        let conversation = simple_branch_conversation();

        let mut hydrated = GraphAccumulator::default();
        hydrated.hydrate(&conversation);

        let mut again = GraphAccumulator::default();
        again.hydrate(&conversation);

        assert_eq!(hydrated.graph(), again.graph());
        assert_eq!(hydrated.graph().nodes.len(), 6);
        assert_eq!(hydrated.graph().edges.len(), 5);

        // Global layout puts M3 below S1 instead of on top of M1.
        let layout = positions(&hydrated);
        assert!(layout["m3"].y > layout["s1"].y);
        assert!(layout["s1"].y > layout["m1"].y);
    }

    #[test]
    fn hydrate_resets_previous_state_and_marks_messages_processed() {
        let conversation = simple_branch_conversation();
        let mut acc = GraphAccumulator::default();
        acc.ingest(&assistant("old", "Old", &[("so", "x")], None));

        acc.hydrate(&conversation);
        assert!(acc.graph().node("old").is_none());

        let m3 = &conversation[3];
        assert!(acc.is_processed(m3.id()));
        assert_eq!(acc.ingest(m3), IngestOutcome::AlreadyProcessed);
    }

    #[test]
    fn hydrate_with_nothing_to_show_stays_empty() {
        let mut acc = GraphAccumulator::default();
        let outcome = acc.hydrate(&[user("u1", "hello")]);
        assert_eq!(outcome, IngestOutcome::NotInGraph);
        assert_eq!(acc.state(), GraphState::Empty);
    }

    #[test]
    fn measured_sizes_feed_the_next_global_layout() {
        let mut acc = GraphAccumulator::default();
        acc.ingest(&assistant("m1", "Rust", &[("s1", "More")], None));

        assert!(acc.set_measured("s1", Dimensions::new(40.0, 20.0)));
        assert!(!acc.set_measured("missing", Dimensions::new(1.0, 1.0)));
        acc.relayout_all();

        let s1 = acc.graph().node("s1").expect("s1");
        assert_eq!(s1.measured(), Some(Dimensions::new(40.0, 20.0)));
        // m1 is 200 wide, s1 40: s1 is centred under m1 at x = 100.
        assert_eq!(s1.position(), Position::new(80.0, 230.0));
        let m1 = acc.graph().node("m1").expect("m1");
        assert_eq!(m1.position(), Position::new(100.0, 90.0));
    }

    #[test]
    fn fresh_nodes_sit_at_their_layout_centre() {
        let mut acc = GraphAccumulator::default();
        acc.ingest(&assistant("m1", "Rust", &[("s1", "More")], None));

        let position = |id: &str| acc.graph().node(id).expect("node").position();
        assert_eq!(position("m1"), Position::new(100.0, 90.0));
        assert_eq!(position("s1"), Position::new(100.0, 320.0));
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut acc = GraphAccumulator::default();
        let message = assistant("m1", "Rust", &[("s1", "More")], None);
        acc.ingest(&message);

        acc.reset();
        assert_eq!(acc.state(), GraphState::Empty);
        assert!(!acc.is_processed(message.id()));
        assert!(matches!(acc.ingest(&message), IngestOutcome::Appended { .. }));
    }
}
