// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use arbor::model::{Annotation, GraphBatch, Message, MessageId, Role, Suggestion, SuggestionId};

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }
    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

pub fn checksum_graph(graph: &GraphBatch) -> u64 {
    let mut acc = 0u64;
    for node in &graph.nodes {
        let position = node.position();
        acc = acc.wrapping_mul(131).wrapping_add(position.x.to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(position.y.to_bits());
        acc = acc.wrapping_mul(131).wrapping_add(node.label().len() as u64);
    }
    acc.wrapping_add(graph.edges.len() as u64)
}

pub mod conversation {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub turns: usize,
        pub suggestions_per_turn: usize,
        pub content_len: usize,
    }

    impl Params {
        pub const fn new(turns: usize, suggestions_per_turn: usize, content_len: usize) -> Self {
            Self { turns, suggestions_per_turn, content_len }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Medium,
        LargeLongAnswers,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::LargeLongAnswers => "large_long_answers",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(6, 3, 120),
                Self::Medium => Params::new(40, 3, 400),
                Self::LargeLongAnswers => Params::new(200, 4, 2000),
            }
        }
    }

    fn message_id(kind: &str, turn: usize) -> MessageId {
        MessageId::new(format!("{kind}-{turn:05}")).expect("valid message id")
    }

    fn suggestion_id(turn: usize, idx: usize) -> SuggestionId {
        SuggestionId::new(format!("s-{turn:05}-{idx:02}")).expect("valid suggestion id")
    }

    /// Deterministic branching conversation.
    ///
    /// Turn `t > 0` continues from suggestion `t % suggestions_per_turn` of turn
    /// `(t - 1) / 2`, so the graph fans out like a binary tree of branches.
    pub fn build(params: Params) -> Vec<Message> {
        assert!(params.turns >= 1, "turns must be >= 1");
        assert!(params.suggestions_per_turn >= 1, "suggestions_per_turn must be >= 1");

        let mut messages = Vec::with_capacity(params.turns * 2);
        for turn in 0..params.turns {
            let origin = (turn > 0)
                .then(|| suggestion_id((turn - 1) / 2, turn % params.suggestions_per_turn));

            let mut question = Message::new(message_id("u", turn), Role::User, format!("Q{turn}"));
            if let Some(origin) = &origin {
                question.push_annotation(Annotation::BranchOrigin(origin.clone()));
            }
            messages.push(question);

            let suggestions = (0..params.suggestions_per_turn)
                .map(|idx| {
                    Suggestion::new(suggestion_id(turn, idx), format!("Follow-up {idx} of turn {turn}"))
                })
                .collect();
            let mut annotations = vec![Annotation::Suggestions(suggestions)];
            if let Some(origin) = origin {
                annotations.push(Annotation::BranchOrigin(origin));
            }

            let content = ascii_repeat_to_len(&format!("Answer_{turn:05}_"), 'x', params.content_len);
            messages.push(
                Message::new(message_id("a", turn), Role::Assistant, content)
                    .with_annotations(annotations),
            );
        }

        messages
    }

    pub fn fixture(case: Case) -> Vec<Message> {
        build(case.params())
    }
}
