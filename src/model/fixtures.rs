// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::annotation::{Annotation, Suggestion};
use super::ids::{MessageId, SuggestionId};
use super::message::{Message, Role};

pub(crate) fn mid(value: &str) -> MessageId {
    MessageId::new(value).expect("message id")
}

pub(crate) fn sid(value: &str) -> SuggestionId {
    SuggestionId::new(value).expect("suggestion id")
}

pub(crate) fn user(id: &str, content: &str) -> Message {
    Message::new(mid(id), Role::User, content)
}

/// Assistant message carrying `suggestions` as `(id, content)` pairs and an optional branch origin.
pub(crate) fn assistant(
    id: &str,
    content: &str,
    suggestions: &[(&str, &str)],
    from_suggestion_id: Option<&str>,
) -> Message {
    let suggestions = suggestions
        .iter()
        .map(|(suggestion_id, text)| Suggestion::new(sid(suggestion_id), *text))
        .collect::<Vec<_>>();

    let mut annotations = vec![Annotation::Suggestions(suggestions)];
    if let Some(origin) = from_suggestion_id {
        annotations.push(Annotation::BranchOrigin(sid(origin)));
    }

    Message::new(mid(id), Role::Assistant, content).with_annotations(annotations)
}

/// M1 offers S1/S2; the user clicks S1 (M2) and the answer M3 offers S3/S4.
pub(crate) fn simple_branch_conversation() -> Vec<Message> {
    vec![
        user("u0", "What is Rust?"),
        assistant(
            "m1",
            "Rust is a systems programming language focused on safety and speed.",
            &[("s1", "Tell me more"), ("s2", "What about X?")],
            None,
        ),
        user("m2", "Tell me more")
            .with_annotations(vec![Annotation::BranchOrigin(sid("s1"))]),
        assistant(
            "m3",
            "Ownership rules",
            &[("s3", "How do lifetimes work?"), ("s4", "What is borrowing?")],
            Some("s1"),
        ),
    ]
}
