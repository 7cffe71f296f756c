// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{MessageId, SuggestionId};

/// A follow-up prompt offered after an assistant response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    id: SuggestionId,
    content: String,
    message_id: Option<MessageId>,
    selected: bool,
}

impl Suggestion {
    pub fn new(id: SuggestionId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            message_id: None,
            selected: false,
        }
    }

    pub fn with_message_id(mut self, message_id: Option<MessageId>) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn id(&self) -> &SuggestionId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The message the suggestion was generated from, when the generator recorded it.
    pub fn message_id(&self) -> Option<&MessageId> {
        self.message_id.as_ref()
    }

    pub fn selected(&self) -> bool {
        self.selected
    }
}

/// Message metadata after ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// `{ suggestions: { suggestions: [{ id, content }] } }`
    Suggestions(Vec<Suggestion>),
    /// `{ fromSuggestionId: "<id>" }`: the message continues a branch started by that suggestion.
    BranchOrigin(SuggestionId),
    /// Anything else; kept verbatim so it can be written back out.
    Unknown(serde_json::Value),
}

impl Annotation {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
