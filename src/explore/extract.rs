// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::annotation::Suggestion;
use crate::model::ids::SuggestionId;
use crate::model::message::Message;

/// Follow-up data found on one message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedSuggestions<'a> {
    pub suggestions: &'a [Suggestion],
    /// Set when the message continues a branch started by clicking this suggestion.
    pub from_suggestion_id: Option<&'a SuggestionId>,
}

impl ExtractedSuggestions<'_> {
    pub fn is_branch(&self) -> bool {
        self.from_suggestion_id.is_some()
    }
}

/// Finds the suggestions annotation of `message` and, independently, its branch origin.
///
/// Returns `None` when the message carries no suggestions annotation. An empty
/// suggestions list still counts as one.
pub fn extract_suggestions(message: &Message) -> Option<ExtractedSuggestions<'_>> {
    let suggestions = message.suggestions()?;
    Some(ExtractedSuggestions {
        suggestions,
        from_suggestion_id: message.branch_origin(),
    })
}
