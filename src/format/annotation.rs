// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Annotation payloads as written by the suggestion generator and the branch tagger.
//!
//! Raw annotations are loosely typed JSON. They are matched by shape exactly once,
//! here, and turned into [`Annotation`] values. Shapes that do not match are kept as
//! [`Annotation::Unknown`]; nothing in this module fails.

use serde_json::{json, Map, Value};
use smallvec::SmallVec;

use crate::model::annotation::{Annotation, Suggestion};
use crate::model::ids::{MessageId, SuggestionId};

const SUGGESTIONS_KEY: &str = "suggestions";
const FROM_SUGGESTION_ID_KEY: &str = "fromSuggestionId";

/// Parses a message's annotation payload.
///
/// Accepts an array of entries (streamed messages), a single object (persisted
/// rows), or nothing.
pub fn parse_annotations(raw: Option<&Value>) -> Vec<Annotation> {
    match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries.iter().flat_map(parse_annotation_entry).collect(),
        Some(entry) => parse_annotation_entry(entry).into_vec(),
    }
}

/// Parses one annotation entry.
///
/// One object may carry both a suggestions list and a branch origin, so an entry
/// can yield two annotations.
pub fn parse_annotation_entry(entry: &Value) -> SmallVec<[Annotation; 2]> {
    let mut out = SmallVec::new();

    let Value::Object(object) = entry else {
        out.push(Annotation::Unknown(entry.clone()));
        return out;
    };

    if let Some(suggestions) = suggestions_of(object) {
        out.push(Annotation::Suggestions(suggestions));
    }
    if let Some(origin) = branch_origin_of(object) {
        out.push(Annotation::BranchOrigin(origin));
    }
    if out.is_empty() {
        out.push(Annotation::Unknown(entry.clone()));
    }

    out
}

fn suggestions_of(object: &Map<String, Value>) -> Option<Vec<Suggestion>> {
    let entries = object
        .get(SUGGESTIONS_KEY)?
        .as_object()?
        .get(SUGGESTIONS_KEY)?
        .as_array()?;

    let suggestions = entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let parsed = parse_suggestion(entry);
            if parsed.is_none() {
                tracing::warn!(index = idx, "skipping malformed suggestion entry");
            }
            parsed
        })
        .collect();

    Some(suggestions)
}

fn parse_suggestion(entry: &Value) -> Option<Suggestion> {
    let object = entry.as_object()?;
    let id = SuggestionId::new(object.get("id")?.as_str()?).ok()?;
    let content = object.get("content")?.as_str()?;
    let message_id = object
        .get("messageId")
        .and_then(Value::as_str)
        .and_then(|raw| MessageId::new(raw).ok());
    let selected = object.get("selected").and_then(Value::as_bool).unwrap_or(false);

    Some(
        Suggestion::new(id, content)
            .with_message_id(message_id)
            .with_selected(selected),
    )
}

fn branch_origin_of(object: &Map<String, Value>) -> Option<SuggestionId> {
    let raw = object.get(FROM_SUGGESTION_ID_KEY)?.as_str()?;
    match SuggestionId::new(raw) {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::debug!(%err, "ignoring unusable fromSuggestionId");
            None
        }
    }
}

/// Writes annotations back out in the shape [`parse_annotations`] reads.
pub fn annotations_to_value(annotations: &[Annotation]) -> Value {
    Value::Array(annotations.iter().map(annotation_to_value).collect())
}

fn annotation_to_value(annotation: &Annotation) -> Value {
    match annotation {
        Annotation::Suggestions(suggestions) => {
            let entries = suggestions.iter().map(suggestion_to_value).collect::<Vec<_>>();
            json!({ SUGGESTIONS_KEY: { SUGGESTIONS_KEY: entries } })
        }
        Annotation::BranchOrigin(id) => json!({ FROM_SUGGESTION_ID_KEY: id.as_str() }),
        Annotation::Unknown(value) => value.clone(),
    }
}

fn suggestion_to_value(suggestion: &Suggestion) -> Value {
    let mut object = Map::new();
    object.insert("id".to_owned(), Value::from(suggestion.id().as_str()));
    object.insert("content".to_owned(), Value::from(suggestion.content()));
    if let Some(message_id) = suggestion.message_id() {
        object.insert("messageId".to_owned(), Value::from(message_id.as_str()));
    }
    object.insert("selected".to_owned(), Value::from(suggestion.selected()));
    Value::Object(object)
}
