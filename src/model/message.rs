// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, Suggestion};
use super::ids::{MessageId, SuggestionId};
use crate::format::annotation::{annotations_to_value, parse_annotations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One rendered piece of a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessagePart {
    Text { text: String },
    Source { source: SourceRef },
    /// Reasoning, tool calls, step markers and anything else the transport may add.
    #[serde(other)]
    Other,
}

/// A chat message as seen by the graph builder.
///
/// Annotations are parsed into [`Annotation`] values once, when the message is
/// built or deserialized; consumers never inspect raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireMessage", into = "WireMessage")]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    parts: Vec<MessagePart>,
    annotations: Vec<Annotation>,
}

impl Message {
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            parts: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_parts(mut self, parts: Vec<MessagePart>) -> Self {
        self.parts = parts;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn push_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn parts(&self) -> &[MessagePart] {
        &self.parts
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The text shown for this message: `content` when present, else the first text part.
    pub fn display_text(&self) -> Option<&str> {
        if !self.content.is_empty() {
            return Some(&self.content);
        }
        self.parts.iter().find_map(|part| match part {
            MessagePart::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// First suggestions annotation, if any.
    pub fn suggestions(&self) -> Option<&[Suggestion]> {
        self.annotations.iter().find_map(|annotation| match annotation {
            Annotation::Suggestions(suggestions) => Some(suggestions.as_slice()),
            _ => None,
        })
    }

    /// First branch-origin annotation, if any.
    pub fn branch_origin(&self) -> Option<&SuggestionId> {
        self.annotations.iter().find_map(|annotation| match annotation {
            Annotation::BranchOrigin(id) => Some(id),
            _ => None,
        })
    }

    pub fn sources(&self) -> impl Iterator<Item = &SourceRef> {
        self.parts.iter().filter_map(|part| match part {
            MessagePart::Source { source } => Some(source),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    id: MessageId,
    role: Role,
    #[serde(default)]
    content: String,
    #[serde(default)]
    parts: Vec<MessagePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotations: Option<serde_json::Value>,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        Self {
            id: wire.id,
            role: wire.role,
            content: wire.content,
            parts: wire.parts,
            annotations: parse_annotations(wire.annotations.as_ref()),
        }
    }
}

impl From<Message> for WireMessage {
    fn from(message: Message) -> Self {
        let annotations =
            (!message.annotations.is_empty()).then(|| annotations_to_value(&message.annotations));
        Self {
            id: message.id,
            role: message.role,
            content: message.content,
            parts: message.parts,
            annotations,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Message, MessagePart, Role};
    use crate::model::ids::MessageId;

    #[test]
    fn display_text_prefers_content_then_first_text_part() {
        let id = MessageId::new("m1").unwrap();
        let with_content = Message::new(id.clone(), Role::Assistant, "hello");
        assert_eq!(with_content.display_text(), Some("hello"));

        let from_parts = Message::new(id.clone(), Role::Assistant, "").with_parts(vec![
            MessagePart::Other,
            MessagePart::Text { text: "first".to_owned() },
            MessagePart::Text { text: "second".to_owned() },
        ]);
        assert_eq!(from_parts.display_text(), Some("first"));

        let empty = Message::new(id, Role::Assistant, "");
        assert_eq!(empty.display_text(), None);
    }

    #[test]
    fn deserializes_transport_shape_and_parses_annotations_once() {
        let raw = json!({
            "id": "m1",
            "role": "assistant",
            "content": "Rust ownership explained",
            "parts": [
                { "type": "step-start" },
                { "type": "text", "text": "Rust ownership explained" },
                { "type": "source", "source": { "id": "src1", "url": "https://doc.rust-lang.org" } }
            ],
            "annotations": [
                { "suggestions": { "suggestions": [ { "id": "s1", "content": "Borrowing?" } ] } },
                { "fromSuggestionId": "s0" }
            ]
        });

        let message: Message = serde_json::from_value(raw).unwrap();
        assert_eq!(message.role(), Role::Assistant);
        assert_eq!(message.parts().len(), 3);
        assert_eq!(message.sources().count(), 1);
        assert_eq!(message.suggestions().map(<[_]>::len), Some(1));
        assert_eq!(message.branch_origin().map(|id| id.as_str()), Some("s0"));
    }

    #[test]
    fn serializes_annotations_back_to_wire_shape() {
        let raw = json!({
            "id": "m1",
            "role": "assistant",
            "content": "x",
            "parts": [],
            "annotations": [
                { "suggestions": { "suggestions": [ { "id": "s1", "content": "More" } ] } }
            ]
        });
        let message: Message = serde_json::from_value(raw).unwrap();
        let value = serde_json::to_value(&message).unwrap();
        let reparsed: Message = serde_json::from_value(value).unwrap();

        assert_eq!(reparsed, message);
    }
}
