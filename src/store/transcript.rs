// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::annotation::parse_annotations;
use crate::model::annotation::Annotation;
use crate::model::graph::GraphBatch;
use crate::model::ids::{MessageId, SuggestionId};
use crate::model::message::{Message, MessagePart, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredChat {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of the `messages` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: String,
    #[serde(default)]
    pub chat_id: Option<String>,
    pub role: String,
    #[serde(default)]
    pub parts: Option<Value>,
    #[serde(default)]
    pub from_suggestion_id: Option<String>,
    #[serde(default)]
    pub annotations: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub chat: Option<StoredChat>,
    pub messages: Vec<Message>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid json in {path:?}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("invalid message row {index} in {path:?}: {reason}")]
    InvalidRow { path: PathBuf, index: usize, reason: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Export {
        #[serde(default)]
        chat: Option<StoredChat>,
        messages: Vec<Value>,
    },
    Rows(Vec<Value>),
}

pub fn load_transcript(path: &Path) -> Result<Transcript, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_transcript(path, &raw)
}

/// Parses a transcript export. `path` is only used for error context.
///
/// Rows are ordered by `createdAt` (stable for ties). Rows with a role other than
/// `user` or `assistant` are dropped.
pub fn parse_transcript(path: &Path, raw: &str) -> Result<Transcript, StoreError> {
    let file: TranscriptFile = serde_json::from_str(raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let (chat, rows) = match file {
        TranscriptFile::Export { chat, messages } => (chat, messages),
        TranscriptFile::Rows(rows) => (None, rows),
    };

    let mut stored = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value::<StoredMessage>(row)
                .map(|row| (index, row))
                .map_err(|err| StoreError::InvalidRow {
                    path: path.to_path_buf(),
                    index,
                    reason: err.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    stored.sort_by_key(|(_, row)| row.created_at);

    let mut messages = Vec::with_capacity(stored.len());
    for (index, row) in stored {
        let converted = stored_to_message(row).map_err(|reason| StoreError::InvalidRow {
            path: path.to_path_buf(),
            index,
            reason,
        })?;
        if let Some(message) = converted {
            messages.push(message);
        }
    }

    tracing::debug!(?path, messages = messages.len(), "parsed transcript");
    Ok(Transcript { chat, messages })
}

/// Converts a stored row into a [`Message`].
///
/// Returns `Ok(None)` for roles the graph does not know about. A row's
/// `fromSuggestionId` column becomes a branch origin unless its annotations
/// already carry one.
pub fn stored_to_message(row: StoredMessage) -> Result<Option<Message>, String> {
    let role = match row.role.as_str() {
        "user" => Role::User,
        "assistant" => Role::Assistant,
        other => {
            tracing::warn!(message_id = %row.id, role = other, "dropping row with unsupported role");
            return Ok(None);
        }
    };
    let id = MessageId::new(row.id).map_err(|err| err.to_string())?;

    let parts = match row.parts {
        None | Some(Value::Null) => vec![MessagePart::Text { text: String::new() }],
        Some(raw) => serde_json::from_value::<Vec<MessagePart>>(raw).unwrap_or_else(|err| {
            tracing::warn!(message_id = %id, %err, "unreadable message parts");
            vec![MessagePart::Text { text: String::new() }]
        }),
    };

    let mut message = Message::new(id, role, "")
        .with_parts(parts)
        .with_annotations(parse_annotations(row.annotations.as_ref()));

    if message.branch_origin().is_none() {
        let origin = row
            .from_suggestion_id
            .as_deref()
            .and_then(|raw| SuggestionId::new(raw).ok());
        if let Some(origin) = origin {
            message.push_annotation(Annotation::BranchOrigin(origin));
        }
    }

    Ok(Some(message))
}

/// Writes `graph` as pretty JSON, replacing `path` atomically.
pub fn write_graph_snapshot(path: &Path, graph: &GraphBatch) -> Result<(), StoreError> {
    let mut contents = serde_json::to_vec_pretty(graph).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    contents.push(b'\n');
    write_atomic(path, &contents)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |source: io::Error| StoreError::Io { path: path.to_path_buf(), source };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(io_err(io::Error::other("path has no file name")));
    };
    fs::create_dir_all(&parent).map_err(io_err)?;

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = parent.join(format!(
        ".arbor.tmp.{}.{}.{nanos}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let write = || -> io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.flush()?;
        rename_overwrite(&tmp_path, path)
    };
    if let Err(source) = write() {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(source));
    }

    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
