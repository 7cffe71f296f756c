// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persisted chat history and graph snapshots.
//!
//! Transcripts are JSON exports of the chat store: either `{ chat, messages }` or a
//! bare array of message rows.

pub mod transcript;

pub use transcript::{
    load_transcript, parse_transcript, stored_to_message, write_graph_snapshot, StoreError,
    StoredChat, StoredMessage, Transcript,
};
