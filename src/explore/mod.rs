// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Explore mode: the branching conversation graph.
//!
//! Messages flow through [`extract`] (find suggestions), [`assemble`] (build a
//! node/edge batch), the layout engine, and finally [`accumulator`] (append to the
//! graph the view shows).

pub mod accumulator;
pub mod assemble;
pub mod extract;

pub use accumulator::{GraphAccumulator, GraphState, IngestOutcome};
pub use assemble::{truncate_label, Assembler, DEFAULT_LABEL_MAX_CHARS};
pub use extract::{extract_suggestions, ExtractedSuggestions};
