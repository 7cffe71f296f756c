// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Arbor: branching conversation graphs for explore-style chats.
//!
//! Each assistant answer with follow-up suggestions becomes a small subtree; clicking
//! a suggestion starts a branch that links back to it. The crate turns chat
//! messages into that `{nodes, edges}` graph and lays it out for display.

pub mod config;
pub mod explore;
pub mod format;
pub mod layout;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{ArborConfig, ConfigError};
pub use explore::{Assembler, GraphAccumulator, GraphState, IngestOutcome};
pub use layout::{layout_elements, LayeredLayout, LayoutDirection, LayoutEngine, LayoutSettings};
pub use model::{GraphBatch, GraphEdge, GraphNode, Message};
