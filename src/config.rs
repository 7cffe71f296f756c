// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime settings for graph building and layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::explore::{Assembler, GraphAccumulator, DEFAULT_LABEL_MAX_CHARS};
use crate::layout::LayoutSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ArborConfig {
    pub layout: LayoutSettings,
    /// Root node labels keep this many characters of the message text.
    pub label_max_chars: usize,
}

impl Default for ArborConfig {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

impl ArborConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(?path, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Invalid { reason: reason.to_owned() });

        if self.label_max_chars == 0 {
            return invalid("labelMaxChars must be at least 1");
        }
        let layout = &self.layout;
        if !(layout.rank_sep >= 0.0 && layout.node_sep >= 0.0) {
            return invalid("layout separations must be non-negative numbers");
        }
        let size = layout.default_node_size;
        if !(size.width > 0.0 && size.height > 0.0) {
            return invalid("layout.defaultNodeSize must be positive");
        }
        Ok(())
    }

    pub fn assembler(&self) -> Assembler {
        Assembler::new(self.label_max_chars)
    }

    pub fn accumulator(&self) -> GraphAccumulator {
        GraphAccumulator::new(self.assembler(), self.layout.clone())
    }
}
