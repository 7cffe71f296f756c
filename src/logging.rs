// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Log output for the CLI.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ARBOR_LOG";

/// Installs a compact stderr subscriber filtered by `ARBOR_LOG`, then `RUST_LOG`,
/// then `default_directive`. Stdout is left for command output.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();

    if result.is_ok() {
        tracing::debug!("tracing initialized");
    }
}
