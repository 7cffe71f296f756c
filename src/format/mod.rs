// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Parsing of external payload formats into the model.

pub mod annotation;

pub use annotation::{annotations_to_value, parse_annotation_entry, parse_annotations};
