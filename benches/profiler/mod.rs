// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Arbor-Proprietary
//
// All rights reserved.
//
// This file is part of Arbor and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Criterion settings shared by the layout and hydrate benches.
//!
//! `ARBOR_BENCH_SAMPLES`, `ARBOR_BENCH_SECS` and `ARBOR_PROFILE_HZ` override the
//! defaults. The large cases lay out a few hundred nodes per iteration, so the
//! defaults keep samples low and the measurement window short.

use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

const DEFAULT_SAMPLES: usize = 30;
const DEFAULT_SECS: u64 = 4;
const DEFAULT_PROFILE_HZ: i32 = 200;

fn knob<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}

/// Criterion config with a flamegraph written per benchmark under `--profile-time`.
pub fn criterion() -> Criterion {
    let samples = knob("ARBOR_BENCH_SAMPLES").unwrap_or(DEFAULT_SAMPLES).clamp(10, 200);
    let secs = knob("ARBOR_BENCH_SECS").unwrap_or(DEFAULT_SECS).clamp(1, 60);
    let hz = knob("ARBOR_PROFILE_HZ").unwrap_or(DEFAULT_PROFILE_HZ).clamp(1, 1000);

    Criterion::default()
        .sample_size(samples)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(secs))
        .with_profiler(PProfProfiler::new(hz, Output::Flamegraph(None)))
}
