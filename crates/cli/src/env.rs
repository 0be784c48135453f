// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use crate::CoordinatorKind;
use clap::ValueEnum;

/// Log filter directive: SY_LOG > "warn"
pub fn log_filter() -> String {
    std::env::var("SY_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

/// Liberal flag parsing override
pub fn liberal_flags() -> bool {
    std::env::var("SY_LIBERAL_FLAGS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Coordinator override; unknown values are ignored
pub fn coordinator() -> Option<CoordinatorKind> {
    std::env::var("SY_COORDINATOR")
        .ok()
        .and_then(|v| CoordinatorKind::from_str(&v, true).ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
