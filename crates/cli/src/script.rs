// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script files: one input line per line, `#` comments and blank lines
//! skipped.

use std::path::Path;

pub fn read_script(path: &Path) -> std::io::Result<Vec<String>> {
    Ok(parse_script(&std::fs::read_to_string(path)?))
}

fn parse_script(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
