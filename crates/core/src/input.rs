// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token cursor over raw command input.
//!
//! [`CommandInput`] is the mutable view argument parsers consume. Tokens are
//! separated by whitespace; reading a token also consumes the whitespace that
//! follows it, so the cursor always rests at the start of the next token or
//! at the end of the input.

/// Mutable, position-tracking view over the remaining command input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInput {
    input: String,
    /// Byte offset into `input`, always on a char boundary.
    cursor: usize,
}

impl CommandInput {
    /// Create a cursor positioned at the start of `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            cursor: 0,
        }
    }

    /// The complete input, including consumed text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current byte offset. Pass to [`CommandInput::rewind`] to restore.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor back (or forward) to a previously observed offset.
    ///
    /// Offsets past the end or off a char boundary are ignored.
    pub fn rewind(&mut self, cursor: usize) {
        if self.input.is_char_boundary(cursor) {
            self.cursor = cursor;
        }
    }

    /// Text that has already been consumed.
    pub fn consumed(&self) -> &str {
        self.input.get(..self.cursor).unwrap_or_default()
    }

    /// Text consumed since `checkpoint`.
    pub fn read_since(&self, checkpoint: usize) -> &str {
        self.input.get(checkpoint..self.cursor).unwrap_or_default()
    }

    /// Text that has not been consumed yet.
    pub fn remaining(&self) -> &str {
        self.input.get(self.cursor..).unwrap_or_default()
    }

    /// True when only whitespace (or nothing) remains.
    pub fn is_empty(&self) -> bool {
        self.remaining().chars().all(char::is_whitespace)
    }

    /// True when the cursor sits at the very end of the input.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.input.len()
    }

    /// Number of tokens left, counting the token currently being typed.
    ///
    /// Empty remaining input, or input ending in whitespace, contributes one
    /// empty token: `""` has one token, `"a"` one, `"a "` two, `"a b"` two.
    pub fn remaining_tokens(&self) -> usize {
        let remaining = self.remaining();
        let words = remaining.split_whitespace().count();
        if remaining.is_empty() || remaining.ends_with(char::is_whitespace) {
            words + 1
        } else {
            words
        }
    }

    /// The remaining tokens, without the whitespace between them.
    pub fn tokens(&self) -> Vec<&str> {
        self.remaining().split_whitespace().collect()
    }

    /// The last (possibly empty) token of the remaining input.
    pub fn last_token(&self) -> &str {
        last_token(self.remaining())
    }

    /// True when the previous read ended on whitespace, i.e. the next token
    /// has begun even if nothing has been typed for it yet.
    pub fn at_token_boundary(&self) -> bool {
        self.cursor == 0 || self.consumed().ends_with(char::is_whitespace)
    }

    /// Next character without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume and return the next character.
    pub fn read_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Skip any whitespace at the cursor.
    pub fn skip_whitespace(&mut self) {
        let remaining = self.remaining();
        let skipped = remaining.len() - remaining.trim_start().len();
        self.cursor += skipped;
    }

    /// The next token without consuming it.
    pub fn peek_string(&self) -> &str {
        let remaining = self.remaining().trim_start();
        let end = remaining
            .find(char::is_whitespace)
            .unwrap_or(remaining.len());
        remaining.get(..end).unwrap_or_default()
    }

    /// Consume the next token and the whitespace that follows it.
    pub fn read_string(&mut self) -> String {
        self.skip_whitespace();
        let token = self.peek_string().to_string();
        self.cursor += token.len();
        self.skip_whitespace();
        token
    }

    /// Consume everything that remains, trimmed of surrounding whitespace.
    pub fn read_remaining(&mut self) -> String {
        let rest = self.remaining().trim().to_string();
        self.cursor = self.input.len();
        rest
    }

    /// True when the next token opens a flag: `--x...` or `-` followed by an
    /// ASCII letter. Negative numbers are not flags.
    pub fn is_flag_start(&self) -> bool {
        is_flag_token(self.peek_string())
    }
}

impl From<&str> for CommandInput {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}

impl From<String> for CommandInput {
    fn from(input: String) -> Self {
        Self::new(input)
    }
}

/// True when `token` is spelled like a flag (`--name`, `-n`, `-abc`).
pub fn is_flag_token(token: &str) -> bool {
    if let Some(long) = token.strip_prefix("--") {
        return !long.is_empty();
    }
    let mut chars = token.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// The last (possibly empty) whitespace-separated token of `text`.
pub fn last_token(text: &str) -> &str {
    match text.rfind(char::is_whitespace) {
        Some(pos) => {
            let ws_len = text
                .get(pos..)
                .and_then(|rest| rest.chars().next())
                .map_or(1, char::len_utf8);
            text.get(pos + ws_len..).unwrap_or_default()
        }
        None => text,
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
