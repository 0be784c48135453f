// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sy-parsers: reference argument parsers
//!
//! Integers of every primitive width with optional bounds, strings, booleans,
//! fixed choices and UUIDs. Each parser reports failures through its own
//! error enum, boxed into [`sy_core::ParserError`] at the trait boundary.

pub mod boolean;
pub mod choice;
pub mod id;
pub mod integer;
pub mod string;

pub use boolean::{BooleanParseError, BooleanParser};
pub use choice::{ChoiceParseError, ChoiceParser};
pub use id::{UuidParseError, UuidParser};
pub use integer::{Integer, IntegerParser, NumberParseError};
pub use string::{StringMode, StringParseError, StringParser};
pub use uuid::Uuid;
