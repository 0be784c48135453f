// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;
use std::sync::Mutex;

/// Names of the handlers that ran.
#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<&'static str>>>);

impl Seen {
    fn push(&self, name: &'static str) {
        self.0.lock().unwrap().push(name);
    }

    fn take(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

fn literal_vs_argument() -> (Manager, Seen) {
    let manager = manager();
    let seen = Seen::default();

    let s = seen.clone();
    manager
        .command(
            Command::builder("test")
                .literal("int")
                .required("value", IntegerParser::<i32>::new())
                .handler_fn(move |_| {
                    s.push("int");
                    Ok(())
                })
                .build()
                .unwrap(),
        )
        .unwrap();
    let s = seen.clone();
    manager
        .command(
            Command::builder("test")
                .required("text", StringParser::single())
                .handler_fn(move |_| {
                    s.push("string");
                    Ok(())
                })
                .build()
                .unwrap(),
        )
        .unwrap();
    (manager, seen)
}

#[tokio::test]
async fn literal_is_tried_before_the_argument() {
    let (manager, seen) = literal_vs_argument();

    let context = succeed(&manager, "test int 5").await;
    assert_eq!(context.get::<i32>("value"), Some(&5));
    assert_eq!(seen.take(), vec!["int"]);

    // A bare number is not the `int` literal, so it is taken as text.
    let context = succeed(&manager, "test 5").await;
    assert_eq!(context.get::<String>("text").map(String::as_str), Some("5"));
    assert_eq!(context.get::<i32>("value"), None);
    assert_eq!(seen.take(), vec!["string"]);

    let context = succeed(&manager, "test hello").await;
    assert_eq!(context.get::<String>("text").map(String::as_str), Some("hello"));
    assert_eq!(seen.take(), vec!["string"]);
}

#[tokio::test]
async fn consumed_literal_is_never_reinterpreted() {
    let (manager, seen) = literal_vs_argument();

    // `int` was consumed as a literal, so a bad number fails instead of
    // falling back to `test <text>`.
    assert_eq!(fail_kind(&manager, "test int five").await, ErrorKind::ArgumentParse);
    assert_eq!(fail_kind(&manager, "test int").await, ErrorKind::InvalidSyntax);
    assert!(seen.take().is_empty());
}

#[tokio::test]
async fn trailing_input_is_a_syntax_error() {
    let (manager, _) = literal_vs_argument();
    assert_eq!(fail_kind(&manager, "test hello world").await, ErrorKind::InvalidSyntax);
}
