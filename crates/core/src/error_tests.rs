// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::TestSender;
use yare::parameterized;

fn sender() -> Arc<TestSender> {
    Arc::new(TestSender::new("tester"))
}

#[parameterized(
    no_such_command = { ErrorKind::NoSuchCommand, &[ErrorKind::NoSuchCommand, ErrorKind::CommandParse, ErrorKind::InvalidArgument, ErrorKind::Any] },
    argument_parse = { ErrorKind::ArgumentParse, &[ErrorKind::ArgumentParse, ErrorKind::CommandParse, ErrorKind::InvalidArgument, ErrorKind::Any] },
    execution = { ErrorKind::CommandExecution, &[ErrorKind::CommandExecution, ErrorKind::Any] },
    no_command_in_leaf = { ErrorKind::NoCommandInLeaf, &[ErrorKind::NoCommandInLeaf, ErrorKind::IllegalState, ErrorKind::Any] },
    aborted = { ErrorKind::Aborted, &[ErrorKind::Aborted, ErrorKind::IllegalState, ErrorKind::Any] },
    any = { ErrorKind::Any, &[ErrorKind::Any] },
)]
fn kind_lineage(kind: ErrorKind, expected: &[ErrorKind]) {
    assert_eq!(kind.lineage().collect::<Vec<_>>(), expected);
}

#[test]
fn is_a_follows_the_hierarchy() {
    assert!(ErrorKind::NoPermission.is_a(ErrorKind::CommandParse));
    assert!(ErrorKind::NoPermission.is_a(ErrorKind::NoPermission));
    assert!(!ErrorKind::CommandExecution.is_a(ErrorKind::InvalidArgument));
    assert!(!ErrorKind::CommandParse.is_a(ErrorKind::NoPermission));
}

#[test]
fn errors_report_kind_sender_and_chain() {
    let err = CommandError::InvalidSyntax {
        sender: sender(),
        syntax: "give <player> [amount]".to_string(),
        chain: vec!["give".to_string()],
    };
    assert_eq!(err.kind(), ErrorKind::InvalidSyntax);
    assert_eq!(err.sender().map(|s| s.name.as_str()), Some("tester"));
    assert_eq!(err.chain(), &["give".to_string()]);
    assert_eq!(err.to_string(), "invalid syntax, expected: give <player> [amount]");
}

#[test]
fn aborted_has_no_sender() {
    let err: CommandError<TestSender> = CommandError::Aborted {
        reason: "task died".to_string(),
    };
    assert!(err.sender().is_none());
    assert!(err.chain().is_empty());
    assert_eq!(err.kind(), ErrorKind::Aborted);
}

#[test]
fn leaf_message_joins_chain() {
    let err = CommandError::NoCommandInLeaf {
        sender: sender(),
        chain: vec!["a".to_string(), "b".to_string()],
    };
    assert_eq!(err.to_string(), "no command registered at `a b`");
}

#[test]
fn nested_dispatch_errors_unwrap() {
    let inner = CommandError::NoPermission {
        sender: sender(),
        permission: "admin".to_string(),
        chain: vec!["ban".to_string()],
    };
    let middle = CommandError::CommandExecution {
        sender: sender(),
        chain: vec!["sudo".to_string()],
        source: Box::new(inner),
    };
    let outer = CommandError::CommandExecution {
        sender: sender(),
        chain: vec!["alias".to_string()],
        source: Box::new(middle),
    };
    let unwrapped = outer.unwrap_nested();
    assert_eq!(unwrapped.kind(), ErrorKind::NoPermission);
    assert_eq!(unwrapped.chain(), &["ban".to_string()]);
}

#[test]
fn plain_execution_errors_stay_wrapped() {
    let err: CommandError<TestSender> = CommandError::CommandExecution {
        sender: sender(),
        chain: vec!["x".to_string()],
        source: "boom".into(),
    };
    let unwrapped = err.unwrap_nested();
    assert_eq!(unwrapped.kind(), ErrorKind::CommandExecution);
    assert_eq!(unwrapped.to_string(), "command failed: boom");
}
