// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Permission algebra evaluated against a command sender.
//!
//! A [`Permission`] is either atomic (a string node looked up on the sender,
//! or a named predicate) or a boolean composition of other permissions.
//! Evaluation walks the expression every time: predicates may depend on
//! sender state and results are never cached.

use std::fmt;
use std::sync::Arc;

/// The entity issuing commands.
///
/// The engine never inspects a sender beyond this permission check and any
/// host-supplied [`SenderType`] restrictions.
pub trait CommandSender: Send + Sync + 'static {
    /// Whether the sender holds the string permission `permission`.
    fn has_permission(&self, permission: &str) -> bool;
}

type PredicateFn<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// A named predicate over the sender.
pub struct PredicatePermission<S> {
    key: String,
    predicate: PredicateFn<S>,
}

impl<S> PredicatePermission<S> {
    /// Name used when reporting a denial.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Evaluate the predicate.
    pub fn test(&self, sender: &S) -> bool {
        (self.predicate)(sender)
    }
}

impl<S> Clone for PredicatePermission<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

/// A permission requirement.
pub enum Permission<S> {
    /// Always granted.
    Empty,
    /// A string permission checked through [`CommandSender::has_permission`].
    Node(String),
    /// A named predicate over the sender.
    Predicate(PredicatePermission<S>),
    /// Granted when every child is granted; stops at the first denial.
    And(Vec<Permission<S>>),
    /// Granted when any child is granted; stops at the first grant.
    Or(Vec<Permission<S>>),
}

impl<S> Permission<S> {
    /// The always-granted permission.
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// A string permission. An empty string is the empty permission.
    pub fn node(node: impl Into<String>) -> Self {
        let node = node.into();
        if node.is_empty() {
            Self::Empty
        } else {
            Self::Node(node)
        }
    }

    /// A predicate permission reported as `key` when denied.
    pub fn predicate<F>(key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(PredicatePermission {
            key: key.into(),
            predicate: Arc::new(predicate),
        })
    }

    /// Conjunction of `permissions`. No children yields the empty permission.
    pub fn all(permissions: impl IntoIterator<Item = Permission<S>>) -> Self {
        let children: Vec<_> = permissions.into_iter().collect();
        if children.is_empty() {
            Self::Empty
        } else {
            Self::And(children)
        }
    }

    /// Disjunction of `permissions`. No children yields the empty permission.
    pub fn any(permissions: impl IntoIterator<Item = Permission<S>>) -> Self {
        let children: Vec<_> = permissions.into_iter().collect();
        if children.is_empty() {
            Self::Empty
        } else {
            Self::Or(children)
        }
    }

    /// `self` and then `other`.
    pub fn and(self, other: Permission<S>) -> Self {
        Self::And(vec![self, other])
    }

    /// `self` or else `other`.
    pub fn or(self, other: Permission<S>) -> Self {
        Self::Or(vec![self, other])
    }

    /// True for the always-granted permission.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<S: CommandSender> Permission<S> {
    /// Evaluate the permission for `sender`.
    pub fn allows(&self, sender: &S) -> bool {
        match self {
            Self::Empty => true,
            Self::Node(node) => sender.has_permission(node),
            Self::Predicate(predicate) => predicate.test(sender),
            Self::And(children) => children.iter().all(|child| child.allows(sender)),
            Self::Or(children) => children.iter().any(|child| child.allows(sender)),
        }
    }

    /// The first permission that denies `sender`, if any.
    ///
    /// For a conjunction this is the first denied child (recursively); a
    /// denied disjunction is reported as a whole since no single child is at
    /// fault.
    pub fn first_denied(&self, sender: &S) -> Option<&Permission<S>> {
        match self {
            Self::Empty => None,
            Self::Node(_) | Self::Predicate(_) | Self::Or(_) => {
                if self.allows(sender) {
                    None
                } else {
                    Some(self)
                }
            }
            Self::And(children) => children.iter().find_map(|child| child.first_denied(sender)),
        }
    }
}

impl<S> Clone for Permission<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Node(node) => Self::Node(node.clone()),
            Self::Predicate(predicate) => Self::Predicate(predicate.clone()),
            Self::And(children) => Self::And(children.clone()),
            Self::Or(children) => Self::Or(children.clone()),
        }
    }
}

impl<S> Default for Permission<S> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<S> From<&str> for Permission<S> {
    fn from(node: &str) -> Self {
        Self::node(node)
    }
}

impl<S> From<String> for Permission<S> {
    fn from(node: String) -> Self {
        Self::node(node)
    }
}

fn write_joined<S>(
    f: &mut fmt::Formatter<'_>,
    children: &[Permission<S>],
    separator: &str,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}

impl<S> fmt::Display for Permission<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Node(node) => f.write_str(node),
            Self::Predicate(predicate) => f.write_str(&predicate.key),
            Self::And(children) => write_joined(f, children, " & "),
            Self::Or(children) => write_joined(f, children, " | "),
        }
    }
}

impl<S> fmt::Debug for Permission<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permission({self})")
    }
}

/// A host-supplied restriction on which senders may reach a command.
pub struct SenderType<S> {
    name: String,
    predicate: PredicateFn<S>,
}

impl<S> SenderType<S> {
    /// A restriction named `name` (used in error messages) backed by `predicate`.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Name of the required sender type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `sender` satisfies the restriction.
    pub fn accepts(&self, sender: &S) -> bool {
        (self.predicate)(sender)
    }
}

impl<S> Clone for SenderType<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S> fmt::Debug for SenderType<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SenderType").field(&self.name).finish()
    }
}

#[cfg(test)]
#[path = "permission_tests.rs"]
mod tests;
