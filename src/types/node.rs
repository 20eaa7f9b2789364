//! Thread node types for the forum forest.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::UNKNOWN_NAME;

/// Deserialize a field, mapping an explicit JSON `null` to the type's default.
///
/// Combined with `#[serde(default)]` this makes absent and null fields
/// indistinguishable.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifier of a contributor.
///
/// Wraps the author's display name. Implements `Ord` so tallies iterate
/// in a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributorId(String);

impl ContributorId {
    /// Create a contributor id from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The sentinel contributor for nodes without an author name.
    pub fn unknown() -> Self {
        Self(UNKNOWN_NAME.to_string())
    }

    /// Whether this is the unknown-name sentinel.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_NAME
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContributorId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// User record attached to a node.
///
/// Exports carry more fields (email, role, ...); only the name is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name, if present.
    #[serde(default)]
    pub name: Option<String>,
}

/// Position of a node in the forest.
///
/// Determines which child collections are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLevel {
    /// Top-level thread (post, question, announcement).
    Root,
    /// Comment or answer below a root.
    Nested,
}

/// A post, announcement, question, comment, or answer.
///
/// Optional fields are defaulted during deserialization, so accessors never
/// need a fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadNode {
    /// Body text; empty when absent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Whether staff endorsed this node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub endorsed: bool,
    /// Author record.
    #[serde(default)]
    pub user: Option<UserRecord>,
    /// Nested comments.
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<ThreadNode>,
    /// Answers. Only walked on root nodes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<ThreadNode>,
}

impl ThreadNode {
    /// Create a node with the given text and endorsement flag and no author.
    pub fn new(text: impl Into<String>, endorsed: bool) -> Self {
        Self {
            text: text.into(),
            endorsed,
            ..Self::default()
        }
    }

    /// Set the author name.
    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.user = Some(UserRecord { name: Some(name.into()) });
        self
    }

    /// Append a nested comment.
    pub fn with_comment(mut self, comment: ThreadNode) -> Self {
        self.comments.push(comment);
        self
    }

    /// Append an answer.
    pub fn with_answer(mut self, answer: ThreadNode) -> Self {
        self.answers.push(answer);
        self
    }

    /// Contributor this node is attributed to.
    ///
    /// Falls back to the unknown-name sentinel when the user record or its
    /// name is missing.
    pub fn contributor(&self) -> ContributorId {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .map(ContributorId::new)
            .unwrap_or_else(ContributorId::unknown)
    }

    /// Children to walk at the given level.
    ///
    /// Roots yield comments followed by answers; nested nodes yield
    /// comments only.
    pub fn children(&self, level: NodeLevel) -> impl Iterator<Item = &ThreadNode> {
        let answers: &[ThreadNode] = match level {
            NodeLevel::Root => &self.answers,
            NodeLevel::Nested => &[],
        };
        self.comments.iter().chain(answers.iter())
    }
}
