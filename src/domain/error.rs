//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// What the parser ran into at a given position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found '{found}'")]
    Unexpected { expected: &'static str, found: char },

    #[error("group has no name in front of it")]
    MissingAnchor,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("input continues after the outer group")]
    TrailingInput,
}

/// Domain errors split in two families: grammar violations, which abandon one
/// input, and invariant breaches, which mean the tree builder itself is broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("parse error at position {position}: {kind}")]
    Parse {
        /// Character offset into the whitespace-free input
        position: usize,
        kind: ParseErrorKind,
    },

    #[error("internal error: parent {parent} of '{name}' is not in the collection")]
    MissingParent { name: String, parent: String },

    #[error("internal error: '{name}' at depth {depth} under a parent at depth {parent_depth}")]
    DepthMismatch {
        name: String,
        depth: usize,
        parent_depth: usize,
    },

    #[error("internal error: '{name}' at depth {depth} has no parent")]
    OrphanNode { name: String, depth: usize },

    #[error("internal error: {count} node(s) unreachable from any root")]
    Unreachable { count: usize },
}

impl DomainError {
    pub fn parse(position: usize, kind: ParseErrorKind) -> Self {
        Self::Parse { position, kind }
    }

    /// True for invariant breaches, false for grammar violations.
    pub fn is_internal(&self) -> bool {
        !matches!(self, DomainError::Parse { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
