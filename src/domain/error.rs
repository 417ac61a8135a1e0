//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations of the curriculum model.
/// These are programmer-facing: callers are expected to guard with the
/// matching `has_*` predicate instead of recovering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("term has no children: {id}")]
    NoChildren { id: String },

    #[error("term has no parent: {id}")]
    NoParent { id: String },

    #[error("term is the root of its tree: {id}")]
    IsRoot { id: String },

    #[error("term has no previous sibling: {id}")]
    NoPrevSibling { id: String },

    #[error("term has no next sibling: {id}")]
    NoNextSibling { id: String },

    #[error("term cannot be attached here: {id}")]
    InvalidAttachment { id: String },

    #[error("term is not part of this tree")]
    UnknownTerm,

    #[error("invalid context: {0}")]
    InvalidContext(String),

    #[error("invalid data structure: {0}")]
    InvalidDataStructure(String),

    #[error("array index {index} out of range in field path: {path}")]
    FieldIndexOutOfRange { path: String, index: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
