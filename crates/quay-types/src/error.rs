//! Type system errors

use thiserror::Error;

/// Errors raised when a boundary call site is rejected
///
/// These are build-time diagnostics: the oracle never fails at runtime,
/// it only refuses to admit a call site.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// The source type cannot stand in for the accepted type
    #[error("Type mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Accepted (destination) type
        expected: String,
        /// Supplied (source) type
        actual: String,
    },

    /// A union type was declared with no variants
    #[error("Union must have at least one variant")]
    EmptyUnion,

    /// A type id was not found in the context
    #[error("Unknown type: {id}")]
    UnknownType {
        /// The dangling id, rendered
        id: String,
    },

    /// A call site was declared against a non-function type
    #[error("Not a callable type: {actual}")]
    NotCallable {
        /// The declared type
        actual: String,
    },

    /// Argument count cannot be reconciled with the declared signature
    #[error("Arity mismatch: signature accepts {expected} arguments, got {actual}")]
    Arity {
        /// Number of arguments the signature accepts
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },
}
