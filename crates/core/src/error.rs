//! Error taxonomy for field introspection
//!
//! Every failure is classified; path-traversal failures carry the qualified
//! field path at the point of first failure (e.g. `"nested.bla"`, not just
//! `"bla"`). Nothing here wraps or re-annotates errors from deeper levels.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Classified introspection failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The instance (not a path segment) is neither a record nor a
    /// reference to one.
    #[error("not a record: {0}")]
    NotARecord(&'static str),

    /// A path segment named a field that is absent or not exported.
    #[error("no such field: {0}")]
    FieldNotFound(String),

    /// An intermediate reference was nil and cannot be descended into.
    #[error("nil reference: {0}")]
    NilReference(String),

    /// A non-terminal segment resolved to a non-record value.
    #[error("field {path} expected to be a record, found {type_name}")]
    TypeExpected {
        path: String,
        type_name: &'static str,
    },

    /// A write supplied a value whose runtime type differs from the field's
    /// declared type.
    #[error("type mismatch for field {path}: expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Tag lookup reached a field that exists but is not exported.
    #[error("cannot read tag of non-exported field: {0}")]
    FieldNotExported(String),
}
