//! Error types for schema generation and universe loading.

use std::path::PathBuf;

use crate::ir::{Primitive, TypeRef};

/// Failure of a single `generate` call. Never aborts the whole run by itself;
/// the driver decides whether to stop or report and continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenError {
    #[error("unsupported primitive kind {0}")]
    UnsupportedKind(Primitive),

    #[error("field `{field}` refers to `{reference}`, which is not in the universe")]
    UnresolvedReference { field: String, reference: TypeRef },

    #[error("entry type `{0}` is not in the universe")]
    UnknownEntry(TypeRef),

    #[error("cannot assign an import alias for `{namespace}`: `{alias}` is already taken by `{existing}`")]
    AliasCollision {
        alias: String,
        namespace: String,
        existing: String,
    },

    #[error("`{0}` is not a qualified type name (expected `namespace.Name`)")]
    InvalidTypeRef(String),
}

/// Failure to build a `Universe` from input files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: at JSON path {json_path} → {message}", path.display())]
    Json {
        path: PathBuf,
        json_path: String,
        message: String,
    },

    #[error("type `{0}` is declared more than once")]
    Duplicate(TypeRef),
}
