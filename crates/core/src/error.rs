//! Error taxonomy for the generator.
//!
//! Every stage returns [`KmdError`]. None of them are recovered locally: the
//! CLI logs the error once and exits with a non-zero status.

use std::path::PathBuf;

/// Errors produced while loading, resolving, rendering or writing bindings.
#[derive(Debug, thiserror::Error)]
pub enum KmdError {
    /// Invalid configuration, malformed glob pattern or unusable input set.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A schema file (or a directory met during glob expansion) could not be read.
    #[error("failed to read schema {}: {source}", .path.display())]
    SchemaRead {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, unexpected document shape or invalid type expression.
    #[error("failed to parse schema {}: {message}", .path.display())]
    SchemaParse {
        /// Schema file.
        path: PathBuf,
        /// Parser or validation message.
        message: String,
    },

    /// A referenced type name has no registry entry.
    #[error("unresolved type `{name}` referenced by {context}")]
    UnresolvedType {
        /// Name as written in the schema.
        name: String,
        /// Where it was referenced, e.g. `Shape.move(to)`.
        context: String,
    },

    /// The same type name is declared twice across the schema corpus.
    #[error(
        "type `{name}` declared in {} is declared again in {}",
        .first.display(),
        .second.display()
    )]
    DuplicateType {
        /// Declared name.
        name: String,
        /// File of the first declaration.
        first: PathBuf,
        /// File of the second declaration.
        second: PathBuf,
    },

    /// An `extends` chain loops back on itself.
    #[error("inheritance cycle through remote class `{0}`")]
    InheritanceCycle(String),

    /// A unit could not be rendered as valid target code.
    #[error("failed to render {unit}: {message}")]
    Template {
        /// Type or class being rendered.
        unit: String,
        /// What made it unrenderable.
        message: String,
    },

    /// An output directory or file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = KmdError> = std::result::Result<T, E>;

impl KmdError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        KmdError::SchemaParse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unresolved(name: impl Into<String>, context: impl Into<String>) -> Self {
        KmdError::UnresolvedType {
            name: name.into(),
            context: context.into(),
        }
    }

    pub(crate) fn template(unit: impl Into<String>, message: impl Into<String>) -> Self {
        KmdError::Template {
            unit: unit.into(),
            message: message.into(),
        }
    }
}
