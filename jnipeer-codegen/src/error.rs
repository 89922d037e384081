//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit status for errors caused by the input model or environment.
pub const EXIT_USER_ERROR: u8 = 15;

/// Process exit status for defects in the generator itself.
pub const EXIT_INTERNAL_BUG: u8 = 11;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model parsing error.
    #[error("model parse error: {0}")]
    Parse(#[from] jnipeer_model::ParseError),

    /// Model consistency error.
    #[error("model error: {0}")]
    Model(#[from] jnipeer_model::ModelError),

    /// IO error while reading, comparing or writing an artifact.
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Two distinct identifiers mangle to the same native symbol.
    #[error("symbol '{symbol}' in '{scope}' is produced by both '{first}' and '{second}'")]
    SymbolCollision {
        /// Class, method or run the symbol belongs to.
        scope: String,
        /// Colliding native symbol.
        symbol: String,
        /// First identifier.
        first: String,
        /// Second identifier.
        second: String,
    },

    /// Internal generator defect (contract violation).
    #[error("internal error (generator bug): {message}")]
    Bug {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an internal bug error with the given message.
    pub fn bug(message: impl Into<String>) -> Self {
        Self::Bug {
            message: message.into(),
        }
    }

    /// Creates an IO error for the given artifact path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error signals a defect in the generator rather
    /// than a problem with its input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Bug { .. })
    }

    /// Returns the process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_internal() {
            EXIT_INTERNAL_BUG
        } else {
            EXIT_USER_ERROR
        }
    }
}
