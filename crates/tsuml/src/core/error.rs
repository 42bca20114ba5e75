//! Core error types for diagram generation
//!
//! Normalization, engine selection and the finalize sinks all report through
//! [`DiagramError`].

use std::fmt;
use thiserror::Error;

/// What kind of symbol could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// The declaration's own name
    Declaration,
    /// A property member
    Property,
    /// A method member
    Method,
    /// An `extends` or `implements` reference
    Heritage,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Declaration => write!(f, "declaration"),
            SymbolKind::Property => write!(f, "property"),
            SymbolKind::Method => write!(f, "method"),
            SymbolKind::Heritage => write!(f, "heritage clause"),
        }
    }
}

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unresolved {kind} symbol in '{owner}'")]
    UnresolvedSymbol { owner: String, kind: SymbolKind },

    #[error("Unknown engine: {name} (available: {})", .available.join(", "))]
    UnknownEngine {
        name: String,
        available: Vec<String>,
    },

    #[error("Sink failure ({sink}): {message}")]
    SinkFailure { sink: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new unresolved symbol error
    pub fn unresolved(owner: impl Into<String>, kind: SymbolKind) -> Self {
        Self::UnresolvedSymbol {
            owner: owner.into(),
            kind,
        }
    }

    /// Create a new unknown engine error
    pub fn unknown_engine(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownEngine {
            name: name.into(),
            available,
        }
    }

    /// Create a new sink failure
    pub fn sink_failure(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkFailure {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

pub type DiagramResult<T> = Result<T, DiagramError>;
