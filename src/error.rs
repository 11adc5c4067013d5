use std::fmt;

use crate::binding::CompleterKind;

/// Errors raised while resolving a completer instance
#[derive(Debug)]
pub enum RegistryError {
    /// No factory has been registered for the requested kind
    UnknownKind(CompleterKind),

    /// The kind's factory failed to construct an instance
    Construction {
        kind: CompleterKind,
        source: anyhow::Error,
    },
}

impl RegistryError {
    /// The completer kind that could not be resolved
    pub fn kind(&self) -> CompleterKind {
        match self {
            RegistryError::UnknownKind(kind) => *kind,
            RegistryError::Construction { kind, .. } => *kind,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownKind(kind) => {
                write!(f, "No completer factory registered for {}", kind)
            }
            RegistryError::Construction { kind, source } => {
                write!(f, "Failed to construct completer {}: {}", kind, source)
            }
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::UnknownKind(_) => None,
            RegistryError::Construction { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Errors that can occur during completion
#[derive(Debug, Clone)]
pub enum CompletionError {
    /// API or service unavailable
    ServiceUnavailable(String),

    /// Invalid context for completion
    InvalidContext(String),

    /// Custom error
    Custom(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            CompletionError::InvalidContext(msg) => write!(f, "Invalid context: {}", msg),
            CompletionError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Trailing input the command did not consume.
///
/// Carries the unconsumed tail in both shapes consumers ask for: the
/// ordered token sequence and the space-joined display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedArguments {
    unconsumed: String,
    tokens: Vec<String>,
}

impl UnusedArguments {
    /// Build from the unconsumed tokens in order
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let unconsumed = tokens.join(" ");
        Self { unconsumed, tokens }
    }

    /// Build from an already-joined tail; tokens are recovered by
    /// whitespace splitting
    pub fn from_joined(unconsumed: impl Into<String>) -> Self {
        let unconsumed = unconsumed.into();
        let tokens = unconsumed.split_whitespace().map(String::from).collect();
        Self { unconsumed, tokens }
    }

    /// The space-joined unconsumed tail
    pub fn unconsumed(&self) -> &str {
        &self.unconsumed
    }

    /// The unconsumed tokens in the order they appeared
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for UnusedArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unconsumed arguments: {}", self.unconsumed)
    }
}

/// Errors that can occur during argument parsing
#[derive(Debug)]
pub enum ParseError {
    /// Missing required argument at position
    MissingArg(usize),

    /// Invalid type conversion for argument
    InvalidType {
        position: usize,
        expected: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The user supplied more arguments than the command consumes
    Unused(UnusedArguments),

    /// Generic parse error
    Custom(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingArg(pos) => write!(f, "Missing argument at position {}", pos),
            ParseError::InvalidType { position, expected, source } => {
                write!(f, "Invalid type for argument at position {}: expected {}, error: {}", position, expected, source)
            }
            ParseError::Unused(unused) => write!(f, "{}", unused),
            ParseError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<UnusedArguments> for ParseError {
    fn from(unused: UnusedArguments) -> Self {
        ParseError::Unused(unused)
    }
}
