use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;
use crate::token_stream::TokenStream;

/// A completion suggestion with optional typed metadata
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Completion<M = ()> {
    /// The actual value to insert
    pub value: String,

    /// Optional human-readable label (defaults to value if None)
    pub label: Option<String>,

    /// Optional description for tooltips/help text
    pub description: Option<String>,

    /// Optional typed metadata for UI-specific rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<M>,
}

impl<M> Completion<M> {
    /// Create a simple completion with just a value
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            description: None,
            metadata: None,
        }
    }

    /// Create a completion with a description
    pub fn with_description(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            description: Some(description.into()),
            metadata: None,
        }
    }

    /// Add metadata to this completion
    pub fn with_metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add a custom label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Context handed to completers (immutable target reference)
pub struct Context<'a, T> {
    /// Parsed token stream (contains input, cursor, and tokens)
    pub tokens: TokenStream,

    /// Immutable reference to the target
    pub target: &'a T,
}

impl<'a, T> Context<'a, T> {
    /// Create a new context with stringable input
    pub fn new(input: impl ToString, target: &'a T) -> Self {
        let tokens = TokenStream::new(input.to_string());
        Self { tokens, target }
    }

    /// Create context from TokenStream (for advanced use cases)
    pub fn from_tokens(tokens: TokenStream, target: &'a T) -> Self {
        Self { tokens, target }
    }

    /// Get the token stream for this context
    pub fn stream(&self) -> &TokenStream {
        &self.tokens
    }

    /// Get the partial word being completed
    pub fn partial(&self) -> &str {
        self.tokens.partial()
    }
}

/// Trait for types that can provide async completions.
/// Type parameter T is the target type (defaults to () for context-free completion).
#[async_trait]
pub trait AsyncCompleter<T = ()>: Send + Sync {
    /// Generate completions for the context's partial input
    async fn complete(&self, ctx: &Context<'_, T>) -> Result<Vec<Completion>, CompletionError>;
}

impl<T> std::fmt::Debug for dyn AsyncCompleter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AsyncCompleter")
    }
}

/// Keep only completions whose value starts with the partial word,
/// case-insensitively
pub fn filter_completions<M>(completions: Vec<Completion<M>>, partial: &str) -> Vec<Completion<M>> {
    let partial = partial.to_lowercase();
    completions
        .into_iter()
        .filter(|c| c.value.to_lowercase().starts_with(&partial))
        .collect()
}
