use std::str::FromStr;

use crate::error::{ParseError, UnusedArguments};
use crate::token_stream::TokenStream;

/// Parsed positional command arguments
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    /// Raw input string
    pub raw: String,

    /// Parsed tokens (respects quotes)
    pub tokens: Vec<String>,
}

impl ParsedArgs {
    /// Create ParsedArgs from raw string
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tokens = TokenStream::from_quoted(raw.as_str()).into_tokens();

        Self { raw, tokens }
    }

    /// Get positional arg by index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    /// Get all args after index (for variadic args)
    pub fn rest(&self, from: usize) -> &[String] {
        if from < self.tokens.len() {
            &self.tokens[from..]
        } else {
            &[]
        }
    }

    /// Parse arg at position as type T
    pub fn parse<T>(&self, index: usize) -> Result<T, ParseError>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let value = self
            .get(index)
            .ok_or(ParseError::MissingArg(index))?;

        value.parse().map_err(|e| ParseError::InvalidType {
            position: index,
            expected: std::any::type_name::<T>().to_string(),
            source: Box::new(e),
        })
    }

    /// Try to parse optional arg at position
    pub fn parse_optional<T>(&self, index: usize) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.get(index) {
            Some(_) => self.parse(index).map(Some),
            None => Ok(None),
        }
    }

    /// Fail if any tokens remain past the first `count`.
    ///
    /// Commands call this after binding their declared arguments; the
    /// error carries the unconsumed tail for display back to the user.
    pub fn expect_consumed(&self, count: usize) -> Result<(), ParseError> {
        if self.tokens.len() > count {
            let unused = UnusedArguments::from_tokens(self.tokens[count..].to_vec());
            return Err(ParseError::Unused(unused));
        }
        Ok(())
    }

    /// Number of parsed tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if no args were provided
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
