//! Method signatures for exact-match identification of callables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a signature from a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector string was empty.
    #[error("selector string is empty")]
    Empty,
    /// A keyword part between colons was empty (e.g. `a::b:`).
    #[error("selector has an empty keyword part at position {0}")]
    EmptyPart(usize),
}

/// Identifies a callable by base name and ordered keyword-argument parts.
///
/// Two signatures are equal iff the base names match and the keyword-part
/// sequences match element by element, including length. Matching is
/// arity-sensitive: `createDirectoryAtPath:` is a different signature from
/// `createDirectoryAtPath:withIntermediateDirectories:attributes:error:`.
/// No normalization is applied; comparison is case- and whitespace-sensitive.
///
/// Canonical form: `keyword_parts` holds every colon-terminated part of a
/// parameterized method and is empty for a method that takes no arguments;
/// `base_name` always holds the first identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    base_name: String,
    keyword_parts: Vec<String>,
}

impl MethodSignature {
    /// Creates a signature from a base name and keyword parts.
    #[must_use]
    pub fn new<I, S>(base_name: impl Into<String>, keyword_parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_name: base_name.into(),
            keyword_parts: keyword_parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a signature for a method that takes no arguments (e.g. `load`).
    #[must_use]
    pub fn nullary(name: impl Into<String>) -> Self {
        Self {
            base_name: name.into(),
            keyword_parts: Vec::new(),
        }
    }

    /// Parses a selector string such as `fileExistsAtPath:` or `load`.
    ///
    /// A trailing colon marks a parameterized method; each colon terminates
    /// one keyword part. A string without colons is a no-argument method.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the string is empty or has an empty
    /// keyword part.
    pub fn parse(selector: &str) -> Result<Self, SelectorError> {
        if selector.is_empty() {
            return Err(SelectorError::Empty);
        }

        if !selector.contains(':') {
            return Ok(Self::nullary(selector));
        }

        let mut parts = Vec::new();
        for (index, part) in selector.split_terminator(':').enumerate() {
            if part.is_empty() {
                return Err(SelectorError::EmptyPart(index));
            }
            parts.push(part.to_string());
        }
        // split_terminator drops the trailing empty segment after the final
        // colon but not interior ones, so `a::b:` still errors above.
        let base_name = parts[0].clone();
        Ok(Self {
            base_name,
            keyword_parts: parts,
        })
    }

    /// Returns the base name (first identifier) of the signature.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the ordered keyword parts; empty for a no-argument method.
    #[must_use]
    pub fn keyword_parts(&self) -> &[String] {
        &self.keyword_parts
    }

    /// Returns the number of keyword arguments this signature takes.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.keyword_parts.len()
    }
}

impl std::fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.keyword_parts.is_empty() {
            write!(f, "{}", self.base_name)
        } else {
            for part in &self.keyword_parts {
                write!(f, "{part}:")?;
            }
            Ok(())
        }
    }
}
