//! Collect-all-errors accumulator used by aggregate constructors.

use std::fmt;

use super::DomainError;

/// Ordered list of validation failures from one construction call.
///
/// Errors keep the order in which fields were validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<DomainError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: DomainError) {
        self.0.push(error);
    }

    /// Keep the value of `result`, or record its error and yield `None`.
    pub fn collect<T>(&mut self, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    /// Merge errors produced by a nested constructor.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn has_any(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, error: &DomainError) -> bool {
        self.0.contains(error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DomainError> {
        self.0.iter()
    }

    /// User-facing message for every collected error.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn into_inner(self) -> Vec<DomainError> {
        self.0
    }
}

impl From<DomainError> for ValidationErrors {
    fn from(error: DomainError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = DomainError;
    type IntoIter = std::vec::IntoIter<DomainError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
