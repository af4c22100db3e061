use thiserror::Error;

/// Errors raised when resolving a requested page number.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    #[error("That page number is not an integer")]
    NotAnInteger,
    #[error("That page number is less than 1")]
    LessThanOne,
    #[error("That page contains no results")]
    NoResults,
}

impl PageError {
    /// Returns true for errors that denote a page outside the valid range.
    pub fn is_empty_page(&self) -> bool {
        matches!(self, PageError::LessThanOne | PageError::NoResults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_page() {
        assert!(!PageError::NotAnInteger.is_empty_page());
        assert!(PageError::LessThanOne.is_empty_page());
        assert!(PageError::NoResults.is_empty_page());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PageError::NoResults.to_string(),
            "That page contains no results"
        );
    }
}
