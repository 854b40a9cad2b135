use thiserror::Error;

/// Errors raised when the search tree or the board is used outside of its contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SearchError::InvalidArgument("column 9 out of range".to_string());
        assert_eq!(err.to_string(), "invalid argument: column 9 out of range");

        let err = SearchError::PreconditionViolation("state is not expanded".to_string());
        assert_eq!(
            err.to_string(),
            "precondition violated: state is not expanded"
        );
    }
}
