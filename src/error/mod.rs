use thiserror::Error;

/// Failures surfaced to the caller of a client operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("client {0} not found")]
    NotFound(i32),

    #[error("no client ids left to assign")]
    IdsExhausted,
}

impl ApiError {
    /// HTTP status code this error is reported with
    pub fn status(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::IdsExhausted => 409,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidInput("bad".into()).status(), 400);
        assert_eq!(ApiError::NotFound(3).status(), 404);
        assert_eq!(ApiError::IdsExhausted.status(), 409);
        assert_eq!(ApiError::NotFound(3).to_string(), "client 3 not found");
    }
}
