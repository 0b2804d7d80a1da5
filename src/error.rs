//! Startup errors.
//!
//! Provider failures during a query are never fatal and live next to the
//! providers (`GenerationError`, `SearchError`, `VideoSearchError`). Only
//! the errors below stop the process before the UI starts.

/// Fatal errors raised while building the application
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("missing credential: set the {var} environment variable")]
    MissingCredential { var: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_the_variable() {
        let err = InitError::MissingCredential {
            var: "TAVILY_API_KEY".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing credential: set the TAVILY_API_KEY environment variable"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InitError>();
    }
}
