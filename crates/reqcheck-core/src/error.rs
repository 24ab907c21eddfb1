use thiserror::Error;

/// Errors raised on the registry fetch path.
///
/// These never escape the public metadata lookup boundary: a failed fetch
/// degrades to "package unknown" there, so callers only deal with presence
/// or absence. The typed variants exist for logging and for tests that
/// exercise the fetch internals.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The registry answered with a non-success status for this package
    #[error("package '{package}' not found on PyPI")]
    PackageNotFound { package: String },

    /// Transport-level failure, including the per-request timeout
    #[error("registry request failed for '{package}': {source}")]
    Registry {
        package: String,
        #[source]
        source: reqwest::Error,
    },

    /// The registry responded, but the body was not the expected JSON
    #[error("failed to parse registry response for '{package}': {source}")]
    ApiResponse {
        package: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for `Result<T, CheckError>`.
pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_not_found_display() {
        let error = CheckError::PackageNotFound {
            package: "definitely-not-real".into(),
        };
        assert_eq!(
            error.to_string(),
            "package 'definitely-not-real' not found on PyPI"
        );
    }

    #[test]
    fn test_api_response_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = CheckError::ApiResponse {
            package: "flask".into(),
            source: json_err,
        };
        assert!(error.to_string().contains("flask"));
        assert!(
            error
                .to_string()
                .starts_with("failed to parse registry response")
        );
    }
}
