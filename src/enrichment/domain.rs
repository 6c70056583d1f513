//! Errors raised while talking to the remote catalog.
//!
//! Every variant is fatal for a run: nothing is retried and no partial
//! result is used.

use reqwest::StatusCode;

/// Errors that can occur during authentication or metadata lookup
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Token request to {url} failed: HTTP {status}: {body}")]
    Auth {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Token response from {url} was unusable: {reason}")]
    AuthPayload { url: String, reason: String },

    #[error("Metadata request {url} failed: HTTP {status} - headers: {}", format_headers(.headers))]
    Fetch {
        url: String,
        status: StatusCode,
        headers: Vec<(String, String)>,
    },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("API contract violation: expected {expected}, got {actual}")]
    ContractViolation { expected: String, actual: String },
}

impl EnrichmentError {
    /// Collect response headers for a [`EnrichmentError::Fetch`] report.
    pub(crate) fn collect_headers(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or("<non-ascii>").to_string(),
                )
            })
            .collect()
    }
}

fn format_headers(headers: &[(String, String)]) -> String {
    if headers.is_empty() {
        return "(none)".to_string();
    }
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}
