use thiserror::Error;

/// Failure talking to an upstream provider
///
/// Keeps the upstream HTTP status when there was one so callers can tell a
/// missing title (404) apart from a provider that is down.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{provider} returned HTTP {status}: {message}")]
    Status {
        provider: &'static str,
        status: u16,
        message: String,
    },
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        source: reqwest::Error,
    },
    #[error("{provider} request timed out")]
    Timeout { provider: &'static str },
    #[error("{provider} returned an unexpected payload: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl SourceError {
    pub fn timeout(provider: &'static str) -> Self {
        SourceError::Timeout { provider }
    }

    pub(crate) fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return SourceError::Timeout { provider };
        }
        match err.status() {
            Some(status) => SourceError::Status {
                provider,
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => SourceError::Request { provider, source: err },
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            SourceError::Status { provider, .. }
            | SourceError::Request { provider, .. }
            | SourceError::Timeout { provider }
            | SourceError::Decode { provider, .. } => provider,
        }
    }

    /// Upstream HTTP status, if the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
