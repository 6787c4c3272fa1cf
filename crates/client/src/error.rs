use thiserror::Error;

/// Every variant is a transport or request failure; callers are not expected
/// to branch on the kind beyond reporting it.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid multipart part: {0}")]
    InvalidPart(String),
}

impl ClientError {
    pub fn status_error(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "Network error. Check your connection.",
            ClientError::Status { .. } => "The server rejected the request.",
            ClientError::InvalidUrl(_) => "The server address is not a valid URL.",
            ClientError::Io(_) => "Could not read a local file.",
            ClientError::InvalidPart(_) => "The form could not be encoded.",
        }
    }

    /// HTTP status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_code() {
        let err = ClientError::status_error(503, "unavailable");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Server returned 503: unavailable");
    }

    #[test]
    fn io_error_has_no_status() {
        let err = ClientError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "Could not read a local file.");
    }
}
