use reqwest::StatusCode;

#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    Timeout,
    Status(StatusCode),
    /// The server answered 2xx with a body that is not JSON.
    Decode { source: serde_json::Error, body: String },
    /// Base URL plus endpoint does not form an absolute URL. Raised by `TeamcraftClient::new` only.
    InvalidBaseUrl { url: String, source: url::ParseError },
    #[cfg(test)]
    MockQueueEmpty,
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Http(err)
        }
    }

    pub(crate) fn decode(source: serde_json::Error, bytes: &[u8]) -> Self {
        ApiError::Decode { source, body: String::from_utf8_lossy(bytes).into_owned() }
    }

    /// Transport-level failures; anything else means the server answered.
    pub fn is_network(&self) -> bool {
        match self {
            ApiError::Http(_) | ApiError::Timeout | ApiError::Status(_) => true,
            ApiError::Decode { .. } | ApiError::InvalidBaseUrl { .. } => false,
            #[cfg(test)]
            ApiError::MockQueueEmpty => true,
        }
    }

    /// Undecodable response text, kept for the error artifact.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(err) => write!(f, "http error: {err}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Status(status) => write!(f, "api returned {status}"),
            ApiError::Decode { source, .. } => write!(f, "decode error: {source}"),
            ApiError::InvalidBaseUrl { url, source } => write!(f, "invalid search url {url:?}: {source}"),
            #[cfg(test)]
            ApiError::MockQueueEmpty => write!(f, "mock api response queue is empty"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(err) => Some(err),
            ApiError::Decode { source, .. } => Some(source),
            ApiError::InvalidBaseUrl { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ApiError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(format!("{err}"), "api returned 503 Service Unavailable");
        assert!(err.is_network());
    }

    #[test]
    fn decode_error_keeps_body_and_is_not_network() {
        let bytes = b"<html>";
        let err = ApiError::decode(serde_json::from_slice::<serde_json::Value>(bytes).unwrap_err(), bytes);
        assert!(!err.is_network());
        assert!(format!("{err}").starts_with("decode error"));
        assert_eq!(err.body(), Some("<html>"));
        assert_eq!(ApiError::Timeout.body(), None);
    }
}
