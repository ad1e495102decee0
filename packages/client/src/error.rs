//! Error taxonomy for the Voyager client.
//!
//! Every failure that reached the network names the request that caused it,
//! so callers can report `METHOD URL` alongside the cause without keeping
//! their own bookkeeping.

use crate::token::TokenError;

/// Longest error-body snippet kept on [`Error::Status`], in bytes.
pub const MAX_ERROR_BODY: usize = 2000;

/// Errors returned by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --- preconditions, checked before any I/O -------------------------------
    /// `li_at` or `JSESSIONID` is missing.
    #[error("missing auth cookies (li_at, JSESSIONID)")]
    MissingCredentials,

    /// A required argument was empty or blank.
    #[error("{0} must not be empty")]
    EmptyArgument(&'static str),

    /// An argument was present but malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("base url must be an absolute http(s) url")]
    InvalidBaseUrl,

    /// The HTTP client itself could not be built.
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    // --- transport -----------------------------------------------------------
    #[error("{method} {url}: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The configured request timeout elapsed.
    #[error("{method} {url}: timed out")]
    Timeout { method: String, url: String },

    /// The caller's deadline passed before the request completed.
    #[error("request cancelled: deadline exceeded")]
    Cancelled,

    // --- HTTP status ---------------------------------------------------------
    #[error("{method} {url}: HTTP 429: rate limited, try again later")]
    RateLimited { method: String, url: String },

    /// Any other non-2xx response. `body` is a trimmed, truncated snippet.
    #[error("{method} {url}: HTTP {status}{}", body_suffix(.body))]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    // --- payloads ------------------------------------------------------------
    #[error("{method} {url}: decode response json: {source}")]
    Decode {
        method: String,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("encode request json: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// A successful response did not contain what the operation needs.
    #[error("could not resolve {0} from the response")]
    Unresolved(&'static str),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl Error {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }

    /// The HTTP status for status-class errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RateLimited { .. } => Some(429),
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `(method, url)` of the request that failed, when one was sent.
    pub fn request(&self) -> Option<(&str, &str)> {
        match self {
            Error::Transport { method, url, .. }
            | Error::Timeout { method, url }
            | Error::RateLimited { method, url }
            | Error::Status { method, url, .. }
            | Error::Decode { method, url, .. } => Some((method.as_str(), url.as_str())),
            _ => None,
        }
    }
}

/// Trim `body` and cut it to at most [`MAX_ERROR_BODY`] bytes on a char
/// boundary, marking the cut with `…`.
pub(crate) fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.len() <= MAX_ERROR_BODY {
        return text.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

// --- tests -------------------------------------------------------------------
