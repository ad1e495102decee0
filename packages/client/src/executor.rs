//! Authenticated request execution.
//!
//! [`Executor`] owns one pooled [`reqwest::Client`], the session
//! [`Credentials`] and the [`ClientConfig`]. Each call:
//!
//! 1. rejects the request with [`Error::MissingCredentials`] if either cookie
//!    is absent, before any I/O;
//! 2. joins the path onto the configured base URL and appends the query;
//! 3. sets the fixed Voyager header set, plus the per-request
//!    [`HeaderProfile`] overrides;
//! 4. reads at most [`MAX_BODY_BYTES`] of the response and classifies it.
//!
//! Dropping the returned future aborts the in-flight request. Use
//! [`with_deadline`] to bound a call by an absolute deadline.

use std::future::Future;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::info;

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{body_snippet, Error};

/// Response bodies beyond this many bytes are cut off.
pub const MAX_BODY_BYTES: usize = 5 << 20;

/// `tracing` target for the per-request trace lines.
pub const TRACE_TARGET: &str = "voyager_client::http";

const ACCEPT_NORMALIZED: &str = "application/vnd.linkedin.normalized+json+2.1";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
const CONTENT_TYPE_PLAIN: &str = "text/plain;charset=UTF-8";
const ACCEPT_PLAIN_PROFILE: &str = "application/json";

/// How the query string is supplied. Raw and key/value queries are mutually
/// exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Query {
    #[default]
    None,
    /// Appended after `?` exactly as given.
    Raw(String),
    /// Each key and value is percent-encoded.
    Pairs(Vec<(String, String)>),
}

impl Query {
    fn render(&self) -> Option<String> {
        match self {
            Query::None => None,
            Query::Raw(raw) if raw.is_empty() => None,
            Query::Raw(raw) => Some(raw.clone()),
            Query::Pairs(pairs) if pairs.is_empty() => None,
            Query::Pairs(pairs) => Some(
                pairs
                    .iter()
                    .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&"),
            ),
        }
    }
}

/// Header set applied on top of the fixed Voyager headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderProfile {
    #[default]
    Default,
    /// Messaging write endpoints: `content-type: text/plain;charset=UTF-8`
    /// and `accept: application/json`.
    PlainText,
}

/// One request to send through an [`Executor`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Query,
    body: Option<Vec<u8>>,
    profile: HeaderProfile,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::None,
            body: None,
            profile: HeaderProfile::Default,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Use a pre-encoded query string, replacing any previous query.
    pub fn raw_query(mut self, raw: impl Into<String>) -> Self {
        self.query = Query::Raw(raw.into());
        self
    }

    /// Use key/value pairs, replacing any previous query.
    pub fn pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query = Query::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_vec(body).map_err(Error::Encode)?);
        Ok(self)
    }

    pub fn plain_text(mut self) -> Self {
        self.profile = HeaderProfile::PlainText;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// A classified 2xx response.
struct Received {
    method: String,
    url: String,
    body: Vec<u8>,
}

impl Received {
    fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, Error> {
        if self.body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(|source| Error::Decode {
                method: self.method.clone(),
                url: self.url.clone(),
                source,
            })
    }
}

/// Sends authenticated requests to the Voyager API.
#[derive(Debug, Clone)]
pub struct Executor {
    http: Client,
    credentials: Credentials,
    config: ClientConfig,
}

impl Executor {
    /// Build an executor with its own HTTP client, configured with
    /// `config.timeout`.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;
        Self::with_http_client(credentials, config, http)
    }

    /// Build an executor around a caller-supplied HTTP client.
    pub fn with_http_client(
        credentials: Credentials,
        config: ClientConfig,
        http: Client,
    ) -> Result<Self, Error> {
        let base = Url::parse(&config.base_url).map_err(|_| Error::InvalidBaseUrl)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl);
        }
        Ok(Self {
            http,
            credentials,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The absolute URL `request` will be sent to.
    pub fn url_for(&self, request: &ApiRequest) -> String {
        let mut url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        if let Some(query) = request.query.render() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Send `request` and decode the response body as `T`.
    ///
    /// An empty 2xx body yields `Ok(None)`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<T>, Error> {
        self.send(request).await?.decode()
    }

    /// Send `request` and return the decoded JSON document, `Value::Null`
    /// for an empty body.
    pub async fn execute_document(&self, request: ApiRequest) -> Result<Value, Error> {
        Ok(self.execute::<Value>(request).await?.unwrap_or(Value::Null))
    }

    /// Send `request`, checking only the status.
    pub async fn execute_discard(&self, request: ApiRequest) -> Result<(), Error> {
        self.send(request).await.map(drop)
    }

    async fn send(&self, request: ApiRequest) -> Result<Received, Error> {
        if !self.credentials.is_complete() {
            return Err(Error::MissingCredentials);
        }

        let url = self.url_for(&request);
        let method = request.method.to_string();

        // `RequestBuilder::header` appends; profile-dependent headers are set once.
        let (accept, content_type) = match request.profile {
            HeaderProfile::Default => (ACCEPT_NORMALIZED, CONTENT_TYPE_JSON),
            HeaderProfile::PlainText => (ACCEPT_PLAIN_PROFILE, CONTENT_TYPE_PLAIN),
        };

        let mut builder = self
            .http
            .request(request.method, &url)
            .header("user-agent", &self.config.user_agent)
            .header("accept", accept)
            .header("accept-language", ACCEPT_LANGUAGE)
            .header("x-li-lang", "en_US")
            .header("x-restli-protocol-version", "2.0.0")
            .header("csrf-token", self.credentials.csrf_token())
            .header("cookie", self.credentials.cookie_header());

        if let Some(body) = request.body {
            builder = builder.header("content-type", content_type).body(body);
        } else if request.profile == HeaderProfile::PlainText {
            builder = builder.header("content-type", content_type);
        }

        if self.config.trace {
            info!(target: TRACE_TARGET, "{method} {url}");
        }

        let transport = |source: reqwest::Error| {
            if source.is_timeout() {
                Error::Timeout {
                    method: method.clone(),
                    url: url.clone(),
                }
            } else {
                Error::Transport {
                    method: method.clone(),
                    url: url.clone(),
                    source,
                }
            }
        };

        let mut response = builder.send().await.map_err(transport)?;
        let status = response.status();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            let room = MAX_BODY_BYTES - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        if self.config.trace {
            info!(target: TRACE_TARGET, "-> {} ({} bytes)", status.as_u16(), body.len());
        }

        if status.as_u16() == 429 {
            return Err(Error::RateLimited { method, url });
        }
        if !status.is_success() {
            return Err(Error::Status {
                method,
                url,
                status: status.as_u16(),
                body: body_snippet(&body),
            });
        }

        Ok(Received { method, url, body })
    }
}

/// Run `fut`, giving up with [`Error::Cancelled`] once `deadline` passes.
///
/// The in-flight request is dropped, and therefore aborted, at the deadline.
pub async fn with_deadline<T, F>(deadline: Instant, fut: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    tokio::time::timeout_at(deadline, fut)
        .await
        .map_err(|_| Error::Cancelled)?
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
