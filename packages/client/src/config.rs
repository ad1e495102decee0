//! Client configuration, populated from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.linkedin.com/voyager/api";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GraphQL persisted-query identifiers.
///
/// Upstream rotates these without notice, so each one can be overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIds {
    pub search: String,
    pub conversations: String,
    pub messages: String,
}

impl Default for QueryIds {
    fn default() -> Self {
        Self {
            search: "voyagerSearchDashClusters.ef3d0937fb65bd7812e32e5a85028e79".into(),
            conversations: "messengerConversations.9501074288a12f3ae9e3c7ea243bccbf".into(),
            messages: "messengerMessages.5846eeb71c981f11e0134cb6626cc314".into(),
        }
    }
}

/// Runtime configuration for a [`crate::Voyager`] client.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `LI_BASE_URL` | `https://www.linkedin.com/voyager/api` | API root every path is joined onto |
/// | `LI_USER_AGENT` | desktop Chrome | `user-agent` header |
/// | `LI_TIMEOUT_SECS` | `30` | Whole-request timeout |
/// | `LI_DEBUG` | (absent = off) | `1` or `true` enables per-request trace logs |
/// | `LI_SEARCH_QUERY_ID` | built in | Search GraphQL query id |
/// | `LI_CONVERSATIONS_QUERY_ID` | built in | Conversation listing query id |
/// | `LI_MESSAGES_QUERY_ID` | built in | Message listing query id |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Voyager API, without a trailing slash.
    pub base_url: String,

    pub user_agent: String,

    /// Applied by the HTTP client to each request as a whole.
    pub timeout: Duration,

    /// Emit `METHOD URL` and status lines for every request. Header values
    /// are never included.
    pub trace: bool,

    pub query_ids: QueryIds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout: DEFAULT_TIMEOUT,
            trace: false,
            query_ids: QueryIds::default(),
        }
    }
}

impl ClientConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// Blank values count as absent and unparseable numbers fall back to the
    /// default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = var("LI_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let trace = var("LI_DEBUG")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Self {
            base_url: var("LI_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: var("LI_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout,
            trace,
            query_ids: QueryIds {
                search: var("LI_SEARCH_QUERY_ID").unwrap_or(defaults.query_ids.search),
                conversations: var("LI_CONVERSATIONS_QUERY_ID")
                    .unwrap_or(defaults.query_ids.conversations),
                messages: var("LI_MESSAGES_QUERY_ID").unwrap_or(defaults.query_ids.messages),
            },
        }
    }

    /// Point the client at a different API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ClientConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(from_pairs(&[]), ClientConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let cfg = from_pairs(&[
            ("LI_BASE_URL", "http://127.0.0.1:9/voyager/api"),
            ("LI_USER_AGENT", "test-agent"),
            ("LI_TIMEOUT_SECS", "5"),
            ("LI_DEBUG", "TRUE"),
            ("LI_SEARCH_QUERY_ID", "voyagerSearchDashClusters.new"),
            ("LI_MESSAGES_QUERY_ID", "messengerMessages.new"),
        ]);
        assert_eq!(cfg.base_url, "http://127.0.0.1:9/voyager/api");
        assert_eq!(cfg.user_agent, "test-agent");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert!(cfg.trace);
        assert_eq!(cfg.query_ids.search, "voyagerSearchDashClusters.new");
        assert_eq!(cfg.query_ids.messages, "messengerMessages.new");
        assert_eq!(
            cfg.query_ids.conversations,
            QueryIds::default().conversations
        );
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = from_pairs(&[
            ("LI_TIMEOUT_SECS", "soon"),
            ("LI_DEBUG", "yes please"),
            ("LI_BASE_URL", "   "),
        ]);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert!(!cfg.trace);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);

        let cfg = from_pairs(&[("LI_TIMEOUT_SECS", "0"), ("LI_DEBUG", "1")]);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
        assert!(cfg.trace);
    }
}
