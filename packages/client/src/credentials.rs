//! Session cookies and the headers derived from them.

use std::fmt;

/// The two session cookies every Voyager request needs.
///
/// `Debug` output never includes the cookie values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub li_at: String,
    /// The raw `JSESSIONID` cookie, quoted (`"ajax:123"`) or not.
    pub jsessionid: String,
}

impl Credentials {
    pub fn new(li_at: impl Into<String>, jsessionid: impl Into<String>) -> Self {
        Self {
            li_at: li_at.into(),
            jsessionid: jsessionid.into(),
        }
    }

    /// Both cookies are present.
    pub fn is_complete(&self) -> bool {
        !self.li_at.is_empty() && !self.jsessionid.is_empty()
    }

    /// The `csrf-token` header value: `JSESSIONID` without its quotes.
    pub fn csrf_token(&self) -> &str {
        self.jsessionid.trim_matches('"')
    }

    /// `JSESSIONID` as it must appear in the cookie header, always quoted.
    pub fn jsessionid_cookie_value(&self) -> String {
        let v = &self.jsessionid;
        if v.is_empty() {
            String::new()
        } else if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
            v.clone()
        } else {
            format!("\"{v}\"")
        }
    }

    /// `li_at=…; JSESSIONID="…"`, omitting whichever part is empty.
    pub fn cookie_header(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.li_at.is_empty() {
            parts.push(format!("li_at={}", self.li_at));
        }
        let session = self.jsessionid_cookie_value();
        if !session.is_empty() {
            parts.push(format!("JSESSIONID={session}"));
        }
        parts.join("; ")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &str| if v.is_empty() { "<empty>" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("li_at", &redact(&self.li_at))
            .field("jsessionid", &redact(&self.jsessionid))
            .finish()
    }
}

// --- tests -------------------------------------------------------------------
