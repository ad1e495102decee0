//! URN and public-identifier helpers.
//!
//! Voyager identifiers are colon-delimited (`urn:li:fsd_profile:ACoAA…`). The
//! trailing segment is the opaque member or content ID. Composite URNs such as
//! `urn:li:msg_conversation:(urn:li:fsd_profile:AAA,2-MjkzM)` are treated as
//! opaque strings; only their final segment is ever extracted.

/// Prefix of legacy member URNs.
pub const MEMBER_URN_PREFIX: &str = "urn:li:member:";

/// Fragment identifying current-generation profile URNs.
pub const PROFILE_URN_MARKER: &str = "fsd_profile";

/// The trailing segment of `urn`, after the last `:`.
///
/// Input is trimmed first. Blank input, input without a colon and input
/// ending in a colon all yield `""` rather than an error.
pub fn urn_id(urn: &str) -> &str {
    let urn = urn.trim();
    match urn.rfind(':') {
        Some(i) if i + 1 < urn.len() => &urn[i + 1..],
        _ => "",
    }
}

/// `urn:li:member:<id>`, or `""` when `member_id` is empty.
pub fn member_urn(member_id: &str) -> String {
    if member_id.is_empty() {
        String::new()
    } else {
        format!("{MEMBER_URN_PREFIX}{member_id}")
    }
}

/// Reduce a handle, profile URL or navigation URL to a public identifier.
///
/// Accepts `@jane-doe`, `jane-doe`, `linkedin.com/in/jane-doe/` and full
/// `https://` URLs. For URLs the segment after `in` or `pub` is returned, or
/// the last path segment when neither marker is present. Query strings and
/// fragments are ignored.
pub fn normalize_public_identifier(input: &str) -> String {
    let s = input.trim();
    let s = s.strip_prefix('@').unwrap_or(s);
    let s = s.trim_matches('/');

    let Some(host_at) = s.find("linkedin.com/") else {
        return s.to_string();
    };

    let after_host = &s[host_at + "linkedin.com/".len()..];
    let path = after_host
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_matches('/');
    let parts: Vec<&str> = path.split('/').collect();

    for pair in parts.windows(2) {
        if matches!(pair[0], "in" | "pub") {
            return pair[1].to_string();
        }
    }
    parts.last().map(|p| p.to_string()).unwrap_or_default()
}

// --- tests -------------------------------------------------------------------
