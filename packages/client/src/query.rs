//! Query-string builders for the tuple grammar used by the GraphQL endpoints.
//!
//! Variables such as
//! `(start:0,query:(keywords:rust%20dev,queryParameters:List((key:resultType,value:List(PEOPLE)))))`
//! are sent with `( ) , :` as literal syntax. Values embedded in a tuple are
//! percent-encoded individually, so a URN's own colons and parentheses cannot
//! be mistaken for structure. The assembled fragment is then appended to the
//! URL as-is. Running it through a generic URL encoder a second time would
//! corrupt the syntax, which is why [`RawQuery`] never re-encodes.

use std::fmt;

/// One value in a tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleValue {
    /// Written verbatim: enum symbols such as `INBOX` or `PEOPLE`.
    Literal(String),
    Int(i64),
    /// An opaque identifier; percent-encoded in full.
    Urn(String),
    /// Free text; percent-encoded with spaces as `%20`.
    Text(String),
    Tuple(Tuple),
    /// `List(a,b,…)`.
    List(Vec<TupleValue>),
}

/// An ordered `(key:value,…)` record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tuple {
    fields: Vec<(String, TupleValue)>,
}

impl Tuple {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: TupleValue) -> Self {
        self.fields.push((key.into(), value));
        self
    }

    pub fn literal(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(key, TupleValue::Literal(value.into()))
    }

    pub fn int(self, key: impl Into<String>, value: i64) -> Self {
        self.field(key, TupleValue::Int(value))
    }

    pub fn urn(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(key, TupleValue::Urn(value.into()))
    }

    pub fn text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(key, TupleValue::Text(value.into()))
    }

    pub fn tuple(self, key: impl Into<String>, value: Tuple) -> Self {
        self.field(key, TupleValue::Tuple(value))
    }

    pub fn list(self, key: impl Into<String>, items: Vec<TupleValue>) -> Self {
        self.field(key, TupleValue::List(items))
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}:{value}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for TupleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TupleValue::Literal(s) => f.write_str(s),
            TupleValue::Int(n) => write!(f, "{n}"),
            TupleValue::Urn(s) => f.write_str(&encode_urn(s)),
            TupleValue::Text(s) => f.write_str(&encode_text(s)),
            TupleValue::Tuple(t) => write!(f, "{t}"),
            TupleValue::List(items) => {
                f.write_str("List(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Percent-encode an identifier for embedding in a tuple.
///
/// Everything outside the unreserved set is encoded, which covers the
/// required `:`→`%3A`, `(`→`%28`, `)`→`%29` and `,`→`%2C`.
pub fn encode_urn(urn: &str) -> String {
    urlencoding::encode(urn).into_owned()
}

/// Percent-encode free text for embedding in a tuple. Spaces become `%20`,
/// never `+`.
pub fn encode_text(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// A pre-encoded `k=v&k=v` query string.
///
/// Values are appended exactly as given; callers encode them first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    parts: Vec<String>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.parts.push(format!("{key}={value}"));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for RawQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("&"))
    }
}

impl From<RawQuery> for String {
    fn from(q: RawQuery) -> Self {
        q.to_string()
    }
}

// --- request variables -------------------------------------------------------

/// Variables for a people or jobs search.
pub fn search_variables(keywords: &str, result_type: &str, start: i64) -> Tuple {
    Tuple::new().int("start", start).literal("origin", "OTHER").tuple(
        "query",
        Tuple::new()
            .text("keywords", keywords)
            .literal("flagshipSearchIntent", "SEARCH_SRP")
            .list(
                "queryParameters",
                vec![TupleValue::Tuple(
                    Tuple::new().literal("key", "resultType").list(
                        "value",
                        vec![TupleValue::Literal(result_type.to_string())],
                    ),
                )],
            )
            .literal("includeFiltersInResponse", "false"),
    )
}

/// Variables for an inbox listing.
pub fn conversations_variables(mailbox_urn: &str, count: i64) -> Tuple {
    let inbox = Tuple::new().tuple(
        "conversationCategoryPredicate",
        Tuple::new().literal("category", "INBOX"),
    );
    Tuple::new()
        .tuple(
            "query",
            Tuple::new().list("predicateUnions", vec![TupleValue::Tuple(inbox)]),
        )
        .int("count", count)
        .urn("mailboxUrn", mailbox_urn)
}

/// Variables for reading one conversation.
pub fn messages_variables(conversation_urn: &str) -> Tuple {
    Tuple::new().urn("conversationUrn", conversation_urn)
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urn_encoding_covers_tuple_syntax() {
        assert_eq!(
            encode_urn("urn:li:msg_conversation:(urn:li:fsd_profile:AAA,2-MjkzM)"),
            "urn%3Ali%3Amsg_conversation%3A%28urn%3Ali%3Afsd_profile%3AAAA%2C2-MjkzM%29"
        );
        assert_eq!(encode_urn("urn:li:fsd_profile:ABC"), "urn%3Ali%3Afsd_profile%3AABC");
    }

    #[test]
    fn text_uses_percent_twenty() {
        assert_eq!(encode_text("rust developer"), "rust%20developer");
        assert_eq!(encode_text("c++ & go"), "c%2B%2B%20%26%20go");
    }

    #[test]
    fn search_tuple() {
        assert_eq!(
            search_variables("software engineer", "PEOPLE", 10).to_string(),
            "(start:10,origin:OTHER,query:(keywords:software%20engineer,\
             flagshipSearchIntent:SEARCH_SRP,\
             queryParameters:List((key:resultType,value:List(PEOPLE))),\
             includeFiltersInResponse:false))"
        );
    }

    #[test]
    fn conversations_tuple() {
        assert_eq!(
            conversations_variables("urn:li:fsd_profile:AAA", 20).to_string(),
            "(query:(predicateUnions:List((conversationCategoryPredicate:(category:INBOX)))),\
             count:20,mailboxUrn:urn%3Ali%3Afsd_profile%3AAAA)"
        );
    }

    #[test]
    fn messages_tuple() {
        assert_eq!(
            messages_variables("urn:li:msg_conversation:(urn:li:fsd_profile:AAA,2-MjkzM)")
                .to_string(),
            "(conversationUrn:urn%3Ali%3Amsg_conversation%3A%28urn%3Ali%3Afsd_profile%3AAAA%2C2-MjkzM%29)"
        );
    }

    #[test]
    fn raw_query_is_not_reencoded() {
        let q = RawQuery::new()
            .param("variables", messages_variables("urn:li:x:1"))
            .param("queryId", "messengerMessages.abc");
        assert_eq!(
            q.to_string(),
            "variables=(conversationUrn:urn%3Ali%3Ax%3A1)&queryId=messengerMessages.abc"
        );
        assert!(RawQuery::new().is_empty());
    }

    #[test]
    fn empty_list_and_tuple() {
        let t = Tuple::new().list("xs", vec![]).tuple("t", Tuple::new());
        assert_eq!(t.to_string(), "(xs:List(),t:())");
    }
}
