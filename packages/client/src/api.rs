//! The typed API surface.
//!
//! Every [`Voyager`] operation validates its arguments, issues exactly one
//! request through the [`Executor`] and hands the decoded document to the
//! matching resolver in the `voyager` crate. Messaging operations live in
//! [`crate::messaging`].

use serde_json::{json, Map, Value};
use voyager::urn::{urn_id, MEMBER_URN_PREFIX, PROFILE_URN_MARKER};
use voyager::{
    resolve_created_urn, resolve_feed_updates, resolve_me, resolve_profile,
    resolve_search_results, CreatedPost, Document, FeedUpdate, Me, Profile, SearchItem,
};

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::Error;
use crate::executor::{ApiRequest, Executor};
use crate::query::{search_variables, RawQuery};

pub const DEFAULT_SEARCH_COUNT: i64 = 10;
pub const DEFAULT_POSTS_COUNT: i64 = 10;

/// What a search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    People,
    Jobs,
}

impl SearchKind {
    pub fn result_type(self) -> &'static str {
        match self {
            SearchKind::People => "PEOPLE",
            SearchKind::Jobs => "JOBS",
        }
    }
}

/// An authenticated Voyager API client.
#[derive(Debug, Clone)]
pub struct Voyager {
    exec: Executor,
}

impl Voyager {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::from_executor(Executor::new(credentials, config)?))
    }

    pub fn from_executor(exec: Executor) -> Self {
        Self { exec }
    }

    pub fn executor(&self) -> &Executor {
        &self.exec
    }

    pub(crate) async fn document(&self, request: ApiRequest) -> Result<Value, Error> {
        self.exec.execute_document(request).await
    }

    /// The signed-in member.
    pub async fn me(&self) -> Result<Me, Error> {
        let body = self.document(ApiRequest::get("/me")).await?;
        Ok(resolve_me(&Document::new(&body)))
    }

    /// Look up a profile by public identifier or URN.
    pub async fn profile(&self, id: &str) -> Result<Profile, Error> {
        let id = required("profile identifier", id)?;
        let body = self
            .document(
                ApiRequest::get("/identity/dash/profiles")
                    .pairs([("q", "memberIdentity"), ("memberIdentity", id)]),
            )
            .await?;
        Ok(resolve_profile(&Document::new(&body)))
    }

    pub async fn search_people(
        &self,
        keywords: &str,
        start: i64,
        count: i64,
    ) -> Result<Vec<SearchItem>, Error> {
        self.search(SearchKind::People, keywords, start, count).await
    }

    pub async fn search_jobs(
        &self,
        keywords: &str,
        start: i64,
        count: i64,
    ) -> Result<Vec<SearchItem>, Error> {
        self.search(SearchKind::Jobs, keywords, start, count).await
    }

    /// Run a search. The tuple only carries `start`, since the endpoint pages
    /// by its own page size; `count` caps the hits returned.
    pub async fn search(
        &self,
        kind: SearchKind,
        keywords: &str,
        start: i64,
        count: i64,
    ) -> Result<Vec<SearchItem>, Error> {
        let keywords = required("keywords", keywords)?;
        let (start, count) = paging(start, count, DEFAULT_SEARCH_COUNT);

        let query = RawQuery::new()
            .param("includeWebMetadata", "true")
            .param("variables", search_variables(keywords, kind.result_type(), start))
            .param("queryId", &self.exec.config().query_ids.search);

        let body = self.document(ApiRequest::get("/graphql").raw_query(query)).await?;
        let mut items = resolve_search_results(&Document::new(&body));
        items.truncate(count as usize);
        Ok(items)
    }

    /// Posts shared by the member identified by `profile_urn`.
    pub async fn profile_posts(
        &self,
        profile_urn: &str,
        start: i64,
        count: i64,
    ) -> Result<Vec<FeedUpdate>, Error> {
        let profile_urn = required("profile urn", profile_urn)?;
        let (start, count) = paging(start, count, DEFAULT_POSTS_COUNT);

        let request = ApiRequest::get("/feed/dash/updates").pairs([
            ("q", "memberShareFeed".to_string()),
            ("moduleKey", "member-share".to_string()),
            ("count", count.to_string()),
            ("start", start.to_string()),
            ("profileUrn", profile_urn.to_string()),
        ]);
        let body = self.document(request).await?;
        Ok(resolve_feed_updates(&Document::new(&body)))
    }

    /// Publish a text post visible to anyone.
    pub async fn create_post(&self, text: &str) -> Result<CreatedPost, Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyArgument("post text"));
        }
        let payload = json!({
            "visibleToConnectionsOnly": false,
            "externalAudienceProviders": [],
            "commentaryV2": { "text": text, "attributesV2": [] },
            "origin": "FEED",
            "allowedCommentersScope": "ALL",
            "postState": "PUBLISHED",
            "mediaCategory": "NONE",
        });
        let body = self
            .document(ApiRequest::post("/contentcreation/normShares").json(&payload)?)
            .await?;
        Ok(resolve_created_urn(&Document::new(&body)))
    }

    /// Follow a member. `member_urn` must be a `urn:li:member:` URN.
    pub async fn follow(&self, member_urn: &str) -> Result<(), Error> {
        let member_urn = required("member urn", member_urn)?;
        if !member_urn.starts_with(MEMBER_URN_PREFIX) {
            return Err(Error::InvalidArgument(format!(
                "unexpected member urn: {member_urn:?}"
            )));
        }
        let member_id = urn_id(member_urn);
        if member_id.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "cannot extract member id from {member_urn:?}"
            )));
        }

        let payload = json!({ "urn": format!("urn:li:fs_followingInfo:{member_id}") });
        self.exec
            .execute_discard(
                ApiRequest::post("/feed/dash/follows")
                    .pairs([("action", "followByEntityUrn")])
                    .json(&payload)?,
            )
            .await
    }

    /// Send a connection invitation, with an optional note.
    pub async fn connect(&self, profile_urn: &str, note: Option<&str>) -> Result<(), Error> {
        let profile_urn = required("profile urn", profile_urn)?;
        if !profile_urn.contains(PROFILE_URN_MARKER) {
            return Err(Error::InvalidArgument(format!(
                "expected fsd_profile urn, got {profile_urn:?}"
            )));
        }

        let mut payload = Map::new();
        payload.insert("inviteeProfileUrn".into(), profile_urn.into());
        if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
            payload.insert("customMessage".into(), note.into());
        }

        self.exec
            .execute_discard(
                ApiRequest::post("/voyagerRelationshipsDashMemberRelationships")
                    .pairs([("action", "verifyQuotaAndCreate")])
                    .json(&payload)?,
            )
            .await
    }

    /// The signed-in member's `urn:li:fsd_profile:` URN.
    ///
    /// `/me` carries it on current accounts. Otherwise the member's own
    /// profile is fetched by public identifier.
    pub async fn my_profile_urn(&self) -> Result<String, Error> {
        let me = self.me().await?;
        if !me.profile_urn.is_empty() {
            return Ok(me.profile_urn);
        }
        if me.public_identifier.is_empty() {
            return Err(Error::Unresolved("own profile urn"));
        }

        let profile = self.profile(&me.public_identifier).await?;
        if profile.entity_urn.contains(PROFILE_URN_MARKER) {
            Ok(profile.entity_urn)
        } else {
            Err(Error::Unresolved("own profile urn"))
        }
    }
}

/// `value` trimmed, or [`Error::EmptyArgument`] when blank.
pub(crate) fn required<'v>(name: &'static str, value: &'v str) -> Result<&'v str, Error> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::EmptyArgument(name))
    } else {
        Ok(value)
    }
}

/// Clamp `start` to zero and replace a non-positive `count` with `default`.
pub(crate) fn paging(start: i64, count: i64, default: i64) -> (i64, i64) {
    (start.max(0), if count <= 0 { default } else { count })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
