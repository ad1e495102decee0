//! Domain objects materialized from normalized responses.
//!
//! Every type here is a plain value: resolvers construct it once and never
//! mutate it afterwards. `Default` is the "not found" value; a resolver that
//! finds nothing returns it instead of an error, so callers test emptiness
//! (e.g. [`Profile::is_empty`]) to tell a miss from a failure.

use serde::Serialize;

/// The signed-in member, as returned by `/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Me {
    pub public_identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,

    /// URN of the profile entity the identity was read from
    /// (`entityUrn`, or `dashEntityUrn` when the former is absent).
    pub entity_urn: String,

    /// The current-generation `urn:li:fsd_profile:…` URN, when the response
    /// carries one. Messaging endpoints address mailboxes by this URN.
    pub profile_urn: String,

    pub member_id: String,
    /// `urn:li:member:<member_id>`, or empty.
    pub member_urn: String,
}

impl Me {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Another member's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub public_identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    pub summary: String,
    pub location: String,

    /// URN of the profile entity (normally `urn:li:fsd_profile:…`).
    pub entity_urn: String,
    pub member_id: String,
    pub member_urn: String,
}

impl Profile {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A member taking part in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// Messaging participant URN.
    pub entity_urn: String,
    pub first_name: String,
    pub last_name: String,
    /// The owning profile (`hostIdentityUrn`, an `fsd_profile` URN).
    pub profile_urn: String,
}

impl Participant {
    /// `"First Last"`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    pub entity_urn: String,
    pub body: String,
    /// Messaging participant URN of the sender, kept even when the
    /// participant itself is not present in the response.
    pub sender_urn: String,
    /// The sender's resolved display name, or empty.
    pub sender_name: String,
    /// Delivery time in epoch milliseconds.
    pub delivered_at: i64,
}

/// A messaging conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub entity_urn: String,
    pub participants: Vec<Participant>,
    pub last_message: Option<Message>,
}

impl Conversation {
    /// Delivery time of the last message, `0` when there is none.
    pub fn last_activity(&self) -> i64 {
        self.last_message.as_ref().map_or(0, |m| m.delivered_at)
    }
}

/// One search hit (a person or a job).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchItem {
    /// Handle derived from the hit's navigation URL, or empty.
    pub public_identifier: String,
    pub title: String,
    pub primary_subtitle: String,
    pub secondary_subtitle: String,
    pub target_urn: String,
}

/// One item from a member's activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedUpdate {
    pub entity_urn: String,
    pub update_type: String,
    pub actor_urn: String,
    /// Publish time in epoch milliseconds.
    pub published_at: i64,
    pub commentary: String,
}

/// Result of publishing a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatedPost {
    pub entity_urn: String,
}

// --- tests -------------------------------------------------------------------
