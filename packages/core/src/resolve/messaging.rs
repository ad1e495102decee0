//! Conversation and message resolution for the messaging GraphQL responses.
//!
//! Messaging responses put participants, messages and conversations side by
//! side in `included[]` and link them by URN. Resolution runs in fixed phases
//! over the prebuilt [`EntityGraph`](crate::graph::EntityGraph):
//!
//! 1. index participants by URN;
//! 2. index messages by URN, resolving each sender's display name against the
//!    participant index as the message is built;
//! 3. build conversations by following `conversationParticipants` and
//!    `lastMessage` into those two indexes.
//!
//! Results come back in array order; see [`crate::order`] for display order.

use std::collections::HashMap;

use crate::entity::Entity;
use crate::graph::TypeFilter;
use crate::resolve::Document;
use crate::types::{Conversation, Message, Participant};

pub const PARTICIPANT_TYPE: &str = "com.linkedin.messenger.MessagingParticipant";
pub const MESSAGE_TYPE: &str = "com.linkedin.messenger.Message";
pub const CONVERSATION_TYPE: &str = "com.linkedin.messenger.Conversation";

/// Participants keyed by their messaging participant URN.
pub fn participant_index<'a>(doc: &Document<'a>) -> HashMap<&'a str, Participant> {
    doc.graph()
        .table(TypeFilter::Exact(PARTICIPANT_TYPE))
        .into_iter()
        .map(|(urn, e)| (urn, parse_participant(&e)))
        .collect()
}

/// Messages keyed by URN, with sender names already resolved.
pub fn message_index<'a>(
    doc: &Document<'a>,
    participants: &HashMap<&'a str, Participant>,
) -> HashMap<&'a str, Message> {
    doc.graph()
        .table(TypeFilter::Exact(MESSAGE_TYPE))
        .into_iter()
        .map(|(urn, e)| (urn, parse_message(&e, participants)))
        .collect()
}

/// Every conversation in the response, in array order.
pub fn resolve_conversations(doc: &Document<'_>) -> Vec<Conversation> {
    let participants = participant_index(doc);
    let messages = message_index(doc, &participants);

    doc.graph()
        .by_type(CONVERSATION_TYPE)
        .into_iter()
        .map(|e| Conversation {
            entity_urn: e.string("entityUrn"),
            participants: e.follow_all("conversationParticipants", |urn| {
                participants.get(urn).cloned()
            }),
            last_message: e.follow("lastMessage", |urn| messages.get(urn).cloned()),
        })
        .collect()
}

/// Every message in the response, in array order, with sender names resolved.
pub fn resolve_messages(doc: &Document<'_>) -> Vec<Message> {
    let participants = participant_index(doc);
    doc.graph()
        .by_type(MESSAGE_TYPE)
        .into_iter()
        .map(|e| parse_message(&e, &participants))
        .collect()
}

/// The first conversation with a participant owned by `profile_urn`.
pub fn find_conversation_by_profile_urn<'c>(
    conversations: &'c [Conversation],
    profile_urn: &str,
) -> Option<&'c Conversation> {
    conversations
        .iter()
        .find(|c| c.participants.iter().any(|p| p.profile_urn == profile_urn))
}

/// Read a participant entity.
///
/// Names live at `participantType.member.{firstName,lastName}`, each either a
/// plain string or a `{ "text": … }` object.
pub fn parse_participant(e: &Entity<'_>) -> Participant {
    let member = e
        .object("participantType")
        .and_then(|pt| pt.object("member"));
    let name = |key: &str| {
        member
            .and_then(|m| m.text(key))
            .unwrap_or_default()
            .to_string()
    };

    Participant {
        entity_urn: e.string("entityUrn"),
        first_name: name("firstName"),
        last_name: name("lastName"),
        profile_urn: e.string("hostIdentityUrn"),
    }
}

/// Read a message entity, resolving its sender through `participants`.
pub fn parse_message(e: &Entity<'_>, participants: &HashMap<&str, Participant>) -> Message {
    let sender_urn = e.reference("sender").unwrap_or_default();
    let sender_name = participants
        .get(sender_urn)
        .map(Participant::full_name)
        .unwrap_or_default();

    Message {
        entity_urn: e.string("entityUrn"),
        body: e.text("body").unwrap_or_default().to_string(),
        sender_urn: sender_urn.to_string(),
        sender_name,
        delivered_at: e.i64("deliveredAt"),
    }
}

// --- tests -------------------------------------------------------------------
