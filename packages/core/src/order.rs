//! Display ordering for resolved messaging results.
//!
//! Both sorts are stable, so items with equal timestamps keep the order in
//! which the response listed them.

use crate::types::{Conversation, Message};

/// Most recent activity first. Conversations without a last message sort as
/// if their activity were at time `0`.
pub fn order_conversations(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| b.last_activity().cmp(&a.last_activity()));
}

/// Oldest first, for reading a thread top to bottom.
pub fn order_messages(messages: &mut [Message]) {
    messages.sort_by_key(|m| m.delivered_at);
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn message(urn: &str, at: i64) -> Message {
        Message {
            entity_urn: urn.into(),
            delivered_at: at,
            ..Default::default()
        }
    }

    fn conversation(urn: &str, at: Option<i64>) -> Conversation {
        Conversation {
            entity_urn: urn.into(),
            last_message: at.map(|at| message("m", at)),
            ..Default::default()
        }
    }

    fn urns_c(items: &[Conversation]) -> Vec<&str> {
        items.iter().map(|c| c.entity_urn.as_str()).collect()
    }

    fn urns_m(items: &[Message]) -> Vec<&str> {
        items.iter().map(|m| m.entity_urn.as_str()).collect()
    }

    #[test]
    fn conversations_newest_first() {
        let mut convos = vec![
            conversation("a", Some(100)),
            conversation("b", Some(300)),
            conversation("c", Some(200)),
        ];
        order_conversations(&mut convos);
        assert_eq!(urns_c(&convos), ["b", "c", "a"]);
    }

    #[test]
    fn conversation_without_message_sorts_last() {
        let mut convos = vec![
            conversation("empty", None),
            conversation("a", Some(100)),
        ];
        order_conversations(&mut convos);
        assert_eq!(urns_c(&convos), ["a", "empty"]);
    }

    #[test]
    fn messages_oldest_first() {
        let mut msgs = vec![message("c", 300), message("a", 100), message("b", 200)];
        order_messages(&mut msgs);
        assert_eq!(urns_m(&msgs), ["a", "b", "c"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut msgs = vec![message("x", 5), message("y", 5), message("w", 1)];
        order_messages(&mut msgs);
        assert_eq!(urns_m(&msgs), ["w", "x", "y"]);

        let mut convos = vec![
            conversation("p", Some(7)),
            conversation("q", Some(7)),
            conversation("r", Some(9)),
        ];
        order_conversations(&mut convos);
        assert_eq!(urns_c(&convos), ["r", "p", "q"]);
    }

    #[test]
    fn empty_input() {
        let mut convos: Vec<Conversation> = Vec::new();
        order_conversations(&mut convos);
        let mut msgs: Vec<Message> = Vec::new();
        order_messages(&mut msgs);
        assert!(convos.is_empty() && msgs.is_empty());
    }
}
