//! Messaging operations: inbox listing, reading, and sending.
//!
//! Reads go through the messaging GraphQL endpoint with tuple-encoded
//! variables. Writes use the plain-text header profile the messaging write
//! endpoints require.

use serde_json::{json, Value};
use tracing::warn;
use voyager::{
    order_conversations, order_messages, resolve_conversations, resolve_messages, Conversation,
    Document, Message,
};

use crate::api::{paging, required, Voyager};
use crate::error::Error;
use crate::executor::ApiRequest;
use crate::query::{conversations_variables, messages_variables, RawQuery};
use crate::token::generate_tracking_token;

pub const MESSAGING_GRAPHQL_PATH: &str = "voyagerMessagingGraphQL/graphql";
pub const DEFAULT_CONVERSATIONS_COUNT: i64 = 20;

impl Voyager {
    /// Inbox conversations for `mailbox_urn` (the member's own
    /// `urn:li:fsd_profile:` URN), most recent first.
    pub async fn list_conversations(
        &self,
        mailbox_urn: &str,
        count: i64,
    ) -> Result<Vec<Conversation>, Error> {
        let mailbox_urn = required("mailbox urn", mailbox_urn)?;
        let (_, count) = paging(0, count, DEFAULT_CONVERSATIONS_COUNT);

        let query = RawQuery::new()
            .param("variables", conversations_variables(mailbox_urn, count))
            .param("queryId", &self.executor().config().query_ids.conversations);
        let body = self
            .document(ApiRequest::get(MESSAGING_GRAPHQL_PATH).raw_query(query))
            .await?;

        let mut conversations = resolve_conversations(&Document::new(&body));
        order_conversations(&mut conversations);
        Ok(conversations)
    }

    /// Recent messages in a conversation, oldest first.
    pub async fn messages(&self, conversation_urn: &str) -> Result<Vec<Message>, Error> {
        let conversation_urn = required("conversation urn", conversation_urn)?;

        let query = RawQuery::new()
            .param("variables", messages_variables(conversation_urn))
            .param("queryId", &self.executor().config().query_ids.messages);
        let body = self
            .document(ApiRequest::get(MESSAGING_GRAPHQL_PATH).raw_query(query))
            .await?;

        let mut messages = resolve_messages(&Document::new(&body));
        order_messages(&mut messages);
        Ok(messages)
    }

    /// Post `text` into an existing conversation.
    pub async fn send_message(
        &self,
        mailbox_urn: &str,
        conversation_urn: &str,
        text: &str,
    ) -> Result<(), Error> {
        let mailbox_urn = required("mailbox urn", mailbox_urn)?;
        let conversation_urn = required("conversation urn", conversation_urn)?;
        if text.trim().is_empty() {
            return Err(Error::EmptyArgument("message text"));
        }

        let mut payload = json!({
            "message": {
                "body": { "attributes": [], "text": text },
                "renderContentUnions": [],
                "conversationUrn": conversation_urn,
                "originToken": uuid::Uuid::new_v4().to_string(),
            },
            "mailboxUrn": mailbox_urn,
            "dedupeByClientGeneratedToken": false,
        });
        attach_tracking_id(&mut payload);

        self.executor()
            .execute_discard(
                ApiRequest::post("voyagerMessagingDashMessengerMessages")
                    .pairs([("action", "createMessage")])
                    .json(&payload)?
                    .plain_text(),
            )
            .await
    }

    /// Start a conversation with `recipients` (`urn:li:fsd_profile:` URNs)
    /// and send `text` as its first message.
    pub async fn create_conversation(
        &self,
        mailbox_urn: &str,
        recipients: &[&str],
        text: &str,
    ) -> Result<(), Error> {
        let mailbox_urn = required("mailbox urn", mailbox_urn)?;
        if text.trim().is_empty() {
            return Err(Error::EmptyArgument("message text"));
        }
        let recipients: Vec<&str> = recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect();
        if recipients.is_empty() {
            return Err(Error::EmptyArgument("recipients"));
        }

        let mut payload = json!({
            "message": {
                "body": { "attributes": [], "text": text },
                "renderContentUnions": [],
                "originToken": uuid::Uuid::new_v4().to_string(),
            },
            "recipients": recipients,
            "mailboxUrn": mailbox_urn,
            "subtype": "MEMBER_TO_MEMBER",
        });
        attach_tracking_id(&mut payload);

        self.executor()
            .execute_discard(
                ApiRequest::post("voyagerMessagingDashMessengerConversations")
                    .pairs([("action", "create")])
                    .json(&payload)?
                    .plain_text(),
            )
            .await
    }
}

/// Add a fresh `trackingId` to `payload`. When the random source fails the
/// field is left out.
fn attach_tracking_id(payload: &mut Value) {
    match generate_tracking_token() {
        Ok(token) => {
            if let Some(fields) = payload.as_object_mut() {
                fields.insert("trackingId".into(), Value::String(token));
            }
        }
        Err(e) => warn!("sending without trackingId: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_voyager, test_config, test_credentials, Recorder};
    use crate::token::{decode_token, TOKEN_LEN};

    async fn client(replies: &[(&str, Value)]) -> (Voyager, Recorder) {
        let (base, recorder) = mock_voyager(replies).await;
        let api = Voyager::new(test_credentials(), test_config(&base)).unwrap();
        (api, recorder)
    }

    fn participant(id: &str, first: &str, last: &str) -> Value {
        json!({
            "$type": "com.linkedin.messenger.MessagingParticipant",
            "entityUrn": format!("urn:li:msg_participant:{id}"),
            "hostIdentityUrn": format!("urn:li:fsd_profile:{id}"),
            "participantType": { "member": { "firstName": { "text": first }, "lastName": { "text": last } } }
        })
    }

    fn message(id: &str, sender: &str, text: &str, at: i64) -> Value {
        json!({
            "$type": "com.linkedin.messenger.Message",
            "entityUrn": format!("urn:li:msg_message:{id}"),
            "body": { "text": text },
            "*sender": format!("urn:li:msg_participant:{sender}"),
            "deliveredAt": at
        })
    }

    fn conversation(id: &str, participants: &[&str], last: &str) -> Value {
        let refs: Vec<String> = participants
            .iter()
            .map(|p| format!("urn:li:msg_participant:{p}"))
            .collect();
        json!({
            "$type": "com.linkedin.messenger.Conversation",
            "entityUrn": format!("urn:li:msg_conversation:{id}"),
            "*conversationParticipants": refs,
            "*lastMessage": format!("urn:li:msg_message:{last}")
        })
    }

    #[tokio::test]
    async fn conversations_are_newest_first() {
        let reply = json!({
            "included": [
                conversation("old", &["ME", "BBB"], "m1"),
                participant("ME", "Me", "Myself"),
                participant("BBB", "Jane", "Doe"),
                participant("CCC", "Bob", "Smith"),
                message("m1", "BBB", "first", 100),
                message("m2", "CCC", "second", 300),
                conversation("new", &["ME", "CCC"], "m2"),
            ]
        });
        let (api, rec) = client(&[(MESSAGING_GRAPHQL_PATH, reply)]).await;
        let convos = api.list_conversations("urn:li:fsd_profile:ME", 0).await.unwrap();

        let urns: Vec<&str> = convos.iter().map(|c| c.entity_urn.as_str()).collect();
        assert_eq!(urns, ["urn:li:msg_conversation:new", "urn:li:msg_conversation:old"]);
        assert_eq!(convos[0].last_message.as_ref().unwrap().sender_name, "Bob Smith");
        assert_eq!(convos[1].participants.len(), 2);

        let query = rec.single().query.unwrap();
        assert_eq!(
            query,
            "variables=(query:(predicateUnions:List((conversationCategoryPredicate:(category:INBOX)))),\
             count:20,mailboxUrn:urn%3Ali%3Afsd_profile%3AME)\
             &queryId=messengerConversations.9501074288a12f3ae9e3c7ea243bccbf"
        );
    }

    #[tokio::test]
    async fn messages_are_oldest_first() {
        let reply = json!({
            "included": [
                participant("BBB", "Jane", "Doe"),
                message("m3", "BBB", "third", 300),
                message("m1", "BBB", "first", 100),
                message("m2", "GONE", "second", 200),
            ]
        });
        let (api, rec) = client(&[(MESSAGING_GRAPHQL_PATH, reply)]).await;
        let msgs = api
            .messages("urn:li:msg_conversation:(urn:li:fsd_profile:AAA,2-MjkzM)")
            .await
            .unwrap();

        let bodies: Vec<&str> = msgs.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["first", "second", "third"]);
        assert_eq!(msgs[0].sender_name, "Jane Doe");
        assert_eq!(msgs[1].sender_name, "");

        assert_eq!(
            rec.single().query.as_deref(),
            Some(
                "variables=(conversationUrn:urn%3Ali%3Amsg_conversation%3A%28urn%3Ali%3Afsd_profile%3AAAA%2C2-MjkzM%29)\
                 &queryId=messengerMessages.5846eeb71c981f11e0134cb6626cc314"
            )
        );
    }

    #[tokio::test]
    async fn send_message_payload() {
        let (api, rec) = client(&[("voyagerMessagingDashMessengerMessages", Value::Null)]).await;
        api.send_message(
            "urn:li:fsd_profile:ME",
            "urn:li:msg_conversation:(urn:li:fsd_profile:ME,abc)",
            "Hello there",
        )
        .await
        .unwrap();

        let req = rec.single();
        assert_eq!(req.method, "POST");
        assert_eq!(req.query.as_deref(), Some("action=createMessage"));
        assert_eq!(req.header("content-type"), "text/plain;charset=UTF-8");
        assert_eq!(req.header("accept"), "application/json");

        let body = req.json();
        assert_eq!(body["message"]["body"]["text"], "Hello there");
        assert_eq!(
            body["message"]["conversationUrn"],
            "urn:li:msg_conversation:(urn:li:fsd_profile:ME,abc)"
        );
        assert_eq!(body["mailboxUrn"], "urn:li:fsd_profile:ME");
        assert_eq!(body["dedupeByClientGeneratedToken"], false);

        let origin = body["message"]["originToken"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(origin).is_ok(), "{origin}");

        let tracking = body["trackingId"].as_str().unwrap();
        assert_eq!(decode_token(tracking).unwrap().len(), TOKEN_LEN);
    }

    #[tokio::test]
    async fn create_conversation_payload() {
        let (api, rec) =
            client(&[("voyagerMessagingDashMessengerConversations", Value::Null)]).await;
        api.create_conversation("urn:li:fsd_profile:ME", &["urn:li:fsd_profile:BBB", " "], "Hi")
            .await
            .unwrap();

        let req = rec.single();
        assert_eq!(req.query.as_deref(), Some("action=create"));
        assert_eq!(req.header("content-type"), "text/plain;charset=UTF-8");
        assert_eq!(req.header("accept"), "application/json");
        let body = req.json();
        assert_eq!(body["recipients"], json!(["urn:li:fsd_profile:BBB"]));
        assert_eq!(body["subtype"], "MEMBER_TO_MEMBER");
        assert_eq!(body["message"]["body"]["text"], "Hi");
    }

    #[tokio::test]
    async fn empty_arguments_are_rejected() {
        let api = Voyager::new(
            test_credentials(),
            test_config("http://127.0.0.1:9/voyager/api"),
        )
        .unwrap();

        let errs = [
            api.list_conversations(" ", 20).await.unwrap_err(),
            api.messages("").await.unwrap_err(),
            api.send_message("urn:li:fsd_profile:ME", "urn:li:msg_conversation:x", "  ")
                .await
                .unwrap_err(),
            api.send_message("", "urn:li:msg_conversation:x", "hi").await.unwrap_err(),
            api.create_conversation("urn:li:fsd_profile:ME", &[], "hi").await.unwrap_err(),
            api.create_conversation("urn:li:fsd_profile:ME", &["urn:li:fsd_profile:B"], "")
                .await
                .unwrap_err(),
        ];
        for err in errs {
            assert!(matches!(err, Error::EmptyArgument(_)), "{err:?}");
        }
    }

    #[test]
    fn tracking_id_is_attached() {
        let mut payload = json!({ "a": 1 });
        attach_tracking_id(&mut payload);
        assert_eq!(payload["trackingId"].as_str().unwrap().chars().count(), TOKEN_LEN);
    }
}
