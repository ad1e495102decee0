//! Entity-graph resolution for LinkedIn's normalized Voyager API responses.
//!
//! Voyager answers most requests with a "normalized" document: a thin `data`
//! envelope plus a flat `included[]` array of typed entities that refer to
//! each other by URN. This crate turns such a document into plain domain
//! values. It performs no I/O; the `voyager-client` crate owns the HTTP side.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`entity`] | Read-only accessor over one JSON object, with reference-following under both field conventions |
//! | [`graph`] | [`EntityGraph`]: URN and type indexes built once over `included[]` |
//! | [`resolve`] | Per-type resolvers with ordered fallback chains |
//! | [`order`] | Display ordering for conversations and messages |
//! | [`types`] | Domain values: [`Me`], [`Profile`], [`Conversation`], [`Message`], … |
//! | [`urn`] | URN segment extraction and public-identifier normalization |
//!
//! # Quick start
//!
//! ```rust
//! use voyager::{resolve_conversations, order_conversations, Document};
//!
//! let body: serde_json::Value = serde_json::json!({ "included": [] });
//! let doc = Document::new(&body);
//! let mut convos = resolve_conversations(&doc);
//! order_conversations(&mut convos);
//! assert!(convos.is_empty());
//! ```

pub mod entity;
pub mod graph;
pub mod order;
pub mod resolve;
pub mod types;
pub mod urn;

pub use entity::Entity;
pub use graph::{EntityGraph, TypeFilter};
pub use order::{order_conversations, order_messages};
pub use resolve::feed::{resolve_created_urn, resolve_feed_updates};
pub use resolve::identity::{resolve_me, resolve_profile};
pub use resolve::messaging::{
    find_conversation_by_profile_urn, resolve_conversations, resolve_messages,
};
pub use resolve::search::resolve_search_results;
pub use resolve::{first_match, Document, Locator};
pub use types::{
    Conversation, CreatedPost, FeedUpdate, Me, Message, Participant, Profile, SearchItem,
};
