//! Feed update and post-creation resolution.
//!
//! The feed endpoints answer in two shapes: a plain `elements` array of update
//! objects, or a normalized response whose updates only appear in
//! `included[]`. Commentary sits at varying depth depending on the post kind,
//! so it is located by a structural search rather than a fixed path.

use serde_json::Value;

use crate::entity::Entity;
use crate::resolve::Document;
use crate::types::{CreatedPost, FeedUpdate};

/// Top-level array of a non-normalized listing.
pub const ELEMENTS_KEY: &str = "elements";

/// Container fields that hold commentary text, in lookup order.
const COMMENTARY_KEYS: [&str; 2] = ["commentary", "shareCommentary"];

/// All feed updates in the response.
///
/// Objects in `elements` are used directly and URN strings there are looked
/// up in `included[]`. When that yields nothing, `included[]` is scanned for
/// update-like entities instead.
pub fn resolve_feed_updates(doc: &Document<'_>) -> Vec<FeedUpdate> {
    let mut updates = listed_updates(doc);
    if updates.is_empty() {
        updates = doc.graph().entities().filter(is_update).collect();
    }
    updates.iter().map(parse_feed_update).collect()
}

fn listed_updates<'a>(doc: &Document<'a>) -> Vec<Entity<'a>> {
    let Some(elements) = doc
        .root()
        .and_then(|root| root.get(ELEMENTS_KEY))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    elements
        .iter()
        .filter_map(|el| match el {
            Value::String(urn) => doc.graph().get(urn),
            other => Entity::from_value(other),
        })
        .collect()
}

fn is_update(e: &Entity<'_>) -> bool {
    let urn = e.urn();
    e.type_tag().contains("Update") || urn.contains("urn:li:fs_update") || urn.contains("activity")
}

/// Read one update entity: URN, type, actor, publish time and commentary.
pub fn parse_feed_update(e: &Entity<'_>) -> FeedUpdate {
    FeedUpdate {
        entity_urn: e.string("entityUrn"),
        update_type: e.string("updateType"),
        actor_urn: e.str_at(&["actor", "entityUrn"]).unwrap_or_default().to_string(),
        published_at: e.i64("publishedAt"),
        commentary: find_commentary(e.fields()).unwrap_or_default().to_string(),
    }
}

/// The first commentary text anywhere under `fields`.
///
/// A commentary container on the current object wins over anything nested
/// deeper; within a container the first non-blank `text` is taken.
pub fn find_commentary(fields: &serde_json::Map<String, Value>) -> Option<&str> {
    for key in COMMENTARY_KEYS {
        if let Some(text) = fields.get(key).and_then(find_text) {
            return Some(text);
        }
    }
    fields.values().find_map(commentary_in)
}

fn commentary_in(value: &Value) -> Option<&str> {
    match value {
        Value::Object(m) => find_commentary(m),
        Value::Array(items) => items.iter().find_map(commentary_in),
        _ => None,
    }
}

fn find_text(value: &Value) -> Option<&str> {
    match value {
        Value::Object(m) => match m.get("text").and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => Some(s),
            _ => m.values().find_map(find_text),
        },
        Value::Array(items) => items.iter().find_map(find_text),
        _ => None,
    }
}

/// The URN of a newly created post.
///
/// Tries the top-level `entityUrn`, then `data.entityUrn`, then the first
/// non-blank `entityUrn` found anywhere in the response.
pub fn resolve_created_urn(doc: &Document<'_>) -> CreatedPost {
    let non_blank = |s: &&str| !s.trim().is_empty();

    let entity_urn = doc
        .root()
        .and_then(|root| root.str("entityUrn"))
        .filter(non_blank)
        .or_else(|| doc.data().and_then(|d| d.str("entityUrn")).filter(non_blank))
        .or_else(|| find_string(doc.root_value(), "entityUrn"))
        .unwrap_or_default();

    CreatedPost {
        entity_urn: entity_urn.to_string(),
    }
}

fn find_string<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    match value {
        Value::Object(m) => match m.get(key).and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => Some(s),
            _ => m.values().find_map(|v| find_string(v, key)),
        },
        Value::Array(items) => items.iter().find_map(|v| find_string(v, key)),
        _ => None,
    }
}

// --- tests -------------------------------------------------------------------
