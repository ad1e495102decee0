//! Entity resolvers: normalized response in, domain objects out.
//!
//! Every resolver is a pure, read-only function of a [`Document`] (the decoded
//! response plus its [`EntityGraph`]). Resolution never fails: when nothing
//! matches, the resolver returns the type's `Default` or an empty `Vec`.
//!
//! # Fallback chains
//!
//! The upstream schema varies between API generations. Where a concept can be
//! found in more than one place, the resolver evaluates an ordered slice of
//! [`Locator`]s and stops at the first hit. The order is always: follow a
//! reference into `included[]` first, scan `included[]` next, and fall back
//! to nested or legacy top-level fields last.

pub mod feed;
pub mod identity;
pub mod messaging;
pub mod search;

use serde_json::Value;

use crate::entity::Entity;
use crate::graph::EntityGraph;

/// A decoded response together with the index built over it.
///
/// Constructing a `Document` builds the whole index up front; resolvers only
/// read from it afterwards.
#[derive(Debug)]
pub struct Document<'a> {
    root: &'a Value,
    graph: EntityGraph<'a>,
}

impl<'a> Document<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            graph: EntityGraph::from_document(root),
        }
    }

    /// The top-level object, if the response is one.
    pub fn root(&self) -> Option<Entity<'a>> {
        Entity::from_value(self.root)
    }

    pub fn root_value(&self) -> &'a Value {
        self.root
    }

    pub fn graph(&self) -> &EntityGraph<'a> {
        &self.graph
    }

    /// The object stored under `data`, if any.
    pub fn data(&self) -> Option<Entity<'a>> {
        self.root()?.object("data")
    }
}

/// One step of a fallback chain: find an entity in the document, or give up.
pub type Locator = for<'a, 'd> fn(&'d Document<'a>) -> Option<Entity<'a>>;

/// Evaluate `chain` in order and return the first entity found.
pub fn first_match<'a>(doc: &Document<'a>, chain: &[Locator]) -> Option<Entity<'a>> {
    chain.iter().find_map(|locate| locate(doc))
}

/// The first non-empty string among `keys`, in order.
pub(crate) fn first_str<'a>(entity: &Entity<'a>, keys: &[&str]) -> &'a str {
    keys.iter()
        .filter_map(|key| entity.str(key))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

// --- tests -------------------------------------------------------------------
