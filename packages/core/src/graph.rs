use std::collections::HashMap;

use serde_json::Value;

use crate::entity::Entity;

/// Field of a normalized response that carries the flat entity array.
pub const INCLUDED_KEY: &str = "included";

/// How to pre-filter entities by their declared type label.
///
/// The type taxonomy is coarse and drifts between schema versions, so most
/// callers match on a substring of the label rather than the full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter<'f> {
    /// Every entity.
    Any,
    /// `$type` equals the given label.
    Exact(&'f str),
    /// `$type` contains the given fragment.
    Contains(&'f str),
}

impl TypeFilter<'_> {
    pub fn matches(&self, type_tag: &str) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Exact(label) => type_tag == *label,
            TypeFilter::Contains(fragment) => type_tag.contains(fragment),
        }
    }
}

/// Lookup tables over the flat `included[]` array of one response.
///
/// The graph is not a cache. It borrows the decoded response and lives only
/// as long as that response is being resolved. It is built in one pass before
/// any reference is followed, so forward references resolve regardless of
/// the order entities arrive in.
///
/// Entities are indexed by `entityUrn`. Within one response a duplicate URN
/// replaces the earlier entry for lookups, while [`EntityGraph::entities`]
/// still yields both in array order.
#[derive(Debug, Default)]
pub struct EntityGraph<'a> {
    entities: Vec<Entity<'a>>,
    by_urn: HashMap<&'a str, usize>,
    by_type: HashMap<&'a str, Vec<usize>>,
    skipped: usize,
}

impl<'a> EntityGraph<'a> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the `included[]` array of a decoded response.
    ///
    /// A missing or non-array `included` field produces an empty graph.
    pub fn from_document(root: &'a Value) -> Self {
        Self::from_included(root.get(INCLUDED_KEY))
    }

    /// Index a flat entity array. Elements that are not JSON objects are
    /// skipped and counted in [`EntityGraph::skipped`].
    pub fn from_included(included: Option<&'a Value>) -> Self {
        let mut g = Self::new();
        let Some(items) = included.and_then(Value::as_array) else {
            return g;
        };
        g.entities.reserve(items.len());
        for item in items {
            match Entity::from_value(item) {
                Some(entity) => g.add(entity),
                None => g.skipped += 1,
            }
        }
        g
    }

    /// Index one entity.
    pub fn add(&mut self, entity: Entity<'a>) {
        let slot = self.entities.len();
        let urn = entity.urn();
        if !urn.is_empty() {
            self.by_urn.insert(urn, slot);
        }
        self.by_type.entry(entity.type_tag()).or_default().push(slot);
        self.entities.push(entity);
    }

    /// Retrieve an entity by URN.
    pub fn get(&self, urn: &str) -> Option<Entity<'a>> {
        self.by_urn.get(urn).map(|&slot| self.entities[slot])
    }

    /// Total number of indexed entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of array elements that were not objects.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Iterate over all entities in array order.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'a>> + '_ {
        self.entities.iter().copied()
    }

    /// All entities whose `$type` is exactly `type_tag`, in array order.
    pub fn by_type(&self, type_tag: &str) -> Vec<Entity<'a>> {
        self.by_type
            .get(type_tag)
            .map(|slots| slots.iter().map(|&slot| self.entities[slot]).collect())
            .unwrap_or_default()
    }

    /// All entities accepted by `filter`, in array order.
    pub fn matching<'g>(
        &'g self,
        filter: TypeFilter<'g>,
    ) -> impl Iterator<Item = Entity<'a>> + 'g {
        self.entities
            .iter()
            .copied()
            .filter(move |e| filter.matches(e.type_tag()))
    }

    /// A URN-keyed table restricted to the entities accepted by `filter`.
    ///
    /// Entities without a URN cannot be referenced and are left out.
    pub fn table(&self, filter: TypeFilter<'_>) -> HashMap<&'a str, Entity<'a>> {
        self.entities
            .iter()
            .filter(|e| filter.matches(e.type_tag()) && !e.urn().is_empty())
            .map(|e| (e.urn(), *e))
            .collect()
    }

    /// The entity that `entity` points at through `relation`, if present here.
    pub fn resolve(&self, entity: &Entity<'a>, relation: &str) -> Option<Entity<'a>> {
        entity.follow(relation, |urn| self.get(urn))
    }

    /// The entities that the entity at `urn` lists under `relation`.
    ///
    /// Identifiers with no matching entity in this response are silently
    /// omitted; a partially populated response is not an error.
    pub fn outgoing(&self, urn: &str, relation: &str) -> Vec<Entity<'a>> {
        let Some(entity) = self.get(urn) else {
            return vec![];
        };
        entity.follow_all(relation, |target| self.get(target))
    }
}

// --- tests -------------------------------------------------------------------
