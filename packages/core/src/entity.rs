//! Typed accessors over a single normalized entity.
//!
//! Voyager responses carry entities as untyped JSON objects whose shape drifts
//! between API generations. [`Entity`] wraps one such object and exposes
//! narrow getters (`str`, `i64`, `object`, `text`, references) so resolvers
//! never touch a raw `serde_json::Map` directly.
//!
//! # Reference conventions
//!
//! A relation such as `sender` may be written either as `"*sender"` (the
//! resolved-marker form) or as plain `"sender"`. Only one form is populated in
//! any given response, and the rule for which one appears is undocumented.
//! [`Entity::reference`], [`Entity::follow`] and [`Entity::follow_all`] always
//! try the `*`-prefixed key first and the plain key second.

use serde_json::{Map, Value};

/// Field carrying an entity's declared type label.
pub const TYPE_KEY: &str = "$type";

/// Field carrying an entity's primary identifier.
pub const URN_KEY: &str = "entityUrn";

/// Prefix marking a field whose value is a reference into `included[]`.
pub const REFERENCE_MARKER: char = '*';

/// The two field names a relation may appear under, preferred form first.
pub fn relation_keys(relation: &str) -> [String; 2] {
    [format!("{REFERENCE_MARKER}{relation}"), relation.to_string()]
}

/// A read-only view of one JSON object in a normalized response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Entity<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap `value` if it is a JSON object; anything else is not an entity.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// The underlying field map.
    pub fn fields(&self) -> &'a Map<String, Value> {
        self.fields
    }

    /// The declared type label (`$type`), or `""`.
    pub fn type_tag(&self) -> &'a str {
        self.str(TYPE_KEY).unwrap_or_default()
    }

    /// The primary identifier (`entityUrn`), or `""`.
    pub fn urn(&self) -> &'a str {
        self.str(URN_KEY).unwrap_or_default()
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// A string field. Missing keys and non-string values yield `None`.
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Owned copy of a string field, empty when absent.
    pub fn string(&self, key: &str) -> String {
        self.str(key).unwrap_or_default().to_string()
    }

    /// A string reached by walking nested objects along `path`.
    ///
    /// An empty path, a missing key, or a non-object intermediate yields `None`.
    pub fn str_at(&self, path: &[&str]) -> Option<&'a str> {
        let (last, parents) = path.split_last()?;
        let mut current = *self;
        for key in parents {
            current = current.object(key)?;
        }
        current.str(last)
    }

    /// An integer field. JSON floats are truncated; anything else is `0`.
    pub fn i64(&self, key: &str) -> i64 {
        match self.fields.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// A nested object field, viewed as an entity.
    pub fn object(&self, key: &str) -> Option<Entity<'a>> {
        self.fields.get(key).and_then(Entity::from_value)
    }

    /// A text field that is either a plain string or an object carrying the
    /// string under `"text"`.
    pub fn text(&self, key: &str) -> Option<&'a str> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s),
            Value::Object(m) => m.get("text").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The string elements of an array field. Non-string elements are skipped.
    pub fn str_list(&self, key: &str) -> Option<Vec<&'a str>> {
        let items = self.fields.get(key)?.as_array()?;
        Some(items.iter().filter_map(Value::as_str).collect())
    }

    /// The raw identifier stored for `relation`, under either convention.
    ///
    /// Returns the first non-empty string found, `*relation` before `relation`.
    pub fn reference(&self, relation: &str) -> Option<&'a str> {
        relation_keys(relation)
            .iter()
            .filter_map(|key| self.str(key))
            .find(|s| !s.is_empty())
    }

    /// Follow a single-valued relation through `lookup`.
    ///
    /// Each convention is tried in order and the first identifier that
    /// `lookup` resolves wins. An identifier that resolves to nothing does not
    /// stop the search.
    pub fn follow<T>(
        &self,
        relation: &str,
        mut lookup: impl FnMut(&'a str) -> Option<T>,
    ) -> Option<T> {
        relation_keys(relation)
            .iter()
            .filter_map(|key| self.str(key))
            .filter(|s| !s.is_empty())
            .find_map(|urn| lookup(urn))
    }

    /// Follow a list-valued relation through `lookup`.
    ///
    /// The first convention that resolves at least one identifier wins;
    /// unresolved identifiers are dropped.
    pub fn follow_all<T>(
        &self,
        relation: &str,
        mut lookup: impl FnMut(&'a str) -> Option<T>,
    ) -> Vec<T> {
        for key in relation_keys(relation) {
            let Some(urns) = self.str_list(&key) else {
                continue;
            };
            let resolved: Vec<T> = urns.into_iter().filter_map(&mut lookup).collect();
            if !resolved.is_empty() {
                return resolved;
            }
        }
        Vec::new()
    }
}

// --- tests -------------------------------------------------------------------
