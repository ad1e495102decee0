//! Search hit resolution.

use crate::entity::Entity;
use crate::graph::TypeFilter;
use crate::resolve::Document;
use crate::types::SearchItem;
use crate::urn::normalize_public_identifier;

/// Fragment of the `$type` carried by every search hit, person or job.
pub const RESULT_TYPE_MARKER: &str = "EntityResultViewModel";

/// All search hits in the response, in array order.
///
/// Cluster headers and other view models in `included[]` are skipped.
pub fn resolve_search_results(doc: &Document<'_>) -> Vec<SearchItem> {
    doc.graph()
        .matching(TypeFilter::Contains(RESULT_TYPE_MARKER))
        .map(|e| parse_search_item(&e))
        .collect()
}

/// Read one search result entity into a [`SearchItem`].
pub fn parse_search_item(e: &Entity<'_>) -> SearchItem {
    let text = |key: &str| e.text(key).unwrap_or_default().to_string();

    let public_identifier = match e.str("navigationUrl") {
        Some(url) if !url.trim().is_empty() => normalize_public_identifier(url),
        _ => String::new(),
    };

    SearchItem {
        public_identifier,
        title: text("title"),
        primary_subtitle: text("primarySubtitle"),
        secondary_subtitle: text("secondarySubtitle"),
        target_urn: e.string("entityUrn"),
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn fixture() -> Value {
        json!({
            "data": {},
            "included": [
                {
                    "$type": "com.linkedin.voyager.dash.search.EntityResultViewModel",
                    "entityUrn": "urn:li:fsd_profile:ACoAAAA111",
                    "title": { "text": "Alice Johnson" },
                    "primarySubtitle": { "text": "Software Engineer at Google" },
                    "secondarySubtitle": { "text": "San Francisco, CA" },
                    "navigationUrl": "https://www.linkedin.com/in/alice-johnson"
                },
                {
                    "$type": "com.linkedin.voyager.dash.search.EntityResultViewModel",
                    "entityUrn": "urn:li:fsd_profile:ACoAAAA222",
                    "title": { "text": "Bob Williams" },
                    "primarySubtitle": "Backend Developer",
                    "secondarySubtitle": { "text": "New York, NY" },
                    "navigationUrl": "https://www.linkedin.com/in/bob-williams/"
                },
                {
                    "$type": "com.linkedin.voyager.dash.search.SearchClusterViewModel",
                    "entityUrn": "urn:li:fsd_searchCluster:123",
                    "title": "People"
                }
            ]
        })
    }

    #[test]
    fn hits_skip_cluster_headers() {
        let v = fixture();
        let items = resolve_search_results(&Document::new(&v));
        assert_eq!(items.len(), 2);

        let alice = &items[0];
        assert_eq!(alice.title, "Alice Johnson");
        assert_eq!(alice.primary_subtitle, "Software Engineer at Google");
        assert_eq!(alice.secondary_subtitle, "San Francisco, CA");
        assert_eq!(alice.public_identifier, "alice-johnson");
        assert_eq!(alice.target_urn, "urn:li:fsd_profile:ACoAAAA111");
    }

    #[test]
    fn plain_string_subtitle() {
        let v = fixture();
        let items = resolve_search_results(&Document::new(&v));
        let bob = &items[1];
        assert_eq!(bob.title, "Bob Williams");
        assert_eq!(bob.primary_subtitle, "Backend Developer");
        assert_eq!(bob.public_identifier, "bob-williams");
    }

    #[test]
    fn job_hit_without_handle() {
        let v = json!({
            "included": [{
                "$type": "com.linkedin.voyager.dash.search.EntityResultViewModel",
                "entityUrn": "urn:li:fsd_jobPosting:3812345678",
                "title": { "text": "Rust Engineer" },
                "navigationUrl": "https://www.linkedin.com/jobs/view/3812345678/"
            }, {
                "$type": "com.linkedin.voyager.dash.search.EntityResultViewModel",
                "entityUrn": "urn:li:fsd_jobPosting:1",
                "title": 42
            }]
        });
        let items = resolve_search_results(&Document::new(&v));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].public_identifier, "3812345678");
        assert_eq!(items[0].primary_subtitle, "");
        assert_eq!(items[1].title, "");
        assert_eq!(items[1].public_identifier, "");
    }

    #[test]
    fn no_included() {
        let v = json!({ "data": {} });
        assert!(resolve_search_results(&Document::new(&v)).is_empty());
    }
}
