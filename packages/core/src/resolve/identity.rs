//! Identity resolution for `/me` and profile lookups.

use crate::entity::Entity;
use crate::resolve::{first_match, first_str, Document, Locator};
use crate::types::{Me, Profile};
use crate::urn::{member_urn, urn_id, PROFILE_URN_MARKER};

/// Where to look for the signed-in member's mini profile, most current first.
pub const ME_CHAIN: &[Locator] = &[
    referenced_mini_profile,
    mini_profile_in_included,
    first_name_in_included,
    nested_mini_profile,
    top_level_mini_profile,
];

/// Where to look for a member's full profile, most current first.
pub const PROFILE_CHAIN: &[Locator] = &[
    referenced_profile,
    profile_in_included,
    first_name_in_included,
    nested_profile,
    top_level_profile,
];

/// Resolve the signed-in member from a `/me` response.
pub fn resolve_me(doc: &Document<'_>) -> Me {
    let Some(mini) = first_match(doc, ME_CHAIN) else {
        return Me::default();
    };

    let entity_urn = first_str(&mini, &["entityUrn", "dashEntityUrn"]);
    let profile_urn = ["dashEntityUrn", "entityUrn"]
        .iter()
        .filter_map(|key| mini.str(key))
        .find(|urn| urn.contains(PROFILE_URN_MARKER))
        .unwrap_or_default();
    let member_id = member_id(&mini, entity_urn);

    Me {
        public_identifier: mini.string("publicIdentifier"),
        first_name: mini.string("firstName"),
        last_name: mini.string("lastName"),
        occupation: mini.string("occupation"),
        entity_urn: entity_urn.to_string(),
        profile_urn: profile_urn.to_string(),
        member_urn: member_urn(member_id),
        member_id: member_id.to_string(),
    }
}

/// Resolve a member profile from an `/identity/dash/profiles` response.
pub fn resolve_profile(doc: &Document<'_>) -> Profile {
    let Some(prof) = first_match(doc, PROFILE_CHAIN) else {
        return Profile::default();
    };

    let entity_urn = first_str(&prof, &["entityUrn", "dashEntityUrn"]);
    let member_id = member_id(&prof, entity_urn);

    Profile {
        public_identifier: prof.string("publicIdentifier"),
        first_name: prof.string("firstName"),
        last_name: prof.string("lastName"),
        headline: prof.string("headline"),
        summary: prof.string("summary"),
        location: first_str(&prof, &["geoLocationName", "locationName"]).to_string(),
        entity_urn: entity_urn.to_string(),
        member_urn: member_urn(member_id),
        member_id: member_id.to_string(),
    }
}

// The entity's own URN wins; legacy responses only carry `objectUrn`
// (`urn:li:member:123`).
fn member_id<'a>(entity: &Entity<'a>, entity_urn: &'a str) -> &'a str {
    let id = urn_id(entity_urn);
    if !id.is_empty() {
        return id;
    }
    urn_id(entity.str("objectUrn").unwrap_or_default())
}

// --- locators ----------------------------------------------------------------

/// `data.*miniProfile` followed into `included[]`.
pub fn referenced_mini_profile<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    let data = doc.data()?;
    doc.graph().resolve(&data, "miniProfile")
}

/// First `included[]` entity that looks like a mini profile by URN or type.
pub fn mini_profile_in_included<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    doc.graph().entities().find(|e| {
        let urn = e.urn();
        let dash = e.str("dashEntityUrn").unwrap_or_default();
        let tag = e.type_tag();
        urn.contains("miniProfile")
            || dash.contains(PROFILE_URN_MARKER)
            || tag.contains("MiniProfile")
            || tag.contains("miniProfile")
    })
}

/// First `included[]` entity carrying a `firstName` field.
pub fn first_name_in_included<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    doc.graph().entities().find(|e| e.has("firstName"))
}

/// Legacy `data.miniProfile` object.
pub fn nested_mini_profile<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    doc.data()?.object("miniProfile")
}

/// Legacy top-level `miniProfile` object.
pub fn top_level_mini_profile<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    doc.root()?.object("miniProfile")
}

/// `data.*elements` followed into `included[]`; the first resolvable wins.
pub fn referenced_profile<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    let data = doc.data()?;
    let graph = doc.graph();
    data.follow_all("elements", |urn| graph.get(urn))
        .into_iter()
        .find(|e| e.urn().contains(PROFILE_URN_MARKER))
}

/// First `included[]` entity typed as a profile with an `fsd_profile` URN.
pub fn profile_in_included<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    doc.graph()
        .entities()
        .find(|e| e.type_tag().contains("Profile") && e.urn().contains(PROFILE_URN_MARKER))
}

/// Legacy `data` object that is itself the profile.
pub fn nested_profile<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    doc.data().filter(|d| d.has("firstName"))
}

/// Legacy top-level `profile` object, or a bare profile at the root.
pub fn top_level_profile<'a>(doc: &Document<'a>) -> Option<Entity<'a>> {
    let root = doc.root()?;
    root.object("profile")
        .or_else(|| root.has("firstName").then_some(root))
}

// --- tests -------------------------------------------------------------------
