//! Record types for the event import.
//!
//! [`SourceEvent`] is the lenient shape of one element of the input file's
//! `items` array; every field is optional and unknown fields are ignored.
//! [`EventDocument`] is the fixed target schema written to the store, derived
//! from a source record via the fallback rules documented per field.

use serde::{Deserialize, Serialize};

/// Literal used for `title` when the source record carries no `name`.
pub const FALLBACK_TITLE: &str = "Untitled Event";
/// Literal used for `location` when neither address field is usable.
pub const FALLBACK_LOCATION: &str = "No Location";
/// Label used in failure lines for records without a readable `name`.
pub const FALLBACK_LABEL: &str = "Unknown";
/// Fixed category every imported event is filed under.
pub const CATEGORY: &str = "Chico";
/// Fixed contact address attached to every imported event.
pub const CONTACT_EMAIL: &str = "chico@gmail.com";
/// Fixed organizer account that owns every imported event.
pub const ORGANIZER_ID: &str = "UF96s49oz7epIK7qGAMY4xlTYrd2";

/// One event record as it appears in the input file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub starts_on: Option<String>,
    pub address: Option<SourceAddress>,
    pub image_url: Option<String>,
}

/// Nested venue information on a source record. Both fields are optional;
/// an empty object falls through to the location fallback.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SourceAddress {
    pub address: Option<String>,
    pub name: Option<String>,
}

impl SourceEvent {
    /// Name to report this record under in failure lines. Only a missing
    /// `name` falls back; an empty one is reported as-is.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(FALLBACK_LABEL)
    }
}

/// The document written to the store, one per source record.
///
/// `createdAt` is intentionally absent here: it is assigned by the store at
/// write time, never by this program's clock.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub category: String,
    pub email: String,
    pub image_urls: Vec<String>,
    pub organizer_id: String,
    pub interested_user_emails: Vec<String>,
    pub interested_user_ids: Vec<String>,
    pub interested_users: Vec<String>,
}

impl EventDocument {
    /// Derives the target document from a source record.
    ///
    /// Fallbacks: a missing `name` becomes [`FALLBACK_TITLE`]; missing
    /// `description`/`startsOn` become empty text; `location` prefers a
    /// non-empty `address.address`, then `address.name`, then
    /// [`FALLBACK_LOCATION`]; an absent or empty `imageUrl` yields an empty
    /// `imageUrls` list. Only `address.address` and `imageUrl` treat an
    /// empty string like an absent value; an empty `name` or `address.name`
    /// is used verbatim. The three `interested*` lists start empty and are
    /// populated later by other systems.
    pub fn from_source(source: &SourceEvent) -> Self {
        let location = source
            .address
            .as_ref()
            .and_then(|a| non_empty(a.address.as_deref()).or(a.name.as_deref()))
            .unwrap_or(FALLBACK_LOCATION);

        let image_urls = non_empty(source.image_url.as_deref())
            .map(|url| vec![url.to_string()])
            .unwrap_or_default();

        Self {
            title: source
                .name
                .clone()
                .unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            description: source.description.clone().unwrap_or_default(),
            date: source.starts_on.clone().unwrap_or_default(),
            location: location.to_string(),
            category: CATEGORY.to_string(),
            email: CONTACT_EMAIL.to_string(),
            image_urls,
            organizer_id: ORGANIZER_ID.to_string(),
            interested_user_emails: Vec::new(),
            interested_user_ids: Vec::new(),
            interested_users: Vec::new(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(value: serde_json::Value) -> SourceEvent {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn source_event_uses_camel_case_field_names() {
        let event = source(json!({
            "name": "Fall Fair",
            "startsOn": "2024-10-01",
            "imageUrl": "https://example.org/fair.jpg",
            "address": {"address": "Main St", "name": "Quad"}
        }));

        assert_eq!(event.name.as_deref(), Some("Fall Fair"));
        assert_eq!(event.starts_on.as_deref(), Some("2024-10-01"));
        assert_eq!(
            event.image_url.as_deref(),
            Some("https://example.org/fair.jpg")
        );
        let address = event.address.expect("address should be present");
        assert_eq!(address.address.as_deref(), Some("Main St"));
        assert_eq!(address.name.as_deref(), Some("Quad"));
    }

    #[test]
    fn source_event_tolerates_unknown_fields() {
        let event = source(json!({"name": "X", "ticketing": {"vendor": "y"}}));
        assert_eq!(event.name.as_deref(), Some("X"));
    }

    #[test]
    fn maps_full_record() {
        let doc = EventDocument::from_source(&source(json!({
            "name": "Fall Fair",
            "startsOn": "2024-10-01",
            "address": {"address": "Main St"}
        })));

        assert_eq!(doc.title, "Fall Fair");
        assert_eq!(doc.date, "2024-10-01");
        assert_eq!(doc.location, "Main St");
        assert_eq!(doc.description, "");
        assert!(doc.image_urls.is_empty());
        assert_eq!(doc.category, CATEGORY);
        assert_eq!(doc.email, CONTACT_EMAIL);
        assert_eq!(doc.organizer_id, ORGANIZER_ID);
    }

    #[test]
    fn missing_name_falls_back_to_untitled() {
        let doc = EventDocument::from_source(&source(json!({"address": {"name": "Quad"}})));
        assert_eq!(doc.title, FALLBACK_TITLE);
        assert_eq!(doc.location, "Quad");
    }

    #[test]
    fn empty_name_is_kept_as_empty_title() {
        let event = source(json!({"name": ""}));
        let doc = EventDocument::from_source(&event);
        assert_eq!(doc.title, "");
        assert_eq!(event.label(), "");
    }

    #[test]
    fn empty_venue_name_is_kept_as_location() {
        let doc = EventDocument::from_source(&source(json!({
            "address": {"name": ""}
        })));
        assert_eq!(doc.location, "");
    }

    #[test]
    fn street_address_wins_over_venue_name() {
        let doc = EventDocument::from_source(&source(json!({
            "address": {"address": "Main St", "name": "Quad"}
        })));
        assert_eq!(doc.location, "Main St");
    }

    #[test]
    fn empty_street_address_falls_through_to_venue_name() {
        let doc = EventDocument::from_source(&source(json!({
            "address": {"address": "", "name": "Quad"}
        })));
        assert_eq!(doc.location, "Quad");
    }

    #[test]
    fn empty_address_object_falls_through_to_fallback() {
        let doc = EventDocument::from_source(&source(json!({"address": {}})));
        assert_eq!(doc.location, FALLBACK_LOCATION);
    }

    #[test]
    fn absent_address_falls_through_to_fallback() {
        let doc = EventDocument::from_source(&source(json!({"name": "X"})));
        assert_eq!(doc.location, FALLBACK_LOCATION);
    }

    #[test]
    fn image_url_becomes_single_element_list() {
        let doc = EventDocument::from_source(&source(json!({
            "imageUrl": "https://example.org/a.jpg"
        })));
        assert_eq!(doc.image_urls, vec!["https://example.org/a.jpg"]);
    }

    #[test]
    fn empty_image_url_yields_empty_list() {
        let doc = EventDocument::from_source(&source(json!({"imageUrl": ""})));
        assert!(doc.image_urls.is_empty());
    }

    #[test]
    fn interested_lists_start_empty() {
        let doc = EventDocument::from_source(&source(json!({"name": "X"})));
        assert!(doc.interested_user_emails.is_empty());
        assert!(doc.interested_user_ids.is_empty());
        assert!(doc.interested_users.is_empty());
    }

    #[test]
    fn label_falls_back_only_for_a_missing_name() {
        assert_eq!(source(json!({"name": "Fall Fair"})).label(), "Fall Fair");
        assert_eq!(source(json!({})).label(), FALLBACK_LABEL);
        assert_eq!(source(json!({"name": ""})).label(), "");
    }

    #[test]
    fn document_serializes_with_camel_case_names() {
        let doc = EventDocument::from_source(&source(json!({"name": "X"})));
        let value = serde_json::to_value(&doc).expect("serialization should succeed");
        assert!(value.get("imageUrls").is_some());
        assert!(value.get("organizerId").is_some());
        assert!(value.get("interestedUserEmails").is_some());
        assert!(value.get("image_urls").is_none());
    }
}
