//! Records ranked by the search and recommend paths
//!
//! Records arrive already validated. Fields the caller omits, or sends as
//! `null`, fall back to their defaults instead of failing deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A listing ranked by free-text search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: u64,
    /// Review count
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: f64,
    /// Location tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<String>,
}

impl Listing {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            popularity: 0,
            reviews: 0,
            distance: 0.0,
            locations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_signals(mut self, popularity: u64, reviews: u64, distance: f64) -> Self {
        self.popularity = popularity;
        self.reviews = reviews;
        self.distance = distance;
        self
    }
}

/// A service record compared by the recommender
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default, rename = "thingsToKnow", deserialize_with = "null_as_default")]
    pub things_to_know: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offers: Vec<String>,
    /// Vertical-specific attributes, in the order the caller sent them
    #[serde(default, rename = "additionalFields", deserialize_with = "null_as_default")]
    pub additional_fields: Map<String, Value>,
    /// Image category -> image URLs
    #[serde(default)]
    pub images: Option<HashMap<String, Vec<String>>>,
}

impl ServiceRecord {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            amenities: Vec::new(),
            things_to_know: Vec::new(),
            offers: Vec::new(),
            additional_fields: Map::new(),
            images: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.additional_fields.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_images(mut self, category: impl Into<String>, urls: Vec<String>) -> Self {
        self.images
            .get_or_insert_with(HashMap::new)
            .insert(category.into(), urls);
        self
    }

    /// An additional field by name
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.additional_fields.get(key)
    }

    /// First URL filed under `CoverImage`, if any
    pub fn cover_image(&self) -> Option<&str> {
        self.images
            .as_ref()?
            .get("CoverImage")?
            .first()
            .map(String::as_str)
    }
}

/// Deserialize `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_defaults() {
        let listing: Listing = serde_json::from_value(json!({"name": "Beach House"})).unwrap();
        assert_eq!(listing, Listing::new("Beach House"));
    }

    #[test]
    fn test_listing_nulls_become_defaults() {
        let listing: Listing = serde_json::from_value(json!({
            "name": "Cabin",
            "popularity": null,
            "reviews": null,
            "distance": null,
            "locations": null
        }))
        .unwrap();
        assert_eq!(listing.popularity, 0);
        assert_eq!(listing.distance, 0.0);
        assert!(listing.locations.is_empty());
    }

    #[test]
    fn test_service_accepts_underscore_id() {
        let service: ServiceRecord = serde_json::from_value(json!({
            "_id": "svc-1",
            "category": "Spa",
            "additionalFields": {"description": "relaxing massage"},
            "images": null
        }))
        .unwrap();
        assert_eq!(service.id, "svc-1");
        assert_eq!(service.field("description"), Some(&json!("relaxing massage")));
        assert_eq!(service.cover_image(), None);
    }

    #[test]
    fn test_additional_fields_keep_insertion_order() {
        let service: ServiceRecord = serde_json::from_value(json!({
            "id": "svc-2",
            "category": "Hotel",
            "additionalFields": {"zeta": 1, "alpha": 2, "mid": 3}
        }))
        .unwrap();
        let keys: Vec<&str> = service.additional_fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_cover_image_is_first_url() {
        let service = ServiceRecord::new("svc-3", "Spa")
            .with_images("CoverImage", vec!["a.jpg".into(), "b.jpg".into()])
            .with_images("Gallery", vec!["c.jpg".into()]);
        assert_eq!(service.cover_image(), Some("a.jpg"));

        let no_cover = ServiceRecord::new("svc-4", "Spa").with_images("CoverImage", vec![]);
        assert_eq!(no_cover.cover_image(), None);
    }
}
