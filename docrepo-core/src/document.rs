//! The schemaless document type handled by a [`Repo`](crate::repo::Repo).
//!
//! A [`Document`] is an ordered string-to-BSON map tagged with the name of the collection
//! it belongs to. Its identifier lives in the payload under a key derived from the
//! collection name: the collection is singularized and suffixed with `_id`, so documents
//! of `users` are identified by `user_id` and documents of `categories` by `category_id`.
//!
//! Documents are immutable once built. Operations that change data, like the timestamps
//! and identifier assigned on insert, return new documents instead.

use bson::{Bson, de::deserialize_from_document, ser::serialize_to_document};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, to_value};

use crate::{error::RepoResult, inflection::singularize};

/// Field holding the time a document was first inserted.
pub const CREATED_AT: &str = "created_at";
/// Field holding the time a document was last written.
pub const UPDATED_AT: &str = "updated_at";

/// A schemaless, collection-tagged key/value record.
///
/// # Example
///
/// ```ignore
/// use bson::doc;
/// use docrepo::document::Document;
///
/// let user = Document::new("users", [doc! { "name": "Ana" }, doc! { "role": "admin" }]);
///
/// assert_eq!(user.id_key(), "user_id");
/// assert_eq!(user.id(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    collection: String,
    id_key: String,
    data: bson::Document,
}

impl Document {
    /// Builds a document by shallow-merging `payloads` from left to right.
    ///
    /// When a key appears in several payloads the last one wins. Nested documents and
    /// arrays are replaced as a whole, never merged.
    pub fn new<I>(collection: impl Into<String>, payloads: I) -> Self
    where
        I: IntoIterator<Item = bson::Document>,
    {
        let collection = collection.into();
        let mut data = bson::Document::new();

        for payload in payloads {
            for (key, value) in payload {
                data.insert(key, value);
            }
        }

        Self {
            id_key: format!("{}_id", singularize(&collection)),
            collection,
            data,
        }
    }

    /// Builds an empty document for `collection`.
    pub fn empty(collection: impl Into<String>) -> Self {
        Self::new(collection, std::iter::empty())
    }

    /// Builds a document from any serializable value that serializes to a map.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not serialize to a BSON document.
    pub fn from_serializable<T>(collection: impl Into<String>, value: &T) -> RepoResult<Self>
    where
        T: Serialize + ?Sized,
    {
        Ok(Self::new(collection, [serialize_to_document(value)?]))
    }

    /// Returns a copy of this document with `overrides` merged on top of its data.
    pub fn merged(&self, overrides: bson::Document) -> Self {
        Self::new(self.collection.clone(), [self.data.clone(), overrides])
    }

    /// The document's payload.
    pub fn data(&self) -> &bson::Document {
        &self.data
    }

    /// Consumes the document, returning its payload.
    pub fn into_data(self) -> bson::Document {
        self.data
    }

    /// The collection name, as given at construction.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The name of the identifier field, `<singular collection>_id`.
    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    /// The identifier value, or an empty string when it is absent or not a string.
    pub fn id(&self) -> &str {
        self.data.get_str(&self.id_key).unwrap_or_default()
    }

    /// Returns `true` when the document carries a non-empty identifier.
    pub fn has_id(&self) -> bool {
        !self.id().is_empty()
    }

    /// Returns the value of a single field.
    pub fn get(&self, key: &str) -> Option<&Bson> {
        self.data.get(key)
    }

    /// The `created_at` timestamp, when present.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp(CREATED_AT)
    }

    /// The `updated_at` timestamp, when present.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp(UPDATED_AT)
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.data
            .get_datetime(key)
            .ok()
            .map(|datetime| datetime.to_chrono())
    }

    /// Deserializes the payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload does not match the shape of `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> RepoResult<T> {
        Ok(deserialize_from_document(self.data.clone())?)
    }

    /// Converts the payload to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> RepoResult<Value> {
        Ok(to_value(&self.data)?)
    }
}

/// Builds a [`Document`] from a collection name and any number of payloads.
///
/// ```ignore
/// use bson::doc;
/// use docrepo::document;
///
/// let user = document!("users", doc! { "name": "Ana" }, doc! { "name": "Ana Maria" });
/// assert_eq!(user.data().get_str("name").unwrap(), "Ana Maria");
/// ```
#[macro_export]
macro_rules! document {
    ($collection:expr $(,)?) => {
        $crate::document::Document::empty($collection)
    };
    ($collection:expr, $($payload:expr),+ $(,)?) => {
        $crate::document::Document::new($collection, [$($payload),+])
    };
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use serde::Deserialize;

    use super::*;

    #[test]
    fn later_payloads_override_earlier_ones() {
        let document = Document::new(
            "users",
            [
                doc! { "name": "Ana", "age": 30 },
                doc! { "name": "Ana Maria" },
                doc! { "city": "Lisbon" },
            ],
        );

        assert_eq!(document.data().get_str("name").unwrap(), "Ana Maria");
        assert_eq!(document.data().get_i32("age").unwrap(), 30);
        assert_eq!(document.data().get_str("city").unwrap(), "Lisbon");
        assert_eq!(document.data().len(), 3);
    }

    #[test]
    fn merge_is_shallow() {
        let document = Document::new(
            "users",
            [
                doc! { "address": { "city": "Lisbon", "zip": "1000" } },
                doc! { "address": { "city": "Porto" } },
            ],
        );

        assert_eq!(
            document.data().get_document("address").unwrap(),
            &doc! { "city": "Porto" }
        );
    }

    #[test]
    fn empty_document_without_payloads() {
        let document = Document::empty("users");

        assert!(document.data().is_empty());
        assert_eq!(document.collection(), "users");
        assert_eq!(document.id(), "");
        assert!(!document.has_id());
    }

    #[test]
    fn id_key_is_derived_from_singular_collection() {
        assert_eq!(Document::empty("users").id_key(), "user_id");
        assert_eq!(Document::empty("categories").id_key(), "category_id");
        assert_eq!(Document::empty("people").id_key(), "person_id");
        assert_eq!(Document::empty("data").id_key(), "datum_id");
        assert_eq!(Document::empty("").id_key(), "_id");
    }

    #[test]
    fn id_is_read_only_when_it_is_a_string() {
        let with_id = Document::new("users", [doc! { "user_id": "abc" }]);
        let with_number = Document::new("users", [doc! { "user_id": 42 }]);
        let with_other_key = Document::new("users", [doc! { "id": "abc" }]);

        assert_eq!(with_id.id(), "abc");
        assert_eq!(with_number.id(), "");
        assert_eq!(with_other_key.id(), "");
    }

    #[test]
    fn merged_keeps_collection_and_lets_overrides_win() {
        let original = Document::new("users", [doc! { "name": "Ana", "user_id": "caller" }]);
        let merged = original.merged(doc! { "user_id": "server" });

        assert_eq!(merged.collection(), "users");
        assert_eq!(merged.id(), "server");
        assert_eq!(merged.data().get_str("name").unwrap(), "Ana");
        assert_eq!(original.id(), "caller");
    }

    #[test]
    fn document_macro_merges_payloads() {
        let document = crate::document!("users", doc! { "name": "Ana" }, doc! { "name": "Bia" });
        let empty = crate::document!("users");

        assert_eq!(document.data().get_str("name").unwrap(), "Bia");
        assert!(empty.data().is_empty());
    }

    #[test]
    fn round_trips_typed_values() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct User {
            user_id: String,
            name: String,
        }

        let user = User {
            user_id: "abc".into(),
            name: "Ana".into(),
        };

        let document = Document::from_serializable("users", &user).unwrap();

        assert_eq!(document.id(), "abc");
        assert_eq!(document.deserialize::<User>().unwrap(), user);
    }

    #[test]
    fn timestamps_are_read_from_datetime_fields() {
        let now = bson::DateTime::now();
        let document = Document::new("users", [doc! { CREATED_AT: now, UPDATED_AT: "later" }]);

        assert_eq!(document.created_at(), Some(now.to_chrono()));
        assert_eq!(document.updated_at(), None);
    }

    #[test]
    fn converts_to_json() {
        let document = Document::new("users", [doc! { "name": "Ana", "tags": ["a", "b"] }]);

        assert_eq!(
            document.to_json().unwrap(),
            serde_json::json!({ "name": "Ana", "tags": ["a", "b"] })
        );
    }
}
