use mongodb::bson::{oid::ObjectId, serde_helpers::serialize_object_id_as_hex_string};
use serde::{Deserialize, Serialize};

/// Display fields of an influencer. Read-only here, so the `_id` is
/// serialized straight out as a hex `id` for JSON responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerSmall {
    #[serde(rename(serialize = "id", deserialize = "_id"), serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub avatar: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}
