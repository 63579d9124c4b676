use mongodb::bson::{self, doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::influencer::InfluencerSmall;
use super::user::AuthorSummary;
use super::Enrichment;

/// Image embedded in a gallery. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDocument {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub caption: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub is_cover: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub created_on: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub updated_on: i64,
}

/// Stored gallery. Timestamps are unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub lang: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub images: Vec<ImageDocument>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub influencers: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub author_id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub views: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub created_on: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub updated_on: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
}

/// Fields accepted when creating a gallery.
#[derive(Debug, Clone, Default)]
pub struct NewGallery {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub images: Vec<ImageDocument>,
    pub influencers: Vec<String>,
    pub author_id: String,
    pub tags: Vec<String>,
}

impl GalleryDocument {
    pub fn create(new: NewGallery, now_millis: i64) -> Self {
        Self {
            id: ObjectId::new(),
            slug: slugify(&new.title),
            title: new.title,
            description: new.description,
            lang: new.lang,
            images: new.images,
            influencers: new.influencers,
            author_id: new.author_id,
            views: 0,
            created_on: now_millis,
            updated_on: now_millis,
            tags: new.tags,
        }
    }
}

/// JSON body of `POST /api/galleries` and the JSON variant of the update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lang: Option<String>,
    pub images: Option<Vec<ImageDocument>>,
    pub influencers: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub author_id: Option<String>,
}

/// Partial update. `None` (or an empty string upstream) leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lang: Option<String>,
    pub images: Option<Vec<ImageDocument>>,
    pub influencers: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl GalleryUpdate {
    pub fn from_payload(payload: GalleryPayload) -> Self {
        Self {
            title: payload.title.filter(|s| !s.is_empty()),
            description: payload.description.filter(|s| !s.is_empty()),
            lang: payload.lang.filter(|s| !s.is_empty()),
            images: payload.images,
            influencers: payload.influencers,
            tags: payload.tags,
        }
    }

    /// `$set` body; a new title also rewrites the slug.
    pub fn to_set_document(&self, now_millis: i64) -> Result<Document, bson::ser::Error> {
        let mut set = doc! { "updated_on": now_millis };

        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
            set.insert("slug", slugify(title));
        }
        if let Some(description) = &self.description {
            set.insert("description", description.as_str());
        }
        if let Some(lang) = &self.lang {
            set.insert("lang", lang.as_str());
        }
        if let Some(images) = &self.images {
            set.insert("images", bson::to_bson(images)?);
        }
        if let Some(influencers) = &self.influencers {
            set.insert("influencers", influencers.clone());
        }
        if let Some(tags) = &self.tags {
            set.insert("tags", tags.clone());
        }

        Ok(set)
    }

    /// Apply to an in-memory copy the same way the `$set` would.
    pub fn apply(&self, gallery: &mut GalleryDocument, now_millis: i64) {
        gallery.updated_on = now_millis;
        if let Some(title) = &self.title {
            gallery.title = title.clone();
            gallery.slug = slugify(title);
        }
        if let Some(description) = &self.description {
            gallery.description = description.clone();
        }
        if let Some(lang) = &self.lang {
            gallery.lang = lang.clone();
        }
        if let Some(images) = &self.images {
            gallery.images = images.clone();
        }
        if let Some(influencers) = &self.influencers {
            gallery.influencers = influencers.clone();
        }
        if let Some(tags) = &self.tags {
            gallery.tags = tags.clone();
        }
    }
}

/// Gallery as returned by the API, with request-time joins.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub lang: String,
    pub images: Vec<ImageDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influencers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influencers_data: Option<Vec<InfluencerSmall>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorSummary>,
    pub views: i64,
    pub created_on: i64,
    pub updated_on: i64,
    pub tags: Vec<String>,
}

impl GalleryView {
    pub fn new(gallery: GalleryDocument, enrichment: Enrichment) -> Self {
        // Resolved influencer records replace the raw id list
        let influencers = match enrichment.influencers_data {
            Some(_) => None,
            None if gallery.influencers.is_empty() => None,
            None => Some(gallery.influencers),
        };

        Self {
            id: gallery.id.to_hex(),
            title: gallery.title,
            slug: gallery.slug,
            description: gallery.description,
            lang: gallery.lang,
            images: gallery.images,
            influencers,
            influencers_data: enrichment.influencers_data,
            author_id: gallery.author_id,
            author: enrichment.author,
            views: gallery.views,
            created_on: gallery.created_on,
            updated_on: gallery.updated_on,
            tags: gallery.tags,
        }
    }
}

/// Lowercased title with spaces turned into hyphens. Not unique.
pub fn slugify(title: &str) -> String {
    title.replace(' ', "-").to_lowercase()
}
