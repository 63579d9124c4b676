use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::influencer::InfluencerSmall;
use super::user::AuthorSummary;
use super::Enrichment;

/// Stored news article. Written by the editorial tooling; this service only
/// reads it and bumps `views`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub lang: String,
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

#[derive(Debug, Clone, Serialize)]
pub struct NewsView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image: String,
    pub lang: String,
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

impl NewsView {
    pub fn new(news: NewsDocument, enrichment: Enrichment) -> Self {
        let influencers = match enrichment.influencers_data {
            Some(_) => None,
            None if news.influencers.is_empty() => None,
            None => Some(news.influencers),
        };

        Self {
            id: news.id.to_hex(),
            title: news.title,
            slug: news.slug,
            content: news.content,
            image: news.image,
            lang: news.lang,
            influencers,
            influencers_data: enrichment.influencers_data,
            author_id: news.author_id,
            author: enrichment.author,
            views: news.views,
            created_on: news.created_on,
            updated_on: news.updated_on,
            tags: news.tags,
        }
    }
}
