use mongodb::bson::{doc, oid::ObjectId, Document};

use super::types::ListFilter;

pub struct FilterWhere;

impl FilterWhere {
    /// Build the query document shared by the page fetch and the total count.
    pub fn generate(filter: &ListFilter) -> Document {
        let mut query = Document::new();

        if let Some(lang) = &filter.lang {
            query.insert("lang", lang.as_str());
        }

        // Influencer refs are stored as hex strings, so match on strings
        if let Some(ids) = &filter.influencer_ids {
            query.insert("influencers", doc! { "$in": ids.clone() });
        }

        query
    }

    /// `_id` lookup, optionally narrowed by language.
    pub fn by_id(id: ObjectId, lang: Option<&str>) -> Document {
        let mut query = doc! { "_id": id };
        if let Some(lang) = lang {
            query.insert("lang", lang);
        }
        query
    }

    /// Set-membership lookup over parsed ids; unparseable entries are dropped.
    pub fn by_id_set(ids: &[ObjectId]) -> Document {
        doc! { "_id": { "$in": ids.to_vec() } }
    }
}
