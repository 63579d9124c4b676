use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;
use mongodb::Collection;
use serde::{de::DeserializeOwned, Serialize};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::filter::{FilterWhere, Pagination};

/// Thin typed wrapper over one collection. One driver round trip per call.
pub struct Repository<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T> Clone for Repository<T>
where
    T: Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
        }
    }
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(manager: &DatabaseManager, collection_name: &str) -> Self {
        Self {
            collection: manager.collection::<T>(collection_name),
        }
    }

    pub async fn select_page(
        &self,
        filter: Document,
        sort: Document,
        page: Pagination,
    ) -> Result<Vec<T>, DatabaseError> {
        let options = FindOptions::builder()
            .sort(sort)
            .skip(page.skip)
            .limit(page.limit)
            .build();

        let cursor = self.collection.find(filter, options).await?;
        let documents: Vec<T> = cursor.try_collect().await?;
        Ok(documents)
    }

    pub async fn select_one(&self, filter: Document) -> Result<Option<T>, DatabaseError> {
        Ok(self.collection.find_one(filter, None).await?)
    }

    pub async fn count(&self, filter: Document) -> Result<u64, DatabaseError> {
        Ok(self.collection.count_documents(filter, None).await?)
    }

    /// Set-membership fetch, capped at `limit` documents.
    pub async fn select_ids(&self, ids: &[ObjectId], limit: i64) -> Result<Vec<T>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.collection.find(FilterWhere::by_id_set(ids), options).await?;
        let documents: Vec<T> = cursor.try_collect().await?;
        Ok(documents)
    }

    pub async fn insert(&self, document: &T) -> Result<(), DatabaseError> {
        self.collection.insert_one(document, None).await?;
        Ok(())
    }

    /// `$set` on one document; returns whether it matched.
    pub async fn update_set(&self, id: ObjectId, set: Document) -> Result<bool, DatabaseError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn increment(&self, id: ObjectId, field: &str) -> Result<(), DatabaseError> {
        let mut inc = Document::new();
        inc.insert(field, 1_i64);
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$inc": inc }, None)
            .await?;
        Ok(())
    }
}
