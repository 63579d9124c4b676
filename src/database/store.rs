// Persistence seams used by handlers. MongoDB implementations live here;
// in-memory fakes for handler tests live in `crate::testing`.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::manager::DatabaseError;
use crate::database::models::{GalleryDocument, GalleryUpdate, InfluencerSmall, NewsDocument, UserDocument};
use crate::database::repository::Repository;
use crate::filter::{FilterOrder, FilterWhere, ListFilter, ListQuery};

#[async_trait]
pub trait GalleryStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Vec<GalleryDocument>, DatabaseError>;
    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError>;
    async fn find_by_id(&self, id: ObjectId, lang: Option<&str>) -> Result<Option<GalleryDocument>, DatabaseError>;
    async fn increment_views(&self, id: ObjectId) -> Result<(), DatabaseError>;
    async fn insert(&self, gallery: &GalleryDocument) -> Result<(), DatabaseError>;
    /// Returns `false` when no gallery matched `id`.
    async fn update(&self, id: ObjectId, update: &GalleryUpdate, now_millis: i64) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Vec<NewsDocument>, DatabaseError>;
    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError>;
    async fn find_by_id(&self, id: ObjectId, lang: Option<&str>) -> Result<Option<NewsDocument>, DatabaseError>;
    async fn increment_views(&self, id: ObjectId) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait InfluencerStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Vec<InfluencerSmall>, DatabaseError>;
    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<InfluencerSmall>, DatabaseError>;
    async fn find_by_ids(&self, ids: &[ObjectId], limit: i64) -> Result<Vec<InfluencerSmall>, DatabaseError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`DatabaseError::Duplicate`] when the username is taken.
    async fn insert(&self, user: &UserDocument) -> Result<(), DatabaseError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserDocument>, DatabaseError>;
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<UserDocument>, DatabaseError>;
}

#[async_trait]
impl GalleryStore for Repository<GalleryDocument> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<GalleryDocument>, DatabaseError> {
        self.select_page(
            FilterWhere::generate(&query.filter),
            FilterOrder::generate(query.order),
            query.page,
        )
        .await
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError> {
        Repository::count(self, FilterWhere::generate(filter)).await
    }

    async fn find_by_id(&self, id: ObjectId, lang: Option<&str>) -> Result<Option<GalleryDocument>, DatabaseError> {
        self.select_one(FilterWhere::by_id(id, lang)).await
    }

    async fn increment_views(&self, id: ObjectId) -> Result<(), DatabaseError> {
        self.increment(id, "views").await
    }

    async fn insert(&self, gallery: &GalleryDocument) -> Result<(), DatabaseError> {
        Repository::insert(self, gallery).await
    }

    async fn update(&self, id: ObjectId, update: &GalleryUpdate, now_millis: i64) -> Result<bool, DatabaseError> {
        let set = update.to_set_document(now_millis)?;
        self.update_set(id, set).await
    }
}

#[async_trait]
impl NewsStore for Repository<NewsDocument> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<NewsDocument>, DatabaseError> {
        self.select_page(
            FilterWhere::generate(&query.filter),
            FilterOrder::generate(query.order),
            query.page,
        )
        .await
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError> {
        Repository::count(self, FilterWhere::generate(filter)).await
    }

    async fn find_by_id(&self, id: ObjectId, lang: Option<&str>) -> Result<Option<NewsDocument>, DatabaseError> {
        self.select_one(FilterWhere::by_id(id, lang)).await
    }

    async fn increment_views(&self, id: ObjectId) -> Result<(), DatabaseError> {
        self.increment(id, "views").await
    }
}

#[async_trait]
impl InfluencerStore for Repository<InfluencerSmall> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<InfluencerSmall>, DatabaseError> {
        // Only the language constraint applies to influencers themselves
        let filter = ListFilter {
            lang: query.filter.lang.clone(),
            influencer_ids: None,
        };
        self.select_page(FilterWhere::generate(&filter), FilterOrder::generate(query.order), query.page)
            .await
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError> {
        let filter = ListFilter {
            lang: filter.lang.clone(),
            influencer_ids: None,
        };
        Repository::count(self, FilterWhere::generate(&filter)).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<InfluencerSmall>, DatabaseError> {
        self.select_one(doc! { "_id": id }).await
    }

    async fn find_by_ids(&self, ids: &[ObjectId], limit: i64) -> Result<Vec<InfluencerSmall>, DatabaseError> {
        self.select_ids(ids, limit).await
    }
}

#[async_trait]
impl UserStore for Repository<UserDocument> {
    async fn insert(&self, user: &UserDocument) -> Result<(), DatabaseError> {
        match Repository::insert(self, user).await {
            Err(DatabaseError::Mongo(err)) if DatabaseError::is_duplicate_key(&err) => {
                Err(DatabaseError::Duplicate(user.username.clone()))
            }
            other => other,
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserDocument>, DatabaseError> {
        self.select_one(doc! { "username": username }).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<UserDocument>, DatabaseError> {
        self.select_one(doc! { "_id": id }).await
    }
}
