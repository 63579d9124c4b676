//! In-memory stand-ins for MongoDB and the CDN, used by unit and handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::AppConfig;
use crate::database::models::{GalleryDocument, GalleryUpdate, ImageDocument, InfluencerSmall, NewsDocument, UserDocument};
use crate::database::{DatabaseError, GalleryStore, HealthCheck, InfluencerStore, NewsStore, UserStore};
use crate::filter::{ListFilter, ListQuery, OrderBy};
use crate::media::{DestroyResult, FormFile, MediaAdapter, MediaError, MediaUploader, UploadParams, UploadResult, UploadSource};
use crate::services::DisabledNotifier;
use crate::state::AppState;

/// Fields the list queries filter and sort on.
trait Listed: Clone {
    fn lang(&self) -> &str;
    fn influencers(&self) -> &[String];
    fn created_on(&self) -> i64;
    fn updated_on(&self) -> i64;
    fn views(&self) -> i64;
}

macro_rules! impl_listed {
    ($t:ty) => {
        impl Listed for $t {
            fn lang(&self) -> &str {
                &self.lang
            }
            fn influencers(&self) -> &[String] {
                &self.influencers
            }
            fn created_on(&self) -> i64 {
                self.created_on
            }
            fn updated_on(&self) -> i64 {
                self.updated_on
            }
            fn views(&self) -> i64 {
                self.views
            }
        }
    };
}

impl_listed!(GalleryDocument);
impl_listed!(NewsDocument);

fn matches<T: Listed>(item: &T, filter: &ListFilter) -> bool {
    if let Some(lang) = &filter.lang {
        if item.lang() != lang {
            return false;
        }
    }
    if let Some(ids) = &filter.influencer_ids {
        if !item.influencers().iter().any(|i| ids.contains(i)) {
            return false;
        }
    }
    true
}

fn select_page<T: Listed>(items: &[T], query: &ListQuery) -> Vec<T> {
    let mut selected: Vec<T> = items.iter().filter(|i| matches(*i, &query.filter)).cloned().collect();

    match query.order {
        OrderBy::CreatedOn => selected.sort_by_key(|i| i.created_on()),
        OrderBy::CreatedOnNew => selected.sort_by_key(|i| std::cmp::Reverse(i.created_on())),
        OrderBy::Popular => selected.sort_by_key(|i| std::cmp::Reverse(i.views())),
        OrderBy::Recent => selected.sort_by_key(|i| std::cmp::Reverse(i.updated_on())),
    }

    selected
        .into_iter()
        .skip(query.page.skip as usize)
        .take(query.page.limit as usize)
        .collect()
}

#[derive(Default)]
pub struct MemoryGalleryStore {
    pub items: Mutex<Vec<GalleryDocument>>,
    pub fail_writes: bool,
}

impl MemoryGalleryStore {
    pub fn with(items: Vec<GalleryDocument>) -> Self {
        Self {
            items: Mutex::new(items),
            fail_writes: false,
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<GalleryDocument> {
        self.items.lock().unwrap().iter().find(|g| g.id == id).cloned()
    }

    pub fn all(&self) -> Vec<GalleryDocument> {
        self.items.lock().unwrap().clone()
    }
}

fn write_failure() -> DatabaseError {
    DatabaseError::Timeout
}

#[async_trait]
impl GalleryStore for MemoryGalleryStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<GalleryDocument>, DatabaseError> {
        let items = self.items.lock().unwrap();
        Ok(select_page(items.as_slice(), query))
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError> {
        Ok(self.items.lock().unwrap().iter().filter(|g| matches(*g, filter)).count() as u64)
    }

    async fn find_by_id(&self, id: ObjectId, lang: Option<&str>) -> Result<Option<GalleryDocument>, DatabaseError> {
        Ok(self.get(id).filter(|g| lang.map_or(true, |l| g.lang == l)))
    }

    async fn increment_views(&self, id: ObjectId) -> Result<(), DatabaseError> {
        if let Some(gallery) = self.items.lock().unwrap().iter_mut().find(|g| g.id == id) {
            gallery.views += 1;
        }
        Ok(())
    }

    async fn insert(&self, gallery: &GalleryDocument) -> Result<(), DatabaseError> {
        if self.fail_writes {
            return Err(write_failure());
        }
        self.items.lock().unwrap().push(gallery.clone());
        Ok(())
    }

    async fn update(&self, id: ObjectId, update: &GalleryUpdate, now_millis: i64) -> Result<bool, DatabaseError> {
        if self.fail_writes {
            return Err(write_failure());
        }
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|g| g.id == id) {
            Some(gallery) => {
                update.apply(gallery, now_millis);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryNewsStore {
    pub items: Mutex<Vec<NewsDocument>>,
}

impl MemoryNewsStore {
    pub fn with(items: Vec<NewsDocument>) -> Self {
        Self { items: Mutex::new(items) }
    }

    pub fn get(&self, id: ObjectId) -> Option<NewsDocument> {
        self.items.lock().unwrap().iter().find(|n| n.id == id).cloned()
    }
}

#[async_trait]
impl NewsStore for MemoryNewsStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<NewsDocument>, DatabaseError> {
        let items = self.items.lock().unwrap();
        Ok(select_page(items.as_slice(), query))
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError> {
        Ok(self.items.lock().unwrap().iter().filter(|n| matches(*n, filter)).count() as u64)
    }

    async fn find_by_id(&self, id: ObjectId, lang: Option<&str>) -> Result<Option<NewsDocument>, DatabaseError> {
        Ok(self.get(id).filter(|n| lang.map_or(true, |l| n.lang == l)))
    }

    async fn increment_views(&self, id: ObjectId) -> Result<(), DatabaseError> {
        if let Some(item) = self.items.lock().unwrap().iter_mut().find(|n| n.id == id) {
            item.views += 1;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryInfluencerStore {
    pub items: Mutex<Vec<InfluencerSmall>>,
}

impl MemoryInfluencerStore {
    pub fn with(items: Vec<InfluencerSmall>) -> Self {
        Self { items: Mutex::new(items) }
    }
}

fn influencer_matches(item: &InfluencerSmall, filter: &ListFilter) -> bool {
    filter.lang.as_ref().map_or(true, |l| item.lang.as_ref() == Some(l))
}

#[async_trait]
impl InfluencerStore for MemoryInfluencerStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<InfluencerSmall>, DatabaseError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| influencer_matches(i, &query.filter))
            .skip(query.page.skip as usize)
            .take(query.page.limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ListFilter) -> Result<u64, DatabaseError> {
        Ok(self.items.lock().unwrap().iter().filter(|i| influencer_matches(i, filter)).count() as u64)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<InfluencerSmall>, DatabaseError> {
        Ok(self.items.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId], limit: i64) -> Result<Vec<InfluencerSmall>, DatabaseError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| ids.contains(&i.id))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    pub items: Mutex<Vec<UserDocument>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    /// Mirrors the unique index on `username`.
    async fn insert(&self, user: &UserDocument) -> Result<(), DatabaseError> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Duplicate(user.username.clone()));
        }
        items.push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserDocument>, DatabaseError> {
        Ok(self.items.lock().unwrap().iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<UserDocument>, DatabaseError> {
        Ok(self.items.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.0 {
            Ok(())
        } else {
            Err(DatabaseError::Timeout)
        }
    }
}

/// Records uploads and deletions instead of calling the CDN.
#[derive(Default)]
pub struct MemoryUploader {
    stored: Mutex<Vec<UploadResult>>,
    destroyed: Mutex<Vec<String>>,
    uploads: Mutex<Vec<UploadParams>>,
    fail_on: Option<String>,
}

impl MemoryUploader {
    /// Rejects the upload whose file name (or remote URL) equals `name`.
    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Vec<UploadResult> {
        self.stored.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<UploadParams> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaUploader for MemoryUploader {
    async fn upload(&self, source: UploadSource, params: &UploadParams) -> Result<UploadResult, MediaError> {
        let (name, bytes) = match &source {
            UploadSource::Bytes { data, file_name } => (file_name.clone(), data.len() as u64),
            UploadSource::RemoteUrl(url) => (url.clone(), 0),
        };
        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(MediaError::Provider {
                action: "upload image",
                message: "rejected by test uploader".to_string(),
            });
        }

        self.uploads.lock().unwrap().push(params.clone());
        let public_id = format!("{}/{}", params.folder, params.public_id);
        let result = UploadResult {
            secure_url: format!("https://res.cloudinary.com/test/image/upload/v1/{}.jpg", public_id),
            public_id,
            format: "jpg".to_string(),
            bytes,
        };
        self.stored.lock().unwrap().push(result.clone());
        Ok(result)
    }

    async fn destroy(&self, public_id: &str) -> Result<DestroyResult, MediaError> {
        let mut stored = self.stored.lock().unwrap();
        let before = stored.len();
        stored.retain(|r| r.public_id != public_id);
        let result = if stored.len() < before { "ok" } else { "not found" };

        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(DestroyResult {
            result: result.to_string(),
        })
    }
}

pub fn influencer(name: &str) -> InfluencerSmall {
    InfluencerSmall {
        id: ObjectId::new(),
        name: name.to_string(),
        slug: name.to_lowercase(),
        avatar: format!("https://cdn.example.com/{}.png", name.to_lowercase()),
        label: String::new(),
        lang: Some("ID".to_string()),
    }
}

pub fn gallery(title: &str, lang: &str, created_on: i64, updated_on: i64, views: i64) -> GalleryDocument {
    GalleryDocument {
        id: ObjectId::new(),
        title: title.to_string(),
        slug: crate::database::models::slugify(title),
        description: String::new(),
        lang: lang.to_string(),
        images: vec![ImageDocument {
            url: "https://cdn.example.com/a.jpg".to_string(),
            caption: "a.jpg".to_string(),
            is_cover: true,
            created_on: created_on / 1000,
            updated_on: created_on / 1000,
        }],
        influencers: Vec::new(),
        author_id: String::new(),
        views,
        created_on,
        updated_on,
        tags: Vec::new(),
    }
}

pub fn news(title: &str, lang: &str, updated_on: i64) -> NewsDocument {
    NewsDocument {
        id: ObjectId::new(),
        title: title.to_string(),
        slug: crate::database::models::slugify(title),
        content: format!("{} body", title),
        image: String::new(),
        lang: lang.to_string(),
        influencers: Vec::new(),
        author_id: String::new(),
        views: 0,
        created_on: updated_on,
        updated_on,
        tags: Vec::new(),
    }
}

pub fn form_file(name: &str) -> FormFile {
    FormFile {
        file_name: name.to_string(),
        content_type: Some("image/jpeg".to_string()),
        data: b"\xff\xd8\xff\xe0fake-jpeg".to_vec(),
    }
}

/// Fakes behind an [`AppState`], kept so tests can inspect them afterwards.
pub struct TestContext {
    pub galleries: Arc<MemoryGalleryStore>,
    pub news: Arc<MemoryNewsStore>,
    pub influencers: Arc<MemoryInfluencerStore>,
    pub users: Arc<MemoryUserStore>,
    pub uploader: Arc<MemoryUploader>,
    pub healthy: bool,
    pub config: AppConfig,
}

impl Default for TestContext {
    fn default() -> Self {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 4;
        config.security.jwt_secret = Some("test-secret".to_string());

        Self {
            galleries: Arc::new(MemoryGalleryStore::default()),
            news: Arc::new(MemoryNewsStore::default()),
            influencers: Arc::new(MemoryInfluencerStore::default()),
            users: Arc::new(MemoryUserStore::default()),
            uploader: Arc::new(MemoryUploader::default()),
            healthy: true,
            config,
        }
    }
}

impl TestContext {
    pub fn state(&self) -> AppState {
        AppState {
            config: Arc::new(self.config.clone()),
            galleries: self.galleries.clone(),
            news: self.news.clone(),
            influencers: self.influencers.clone(),
            users: self.users.clone(),
            media: MediaAdapter::new(self.uploader.clone(), self.config.media.directory.clone()),
            notifier: Arc::new(DisabledNotifier),
            health: Arc::new(StaticHealth(self.healthy)),
        }
    }
}
