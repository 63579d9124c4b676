pub mod enrichment;
pub mod gallery_service;
pub mod notifier;

pub use enrichment::{enrich, MAX_JOINED_INFLUENCERS};
pub use gallery_service::{upload_gallery_images, UploadedImages, GALLERY_FOLDER};
pub use notifier::{announce, gallery_announcement, notifier_from_config, DisabledNotifier, Notifier, NotifyError, TelegramNotifier};
