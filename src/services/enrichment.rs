use tracing::debug;

use crate::database::models::{AuthorSummary, Enrichment, InfluencerSmall};
use crate::database::{parse_object_id, InfluencerStore, UserStore};

/// Most influencer records joined onto one parent document
pub const MAX_JOINED_INFLUENCERS: i64 = 20;

/// Best-effort decoration of a gallery or news item. Never fails: any
/// reference that can't be resolved is simply left out.
pub async fn enrich(
    influencers: &dyn InfluencerStore,
    users: &dyn UserStore,
    influencer_ids: &[String],
    author_id: &str,
) -> Enrichment {
    Enrichment {
        influencers_data: resolve_influencers(influencers, influencer_ids).await,
        author: resolve_author(users, author_id).await,
    }
}

/// `None` when there is nothing to resolve or the lookup failed.
pub async fn resolve_influencers(store: &dyn InfluencerStore, ids: &[String]) -> Option<Vec<InfluencerSmall>> {
    if ids.is_empty() {
        return None;
    }

    let object_ids: Vec<_> = ids.iter().filter_map(|id| parse_object_id(id).ok()).collect();

    match store.find_by_ids(&object_ids, MAX_JOINED_INFLUENCERS).await {
        Ok(found) => Some(found),
        Err(e) => {
            debug!("Skipping influencer join: {}", e);
            None
        }
    }
}

pub async fn resolve_author(store: &dyn UserStore, author_id: &str) -> Option<AuthorSummary> {
    if author_id.is_empty() {
        return None;
    }

    let id = match parse_object_id(author_id) {
        Ok(id) => id,
        Err(e) => {
            debug!("Skipping author join: {}", e);
            return None;
        }
    };

    match store.find_by_id(id).await {
        Ok(Some(user)) => Some(AuthorSummary::from(&user)),
        Ok(None) => {
            debug!("Author {} not found", author_id);
            None
        }
        Err(e) => {
            debug!("Skipping author join: {}", e);
            None
        }
    }
}
