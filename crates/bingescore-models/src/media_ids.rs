use serde::{Deserialize, Serialize};
use crate::MediaType;

/// Identity bundle for one title across all three providers
///
/// The catalog (TMDB) ID is always known because every aggregation starts from it.
/// The IMDb ID comes from the catalog's external-ID mapping and the Trakt ID is
/// filled in once the social provider resolves it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedMediaId {
    pub media_type: MediaType,
    pub tmdb_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trakt_id: Option<String>,
}

impl UnifiedMediaId {
    pub fn new(media_type: MediaType, tmdb_id: u64) -> Self {
        Self {
            media_type,
            tmdb_id,
            imdb_id: None,
            trakt_id: None,
        }
    }

    pub fn with_imdb_id(mut self, imdb_id: Option<String>) -> Self {
        self.imdb_id = imdb_id;
        self
    }

    /// Record the social provider's identifier once it has been resolved
    pub fn set_trakt_id(&mut self, trakt_id: String) {
        if self.trakt_id.is_none() {
            self.trakt_id = Some(trakt_id);
        }
    }

    /// Check if all ID fields are empty
    pub fn is_empty(&self) -> bool {
        self.tmdb_id == 0 && self.imdb_id.is_none() && self.trakt_id.is_none()
    }
}
