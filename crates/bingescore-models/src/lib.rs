pub mod aggregated;
pub mod episode;
pub mod media;
pub mod media_ids;
pub mod rating;
pub mod validation;

pub use aggregated::AggregatedRatings;
pub use episode::{EpisodeRatingEntry, EpisodesBySeason};
pub use media::{ExternalIds, MediaDetails, MediaType, SearchResult};
pub use media_ids::UnifiedMediaId;
pub use rating::{OverallRating, OverallRatings, RatingSource};
pub use validation::{is_valid_imdb_id, normalize_score, release_year, ValidationError};
