pub mod traits;
pub mod factory;
pub mod http;
pub mod tmdb;
pub mod omdb;
pub mod trakt;
pub mod error;

pub use traits::{CatalogProvider, RatingsProvider, SocialProvider};
pub use factory::ProviderSet;
pub use error::SourceError;
pub use tmdb::TmdbClient;
pub use omdb::OmdbClient;
pub use trakt::TraktClient;
