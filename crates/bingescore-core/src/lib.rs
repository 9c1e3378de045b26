pub mod aggregation;
pub mod chart;
pub mod episode_merge;
pub mod error;
pub mod outcome;

pub use aggregation::RatingsAggregator;
pub use chart::{season_chart_points, EpisodeChartPoint};
pub use episode_merge::merge_episode_ratings;
pub use error::AggregationError;
pub use outcome::Outcome;
