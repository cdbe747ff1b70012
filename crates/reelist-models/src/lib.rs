pub mod catalog;
pub mod scope;
pub mod session;
pub mod sort;
pub mod watchlist;

pub use catalog::{CastMember, CatalogItem, Genre, MovieDetails, VideoClip};
pub use scope::Scope;
pub use session::Session;
pub use sort::SortBy;
pub use watchlist::{normalize_id, WatchlistEntry};
