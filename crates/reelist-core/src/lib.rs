pub mod context;
pub mod fetch;
pub mod session;
pub mod watchlist;

pub use context::AppContext;
pub use fetch::KeyedFetcher;
pub use session::SessionManager;
pub use watchlist::WatchlistStore;
