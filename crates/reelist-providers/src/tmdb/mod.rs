pub mod api;
pub mod client;

pub use api::Category;
pub use client::CatalogClient;
