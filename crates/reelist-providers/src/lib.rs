pub mod error;
pub mod identity;
pub mod tmdb;

pub use error::{AuthError, CatalogError};
pub use identity::{IdentityProvider, RestIdentityProvider, MIN_PASSWORD_LEN};
pub use tmdb::{CatalogClient, Category};
