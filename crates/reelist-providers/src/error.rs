use thiserror::Error;

/// Failures surfaced by the identity provider.
///
/// Authentication failures never mutate session state; callers show them
/// inline and leave the current session as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error("An account already exists for this email")]
    EmailInUse,
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced by the catalog API.
///
/// A failed lookup degrades to an empty shelf or a "not found" display
/// state; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Title not found")]
    NotFound,
    #[error("Catalog request failed ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Catalog service unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Unavailable(e.to_string())
    }
}
