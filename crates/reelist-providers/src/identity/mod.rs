pub mod provider;
pub mod rest;

pub use provider::{AuthOutcome, IdentityProvider, ProviderTokens, MIN_PASSWORD_LEN};
pub use rest::RestIdentityProvider;
