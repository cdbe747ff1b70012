pub mod config;
pub mod credentials;
pub mod kv;
pub mod paths;

pub use config::{CatalogConfig, Config, IdentityConfig};
pub use credentials::CredentialStore;
pub use kv::KvStore;
pub use paths::PathManager;
