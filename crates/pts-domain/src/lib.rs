#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod crypto;
pub mod error;
pub mod release;
pub mod secret;
pub mod store;

pub use crypto::{generate, open, seal, MasterKey, DEFAULT_SECRET_LENGTH};
pub use error::{ReleaseError, StoreError};
pub use release::{manifest_version, tag_matches};
pub use secret::{Algorithm, Secret};
pub use store::{Master, SecretSpec, Store, StoreConfig};
