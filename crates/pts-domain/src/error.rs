use thiserror::Error;

/// Errors surfaced by store and crypto operations.
///
/// Everything here is a user-addressable condition (bad label, bad pattern,
/// wrong master password); callers map these onto user-error outcomes rather
/// than hard failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{label:?} already exists")]
    DuplicateLabel { label: String },
    #[error("{label:?} does not exist")]
    UnknownLabel { label: String },
    #[error("{label:?} does not exist in the encrypted store")]
    MissingEncryptedValue { label: String },
    #[error("{pattern:?} is an invalid regex expression")]
    InvalidPattern { pattern: String },
    #[error("unable to resolve pattern {pattern:?}")]
    UnresolvedPattern { pattern: String },
    #[error("pattern {pattern:?} matches multiple secrets")]
    AmbiguousPattern { pattern: String },
    #[error("unknown generation algorithm version {version}")]
    UnknownAlgorithm { version: u32 },
    #[error("secret length {requested} is outside the valid range 1..={max}")]
    InvalidLength { requested: usize, max: usize },
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("encryption failed")]
    Encrypt,
    #[error("decryption failed (wrong master password or corrupt store)")]
    Decrypt,
    #[error("malformed encrypted payload")]
    MalformedPayload,
    #[error("store is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the release gate's manifest inspection.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("manifest is not valid TOML: {0}")]
    Toml(#[from] toml_edit::TomlError),
    #[error("manifest does not declare a [package] version string")]
    MissingVersion,
}
