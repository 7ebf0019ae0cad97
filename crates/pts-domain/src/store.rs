//! The store: configuration, labeled secrets, and the sealed blob.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::crypto::{self, MasterKey};
use crate::error::StoreError;
use crate::secret::{Algorithm, Secret};

/// Salted verifier for the master password. Only the derived hash is stored;
/// comparison is constant-time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Master {
    salt: String,
    hash: String,
}

impl Master {
    pub fn new(master: &str) -> Result<Self, StoreError> {
        let salt = crypto::random_bytes::<{ crypto::SALT_LEN }>();
        let hash = Self::digest(master, &salt)?;
        Ok(Self {
            salt: hex::encode(salt),
            hash: hex::encode(hash),
        })
    }

    pub fn verify(&self, master: &str) -> Result<bool, StoreError> {
        let salt = hex::decode(&self.salt).map_err(|_| StoreError::MalformedPayload)?;
        let stored = hex::decode(&self.hash).map_err(|_| StoreError::MalformedPayload)?;
        let candidate = Self::digest(master, &salt)?;
        Ok(crypto::ct_eq(&candidate, &stored))
    }

    fn digest(master: &str, salt: &[u8]) -> Result<[u8; 32], StoreError> {
        let mut out = [0u8; 32];
        crypto::derive(master.as_bytes(), salt, crypto::INFO_MASTER_V1, &mut out)?;
        Ok(out)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<Master>,
}

/// Input for [`Store::add`].
#[derive(Clone, Debug)]
pub enum SecretSpec {
    /// A site login; the salt is derived from the fields.
    Login {
        domain: String,
        username: String,
        iteration: Option<u32>,
        length: Option<usize>,
    },
    /// A generatable secret with an explicit salt.
    Raw {
        salt: String,
        length: Option<usize>,
    },
    /// A literal value, kept inside the sealed blob.
    Encrypted { value: String },
}

/// The serialized store. Secret order is insertion order; encrypted values
/// live in `secrets_encrypted` keyed by label, and that blob is absent while
/// no encrypted secrets exist.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub config: StoreConfig,
    #[serde(default)]
    secrets: IndexMap<String, Secret>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secrets_encrypted: Option<String>,
    #[serde(default = "current_version")]
    version: String,
    #[serde(with = "time::serde::rfc3339", default = "epoch")]
    modified: OffsetDateTime,
}

fn current_version() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}

fn epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

impl Store {
    pub fn new(owner: Option<String>, master: Option<Master>, now: OffsetDateTime) -> Self {
        Self {
            config: StoreConfig { owner, master },
            secrets: IndexMap::new(),
            secrets_encrypted: None,
            version: current_version(),
            modified: now,
        }
    }

    pub fn from_json(data: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The master key for this store, combining the configured owner with
    /// the given master password.
    pub fn master_key(&self, master: &str) -> MasterKey {
        MasterKey::new(self.config.owner.as_deref(), master)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn modified(&self) -> OffsetDateTime {
        self.modified
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.secrets.contains_key(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Secret)> {
        self.secrets.iter()
    }

    pub fn secret(&self, label: &str) -> Result<&Secret, StoreError> {
        self.secrets.get(label).ok_or_else(|| StoreError::UnknownLabel {
            label: label.to_owned(),
        })
    }

    /// Labels, optionally filtered by a regex pattern anchored at the start
    /// of the label.
    pub fn labels(&self, pattern: Option<&str>) -> Result<Vec<String>, StoreError> {
        let Some(pattern) = pattern else {
            return Ok(self.secrets.keys().cloned().collect());
        };
        let regex = Regex::new(pattern).map_err(|_| StoreError::InvalidPattern {
            pattern: pattern.to_owned(),
        })?;
        Ok(self
            .secrets
            .keys()
            .filter(|label| regex.find(label).is_some_and(|m| m.start() == 0))
            .cloned()
            .collect())
    }

    /// Resolves a pattern to a single label. An exact label wins outright;
    /// otherwise the pattern must match exactly one label.
    pub fn resolve(&self, pattern: &str) -> Result<String, StoreError> {
        if self.contains(pattern) {
            return Ok(pattern.to_owned());
        }

        let mut matches = self.labels(Some(pattern))?;
        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(StoreError::UnresolvedPattern {
                pattern: pattern.to_owned(),
            }),
            _ => Err(StoreError::AmbiguousPattern {
                pattern: pattern.to_owned(),
            }),
        }
    }

    pub fn add(
        &mut self,
        label: &str,
        spec: SecretSpec,
        key: &MasterKey,
        now: OffsetDateTime,
    ) -> Result<(), StoreError> {
        if self.contains(label) {
            return Err(StoreError::DuplicateLabel {
                label: label.to_owned(),
            });
        }

        let secret = match spec {
            SecretSpec::Login {
                domain,
                username,
                iteration,
                length,
            } => Secret::Login {
                domain,
                username,
                iteration,
                algorithm: Algorithm { version: 1, length },
                modified: now,
            },
            SecretSpec::Raw { salt, length } => Secret::Generatable {
                salt,
                algorithm: Algorithm { version: 1, length },
                modified: now,
            },
            SecretSpec::Encrypted { value } => {
                let mut values = self.open_blob(key)?;
                values.insert(label.to_owned(), value);
                self.seal_blob(values, key)?;
                Secret::Encrypted { modified: now }
            }
        };

        debug!(label, kind = secret.kind(), "adding secret");
        self.secrets.insert(label.to_owned(), secret);
        self.touch(now);
        Ok(())
    }

    /// The secret's value: derived for generatable kinds, decrypted for
    /// encrypted ones.
    pub fn secret_value(&self, label: &str, key: &MasterKey) -> Result<String, StoreError> {
        match self.secret(label)? {
            Secret::Encrypted { .. } => {
                self.open_blob(key)?
                    .shift_remove(label)
                    .ok_or_else(|| StoreError::MissingEncryptedValue {
                        label: label.to_owned(),
                    })
            }
            secret @ (Secret::Generatable { .. } | Secret::Login { .. }) => {
                let salt = secret.salt().unwrap_or_default();
                let algorithm = secret.algorithm().cloned().unwrap_or_default();
                crypto::generate(&salt, key, &algorithm)
            }
        }
    }

    pub fn remove(
        &mut self,
        label: &str,
        key: &MasterKey,
        now: OffsetDateTime,
    ) -> Result<Secret, StoreError> {
        let secret =
            self.secrets
                .shift_remove(label)
                .ok_or_else(|| StoreError::UnknownLabel {
                    label: label.to_owned(),
                })?;

        if matches!(secret, Secret::Encrypted { .. }) {
            let mut values = self.open_blob(key)?;
            values.shift_remove(label);
            self.seal_blob(values, key)?;
        }

        debug!(label, "removed secret");
        self.touch(now);
        Ok(secret)
    }

    pub fn rename(
        &mut self,
        label: &str,
        new_label: &str,
        key: &MasterKey,
        now: OffsetDateTime,
    ) -> Result<(), StoreError> {
        if !self.contains(label) {
            return Err(StoreError::UnknownLabel {
                label: label.to_owned(),
            });
        }
        if self.contains(new_label) {
            return Err(StoreError::DuplicateLabel {
                label: new_label.to_owned(),
            });
        }

        let Some(mut secret) = self.secrets.shift_remove(label) else {
            return Err(StoreError::UnknownLabel {
                label: label.to_owned(),
            });
        };

        if matches!(secret, Secret::Encrypted { .. }) {
            let mut values = self.open_blob(key)?;
            let value =
                values
                    .shift_remove(label)
                    .ok_or_else(|| StoreError::MissingEncryptedValue {
                        label: label.to_owned(),
                    })?;
            values.insert(new_label.to_owned(), value);
            self.seal_blob(values, key)?;
        }

        secret.touch(now);
        self.secrets.insert(new_label.to_owned(), secret);
        self.touch(now);
        Ok(())
    }

    fn open_blob(&self, key: &MasterKey) -> Result<IndexMap<String, String>, StoreError> {
        match &self.secrets_encrypted {
            None => Ok(IndexMap::new()),
            Some(blob) => {
                let plaintext = crypto::open(blob, key)?;
                Ok(serde_json::from_slice(&plaintext)?)
            }
        }
    }

    fn seal_blob(
        &mut self,
        values: IndexMap<String, String>,
        key: &MasterKey,
    ) -> Result<(), StoreError> {
        self.secrets_encrypted = if values.is_empty() {
            None
        } else {
            Some(crypto::seal(&serde_json::to_vec(&values)?, key)?)
        };
        Ok(())
    }

    fn touch(&mut self, now: OffsetDateTime) {
        self.modified = now;
    }
}
