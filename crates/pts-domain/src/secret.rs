//! Secret kinds and their serialized shape.
//!
//! Secrets serialize with a `kind` tag (`encrypted`, `generatable`,
//! `generatable.login`) so stores written by older versions keep loading as
//! long as the kind is known.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How a generatable secret's value is derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Algorithm {
    #[serde(default = "default_algorithm_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self {
            version: default_algorithm_version(),
            length: None,
        }
    }
}

fn default_algorithm_version() -> u32 {
    1
}

/// A labeled secret. Generatable kinds never store a value; encrypted ones
/// keep their value inside the store's sealed blob, keyed by label.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Secret {
    #[serde(rename = "encrypted")]
    Encrypted {
        #[serde(with = "time::serde::rfc3339")]
        modified: OffsetDateTime,
    },
    #[serde(rename = "generatable")]
    Generatable {
        salt: String,
        #[serde(default)]
        algorithm: Algorithm,
        #[serde(with = "time::serde::rfc3339")]
        modified: OffsetDateTime,
    },
    #[serde(rename = "generatable.login")]
    Login {
        domain: String,
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        iteration: Option<u32>,
        #[serde(default)]
        algorithm: Algorithm,
        #[serde(with = "time::serde::rfc3339")]
        modified: OffsetDateTime,
    },
}

impl Secret {
    /// The full kind tag, as serialized.
    pub fn kind(&self) -> &'static str {
        match self {
            Secret::Encrypted { .. } => "encrypted",
            Secret::Generatable { .. } => "generatable",
            Secret::Login { .. } => "generatable.login",
        }
    }

    /// The short kind name used in tabular listings.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Secret::Encrypted { .. } => "encrypted",
            Secret::Generatable { .. } | Secret::Login { .. } => "generatable",
        }
    }

    /// The effective generation salt. Logins derive theirs from
    /// `domain|username|iteration`; encrypted secrets have none.
    pub fn salt(&self) -> Option<String> {
        match self {
            Secret::Encrypted { .. } => None,
            Secret::Generatable { salt, .. } => Some(salt.clone()),
            Secret::Login {
                domain,
                username,
                iteration,
                ..
            } => Some(format!("{domain}|{username}|{}", iteration.unwrap_or(0))),
        }
    }

    pub fn algorithm(&self) -> Option<&Algorithm> {
        match self {
            Secret::Encrypted { .. } => None,
            Secret::Generatable { algorithm, .. } | Secret::Login { algorithm, .. } => {
                Some(algorithm)
            }
        }
    }

    pub fn modified(&self) -> OffsetDateTime {
        match self {
            Secret::Encrypted { modified }
            | Secret::Generatable { modified, .. }
            | Secret::Login { modified, .. } => *modified,
        }
    }

    pub fn touch(&mut self, now: OffsetDateTime) {
        match self {
            Secret::Encrypted { modified }
            | Secret::Generatable { modified, .. }
            | Secret::Login { modified, .. } => *modified = now,
        }
    }
}
