use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub(crate) const STORE_ENV: &str = "PTS_STORE";
pub(crate) const MASTER_ENV: &str = "PTS_MASTER";
const DEFAULT_STORE_FILE: &str = ".passthesalt";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
    pub json: bool,
    pub store: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug)]
pub struct Config {
    pub(crate) store_path: PathBuf,
    pub(crate) master_env: Option<String>,
}

impl Config {
    /// Resolves configuration from the environment. The store path comes
    /// from the CLI override, then `PTS_STORE`, then `~/.passthesalt`.
    pub(crate) fn from_snapshot(
        snapshot: &EnvSnapshot,
        override_path: Option<&str>,
    ) -> Result<Self> {
        let store_path = if let Some(path) = override_path {
            PathBuf::from(path)
        } else if let Some(path) = snapshot.var(STORE_ENV) {
            PathBuf::from(path)
        } else {
            dirs_next::home_dir()
                .ok_or_else(|| anyhow!("unable to determine a home directory; set {STORE_ENV}"))?
                .join(DEFAULT_STORE_FILE)
        };

        Ok(Self {
            store_path,
            master_env: snapshot.var(MASTER_ENV).map(ToOwned::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_beats_the_environment() {
        let snapshot = EnvSnapshot::testing(&[(STORE_ENV, "/env/store")]);
        let config = Config::from_snapshot(&snapshot, Some("/cli/store")).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/cli/store"));
    }

    #[test]
    fn env_var_sets_the_store_path() {
        let snapshot = EnvSnapshot::testing(&[(STORE_ENV, "/env/store")]);
        let config = Config::from_snapshot(&snapshot, None).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/env/store"));
    }

    #[test]
    fn master_password_comes_from_the_environment() {
        let snapshot = EnvSnapshot::testing(&[(STORE_ENV, "/env/store"), (MASTER_ENV, "hunter2")]);
        let config = Config::from_snapshot(&snapshot, None).unwrap();
        assert_eq!(config.master_env.as_deref(), Some("hunter2"));
    }
}
