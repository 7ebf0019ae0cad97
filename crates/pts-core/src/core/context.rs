use std::path::Path;

use anyhow::Result;

use crate::core::config::{Config, EnvSnapshot, GlobalOptions};
use crate::core::effects::{FileSystem, GitClient, SecretInput, SharedEffects};

pub struct CommandContext<'a> {
    pub global: &'a GlobalOptions,
    config: Config,
    effects: SharedEffects,
}

impl<'a> CommandContext<'a> {
    /// Creates a command context from the process environment.
    ///
    /// # Errors
    /// Returns an error if the store location cannot be resolved.
    pub fn new(global: &'a GlobalOptions, effects: SharedEffects) -> Result<Self> {
        let env = EnvSnapshot::capture();
        let config = Config::from_snapshot(&env, global.store.as_deref())?;
        Ok(Self {
            global,
            config,
            effects,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.config.store_path
    }

    pub(crate) fn master_from_env(&self) -> Option<&str> {
        self.config.master_env.as_deref()
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.effects.fs()
    }

    pub fn git(&self) -> &dyn GitClient {
        self.effects.git()
    }

    pub fn secrets(&self) -> &dyn SecretInput {
        self.effects.secrets()
    }
}
