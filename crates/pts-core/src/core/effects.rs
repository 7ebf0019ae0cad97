use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use atty::Stream;

/// Side-effect seams for commands. Tests substitute their own
/// implementations; production code uses [`SystemEffects`].
pub trait Effects: Send + Sync {
    fn fs(&self) -> &dyn FileSystem;
    fn git(&self) -> &dyn GitClient;
    fn secrets(&self) -> &dyn SecretInput;
}

pub type SharedEffects = Arc<dyn Effects>;

pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

pub trait GitClient: Send + Sync {
    /// The tag pointing exactly at HEAD, if any. `None` when the commit is
    /// untagged or git is unavailable.
    fn exact_tag(&self, root: &Path) -> Result<Option<String>>;
}

pub trait SecretInput: Send + Sync {
    /// Prompts for a secret on the controlling terminal. `None` when no
    /// interactive terminal is attached.
    fn read_secret(&self, prompt: &str) -> Result<Option<String>>;
}

#[derive(Default)]
pub struct SystemEffects {
    fs: SystemFileSystem,
    git: SystemGit,
    secrets: SystemSecretInput,
}

impl SystemEffects {
    #[must_use]
    pub fn shared() -> SharedEffects {
        Arc::new(Self::default())
    }
}

impl Effects for SystemEffects {
    fn fs(&self) -> &dyn FileSystem {
        &self.fs
    }

    fn git(&self) -> &dyn GitClient {
        &self.git
    }

    fn secrets(&self) -> &dyn SecretInput {
        &self.secrets
    }
}

#[derive(Default)]
struct SystemFileSystem;

impl FileSystem for SystemFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("creating {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[derive(Default)]
struct SystemGit;

impl GitClient for SystemGit {
    fn exact_tag(&self, root: &Path) -> Result<Option<String>> {
        let output = std::process::Command::new("git")
            .args(["describe", "--tags", "--exact-match", "HEAD"])
            .current_dir(root)
            .output();
        match output {
            Ok(out) if out.status.success() => {
                let tag = String::from_utf8_lossy(&out.stdout).trim().to_string();
                Ok((!tag.is_empty()).then_some(tag))
            }
            Ok(_) | Err(_) => Ok(None),
        }
    }
}

#[derive(Default)]
struct SystemSecretInput;

impl SecretInput for SystemSecretInput {
    fn read_secret(&self, prompt: &str) -> Result<Option<String>> {
        if !atty::is(Stream::Stdin) {
            return Ok(None);
        }
        let mut stderr = io::stderr();
        stderr.write_all(prompt.as_bytes()).context("writing prompt")?;
        stderr.flush().context("flushing prompt")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("reading master password")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
