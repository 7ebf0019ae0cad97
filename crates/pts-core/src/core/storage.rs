//! Loading, unlocking, and saving the store file.
//!
//! Helpers return `Result<T, ExecutionOutcome>` so commands can early-return
//! a finished outcome for any recoverable condition and keep `anyhow` errors
//! for the genuinely unexpected.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::debug;

use pts_domain::{MasterKey, Store, StoreError};

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;

const MAX_MASTER_ATTEMPTS: u32 = 3;

pub(crate) fn load_store(ctx: &CommandContext) -> Result<(Store, PathBuf), ExecutionOutcome> {
    let path = ctx.store_path().to_path_buf();
    if !ctx.fs().exists(&path) {
        return Err(ExecutionOutcome::user_error(
            format!("no store found at {}", path.display()),
            json!({
                "store": path.display().to_string(),
                "hint": "Run `pts init` to create a store, or point --store/PTS_STORE at one.",
            }),
        ));
    }

    let contents = ctx.fs().read_to_string(&path).map_err(|err| {
        ExecutionOutcome::failure(
            format!("unable to read store at {}: {err}", path.display()),
            json!({ "store": path.display().to_string() }),
        )
    })?;
    let store = Store::from_json(&contents).map_err(|err| {
        ExecutionOutcome::failure(
            format!("store at {} is not readable: {err}", path.display()),
            json!({ "store": path.display().to_string() }),
        )
    })?;

    debug!(store = %path.display(), secrets = store.len(), "loaded store");
    Ok((store, path))
}

pub(crate) fn save_store(
    ctx: &CommandContext,
    store: &Store,
    path: &Path,
) -> Result<(), ExecutionOutcome> {
    let contents = store
        .to_json()
        .map_err(|err| outcome_from_store_error(&err))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ctx.fs().create_dir_all(parent).map_err(|err| {
            ExecutionOutcome::failure(
                format!("unable to create {}: {err}", parent.display()),
                json!({ "store": path.display().to_string() }),
            )
        })?;
    }
    ctx.fs().write(path, contents.as_bytes()).map_err(|err| {
        ExecutionOutcome::failure(
            format!("unable to write store at {}: {err}", path.display()),
            json!({ "store": path.display().to_string() }),
        )
    })?;
    debug!(store = %path.display(), "saved store");
    Ok(())
}

/// Acquires and verifies the master password, returning the combined master
/// key. `PTS_MASTER` wins; otherwise the terminal is prompted, with retries.
pub(crate) fn unlock(ctx: &CommandContext, store: &Store) -> Result<MasterKey, ExecutionOutcome> {
    if let Some(master) = ctx.master_from_env() {
        return if accepts(store, master)? {
            Ok(store.master_key(master))
        } else {
            Err(wrong_master())
        };
    }

    for attempt in 1..=MAX_MASTER_ATTEMPTS {
        let prompt = if attempt == 1 {
            "Master password: ".to_owned()
        } else {
            format!("Master password (attempt {attempt}/{MAX_MASTER_ATTEMPTS}): ")
        };
        match ctx.secrets().read_secret(&prompt) {
            Ok(Some(master)) => {
                if accepts(store, &master)? {
                    return Ok(store.master_key(&master));
                }
            }
            Ok(None) => return Err(no_master_available()),
            Err(err) => {
                return Err(ExecutionOutcome::failure(
                    format!("unable to read master password: {err}"),
                    json!({}),
                ))
            }
        }
    }
    Err(wrong_master())
}

fn accepts(store: &Store, master: &str) -> Result<bool, ExecutionOutcome> {
    match &store.config.master {
        Some(verifier) => verifier
            .verify(master)
            .map_err(|err| outcome_from_store_error(&err)),
        // Stores written before a verifier existed take any password.
        None => Ok(true),
    }
}

fn wrong_master() -> ExecutionOutcome {
    ExecutionOutcome::user_error(
        "master password is incorrect",
        json!({ "hint": "Check PTS_MASTER, or run interactively to retype it." }),
    )
}

fn no_master_available() -> ExecutionOutcome {
    ExecutionOutcome::user_error(
        "no master password available",
        json!({ "hint": "Set PTS_MASTER or run from an interactive terminal." }),
    )
}

/// Maps a domain error onto the outcome envelope. Label and pattern problems
/// are user errors with a hint where one helps; internal crypto or
/// serialization trouble is a failure.
pub(crate) fn outcome_from_store_error(err: &StoreError) -> ExecutionOutcome {
    let hint = match err {
        StoreError::AmbiguousPattern { .. } => {
            Some("Use a longer pattern or the exact label.")
        }
        StoreError::UnresolvedPattern { .. } | StoreError::UnknownLabel { .. } => {
            Some("Run `pts ls` to see the stored labels.")
        }
        StoreError::Decrypt => {
            Some("Encrypted values only open with the master password that sealed them.")
        }
        _ => None,
    };

    match err {
        StoreError::KeyDerivation | StoreError::Encrypt | StoreError::Serialization(_) => {
            ExecutionOutcome::failure(err.to_string(), json!({}))
        }
        _ => {
            let mut details = json!({ "error": err.to_string() });
            if let Some(hint) = hint {
                details["hint"] = json!(hint);
            }
            ExecutionOutcome::user_error(err.to_string(), details)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GlobalOptions;
    use crate::core::effects::SystemEffects;
    use crate::core::outcome::CommandStatus;
    use pts_domain::Master;
    use time::OffsetDateTime;

    fn global_for(path: &Path) -> GlobalOptions {
        GlobalOptions {
            store: Some(path.display().to_string()),
            ..GlobalOptions::default()
        }
    }

    #[test]
    fn store_round_trips_through_the_filesystem() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("store.json");
        let global = global_for(&path);
        let ctx = CommandContext::new(&global, SystemEffects::shared()).unwrap();

        let master = Master::new("hunter2").unwrap();
        let store = Store::new(
            Some("alice".into()),
            Some(master),
            OffsetDateTime::UNIX_EPOCH,
        );
        save_store(&ctx, &store, &path).unwrap();

        let (loaded, loaded_path) = load_store(&ctx).unwrap();
        assert_eq!(loaded_path, path);
        assert_eq!(loaded.config.owner.as_deref(), Some("alice"));
    }

    #[test]
    fn missing_store_is_a_user_error_with_a_hint() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("absent.json");
        let global = global_for(&path);
        let ctx = CommandContext::new(&global, SystemEffects::shared()).unwrap();

        let outcome = load_store(&ctx).unwrap_err();
        assert_eq!(outcome.status, CommandStatus::UserError);
        assert!(outcome.details["hint"]
            .as_str()
            .is_some_and(|hint| hint.contains("pts init")));
    }

    #[test]
    fn unreadable_store_is_a_failure() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();
        let global = global_for(&path);
        let ctx = CommandContext::new(&global, SystemEffects::shared()).unwrap();

        let outcome = load_store(&ctx).unwrap_err();
        assert_eq!(outcome.status, CommandStatus::Failure);
    }
}
