use anyhow::Result;
use serde_json::json;
use time::OffsetDateTime;

use pts_domain::{Master, Store};

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::storage;

#[derive(Clone, Debug)]
pub struct StoreInitRequest {
    pub owner: Option<String>,
}

/// Creates a new store with an owner and a master password verifier.
///
/// # Errors
/// Returns an error only on unexpected internal failures; expected
/// conditions (existing store, missing master password) become outcomes.
pub fn store_init(ctx: &CommandContext, request: &StoreInitRequest) -> Result<ExecutionOutcome> {
    let path = ctx.store_path().to_path_buf();
    if ctx.fs().exists(&path) {
        return Ok(ExecutionOutcome::user_error(
            format!("a store already exists at {}", path.display()),
            json!({
                "store": path.display().to_string(),
                "hint": "Pass --store or set PTS_STORE to create a store elsewhere.",
            }),
        ));
    }

    let master = match new_master(ctx) {
        Ok(master) => master,
        Err(outcome) => return Ok(outcome),
    };
    let verifier = match Master::new(&master) {
        Ok(verifier) => verifier,
        Err(err) => return Ok(storage::outcome_from_store_error(&err)),
    };

    let store = Store::new(
        request.owner.clone(),
        Some(verifier),
        OffsetDateTime::now_utc(),
    );
    if let Err(outcome) = storage::save_store(ctx, &store, &path) {
        return Ok(outcome);
    }

    let mut details = json!({ "store": path.display().to_string() });
    if let Some(owner) = &request.owner {
        details["owner"] = json!(owner);
    }
    Ok(ExecutionOutcome::success(
        format!("initialized store at {}", path.display()),
        details,
    ))
}

fn new_master(ctx: &CommandContext) -> Result<String, ExecutionOutcome> {
    if let Some(master) = ctx.master_from_env() {
        if master.is_empty() {
            return Err(ExecutionOutcome::user_error(
                "PTS_MASTER is set but empty",
                json!({}),
            ));
        }
        return Ok(master.to_owned());
    }

    let first = read_secret(ctx, "Master password: ")?;
    let confirm = read_secret(ctx, "Confirm master password: ")?;
    if first != confirm {
        return Err(ExecutionOutcome::user_error(
            "master passwords do not match",
            json!({}),
        ));
    }
    if first.is_empty() {
        return Err(ExecutionOutcome::user_error(
            "master password must not be empty",
            json!({}),
        ));
    }
    Ok(first)
}

fn read_secret(ctx: &CommandContext, prompt: &str) -> Result<String, ExecutionOutcome> {
    match ctx.secrets().read_secret(prompt) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(ExecutionOutcome::user_error(
            "no master password available",
            json!({ "hint": "Set PTS_MASTER or run from an interactive terminal." }),
        )),
        Err(err) => Err(ExecutionOutcome::failure(
            format!("unable to read master password: {err}"),
            json!({}),
        )),
    }
}
