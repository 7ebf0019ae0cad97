use anyhow::Result;
use serde_json::json;
use time::OffsetDateTime;

use pts_domain::SecretSpec;

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::storage;

#[derive(Clone, Debug)]
pub struct SecretAddRequest {
    pub label: String,
    pub kind: AddKind,
}

#[derive(Clone, Debug)]
pub enum AddKind {
    Login {
        domain: String,
        username: String,
        iteration: Option<u32>,
        length: Option<usize>,
    },
    Raw {
        salt: String,
        length: Option<usize>,
    },
    /// A literal value for the encrypted blob; prompted for when absent.
    Encrypted { value: Option<String> },
}

/// Adds a secret under a new label.
///
/// # Errors
/// Returns an error only on unexpected internal failures.
pub fn secret_add(ctx: &CommandContext, request: &SecretAddRequest) -> Result<ExecutionOutcome> {
    let (mut store, path) = match storage::load_store(ctx) {
        Ok(loaded) => loaded,
        Err(outcome) => return Ok(outcome),
    };
    let key = match storage::unlock(ctx, &store) {
        Ok(key) => key,
        Err(outcome) => return Ok(outcome),
    };

    let spec = match &request.kind {
        AddKind::Login {
            domain,
            username,
            iteration,
            length,
        } => SecretSpec::Login {
            domain: domain.clone(),
            username: username.clone(),
            iteration: *iteration,
            length: *length,
        },
        AddKind::Raw { salt, length } => SecretSpec::Raw {
            salt: salt.clone(),
            length: *length,
        },
        AddKind::Encrypted { value } => {
            let value = match value {
                Some(value) => value.clone(),
                None => match prompt_value(ctx) {
                    Ok(value) => value,
                    Err(outcome) => return Ok(outcome),
                },
            };
            SecretSpec::Encrypted { value }
        }
    };

    let kind = match &spec {
        SecretSpec::Login { .. } => "generatable.login",
        SecretSpec::Raw { .. } => "generatable",
        SecretSpec::Encrypted { .. } => "encrypted",
    };

    if let Err(err) = store.add(&request.label, spec, &key, OffsetDateTime::now_utc()) {
        return Ok(storage::outcome_from_store_error(&err));
    }
    if let Err(outcome) = storage::save_store(ctx, &store, &path) {
        return Ok(outcome);
    }

    Ok(ExecutionOutcome::success(
        format!("added {}", request.label),
        json!({ "label": request.label, "kind": kind }),
    ))
}

fn prompt_value(ctx: &CommandContext) -> Result<String, ExecutionOutcome> {
    match ctx.secrets().read_secret("Secret value: ") {
        Ok(Some(value)) if !value.is_empty() => Ok(value),
        Ok(Some(_)) => Err(ExecutionOutcome::user_error(
            "secret value must not be empty",
            json!({}),
        )),
        Ok(None) => Err(ExecutionOutcome::user_error(
            "no secret value provided",
            json!({ "hint": "Pass the value on the command line or run interactively." }),
        )),
        Err(err) => Err(ExecutionOutcome::failure(
            format!("unable to read secret value: {err}"),
            json!({}),
        )),
    }
}
