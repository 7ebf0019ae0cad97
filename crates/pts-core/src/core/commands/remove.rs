use anyhow::Result;
use serde_json::json;
use time::OffsetDateTime;

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::storage;

#[derive(Clone, Debug)]
pub struct SecretRemoveRequest {
    pub pattern: String,
}

/// Removes the secret a pattern resolves to, keeping the encrypted blob in
/// sync when the secret was an encrypted one.
///
/// # Errors
/// Returns an error only on unexpected internal failures.
pub fn secret_remove(
    ctx: &CommandContext,
    request: &SecretRemoveRequest,
) -> Result<ExecutionOutcome> {
    let (mut store, path) = match storage::load_store(ctx) {
        Ok(loaded) => loaded,
        Err(outcome) => return Ok(outcome),
    };
    let label = match store.resolve(&request.pattern) {
        Ok(label) => label,
        Err(err) => return Ok(storage::outcome_from_store_error(&err)),
    };
    let key = match storage::unlock(ctx, &store) {
        Ok(key) => key,
        Err(outcome) => return Ok(outcome),
    };

    let secret = match store.remove(&label, &key, OffsetDateTime::now_utc()) {
        Ok(secret) => secret,
        Err(err) => return Ok(storage::outcome_from_store_error(&err)),
    };
    if let Err(outcome) = storage::save_store(ctx, &store, &path) {
        return Ok(outcome);
    }

    Ok(ExecutionOutcome::success(
        format!("removed {label}"),
        json!({ "label": label, "kind": secret.kind_label() }),
    ))
}
