use anyhow::Result;
use serde_json::json;
use time::OffsetDateTime;

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::storage;

#[derive(Clone, Debug)]
pub struct SecretMoveRequest {
    pub pattern: String,
    pub new_label: String,
}

/// Renames a secret. The source may be a pattern; the target must be a new,
/// unused label.
///
/// # Errors
/// Returns an error only on unexpected internal failures.
pub fn secret_move(ctx: &CommandContext, request: &SecretMoveRequest) -> Result<ExecutionOutcome> {
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

    if let Err(err) = store.rename(&label, &request.new_label, &key, OffsetDateTime::now_utc()) {
        return Ok(storage::outcome_from_store_error(&err));
    }
    if let Err(outcome) = storage::save_store(ctx, &store, &path) {
        return Ok(outcome);
    }

    Ok(ExecutionOutcome::success(
        format!("renamed {label} to {}", request.new_label),
        json!({ "label": label, "new_label": request.new_label }),
    ))
}
