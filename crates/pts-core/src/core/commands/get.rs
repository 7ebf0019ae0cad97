use anyhow::Result;
use serde_json::json;

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::storage;

#[derive(Clone, Debug)]
pub struct SecretGetRequest {
    pub pattern: String,
}

/// Resolves a pattern to a single secret and produces its value.
///
/// The value is the outcome message, marked passthrough so the CLI prints it
/// bare and pipelines stay clean.
///
/// # Errors
/// Returns an error only on unexpected internal failures.
pub fn secret_get(ctx: &CommandContext, request: &SecretGetRequest) -> Result<ExecutionOutcome> {
    let (store, _path) = match storage::load_store(ctx) {
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

    match store.secret_value(&label, &key) {
        Ok(value) => Ok(ExecutionOutcome::success(
            value,
            json!({ "label": label, "passthrough": true }),
        )),
        Err(err) => Ok(storage::outcome_from_store_error(&err)),
    }
}
