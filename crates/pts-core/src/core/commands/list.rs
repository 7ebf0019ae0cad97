use anyhow::Result;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;
use crate::core::storage;

#[derive(Clone, Debug, Default)]
pub struct SecretListRequest {
    pub pattern: Option<String>,
}

/// Lists stored labels with kind, modification time, and salt. No master
/// password is required; nothing secret is derived or decrypted here.
///
/// # Errors
/// Returns an error only on unexpected internal failures.
pub fn secret_list(ctx: &CommandContext, request: &SecretListRequest) -> Result<ExecutionOutcome> {
    let (store, path) = match storage::load_store(ctx) {
        Ok(loaded) => loaded,
        Err(outcome) => return Ok(outcome),
    };
    let labels = match store.labels(request.pattern.as_deref()) {
        Ok(labels) => labels,
        Err(err) => return Ok(storage::outcome_from_store_error(&err)),
    };

    let rows: Vec<Value> = labels
        .iter()
        .filter_map(|label| store.secret(label).ok().map(|secret| (label, secret)))
        .map(|(label, secret)| {
            json!({
                "label": label,
                "kind": secret.kind_label(),
                "modified": secret
                    .modified()
                    .format(&Rfc3339)
                    .unwrap_or_default(),
                "salt": secret.salt(),
            })
        })
        .collect();

    let message = match (rows.len(), &request.pattern) {
        (0, Some(pattern)) => format!("no secrets match {pattern:?}"),
        (0, None) => "store is empty".to_owned(),
        (1, _) => "1 secret".to_owned(),
        (count, _) => format!("{count} secrets"),
    };

    Ok(ExecutionOutcome::success(
        message,
        json!({
            "store": path.display().to_string(),
            "secrets": rows,
        }),
    ))
}
