use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use pts_domain::{manifest_version, tag_matches};

use crate::core::context::CommandContext;
use crate::core::outcome::ExecutionOutcome;

#[derive(Clone, Debug, Default)]
pub struct ReleaseRequest {
    /// Tag to check; the exact tag at HEAD is used when absent.
    pub tag: Option<String>,
    /// Manifest to read the version from; defaults to `./Cargo.toml`.
    pub manifest: Option<PathBuf>,
}

/// Gates a release on the tag naming exactly the declared package version.
///
/// The check runs before anything a release pipeline would do next: on any
/// mismatch it reports a user error and nothing further should proceed.
///
/// # Errors
/// Returns an error only on unexpected internal failures.
pub fn release_check(ctx: &CommandContext, request: &ReleaseRequest) -> Result<ExecutionOutcome> {
    let manifest_path = request
        .manifest
        .clone()
        .unwrap_or_else(|| PathBuf::from("Cargo.toml"));

    let contents = match ctx.fs().read_to_string(&manifest_path) {
        Ok(contents) => contents,
        Err(err) => {
            return Ok(ExecutionOutcome::user_error(
                format!("unable to read {}: {err}", manifest_path.display()),
                json!({
                    "manifest": manifest_path.display().to_string(),
                    "hint": "Pass --manifest to point at the package manifest.",
                }),
            ))
        }
    };
    let version = match manifest_version(&contents) {
        Ok(version) => version,
        Err(err) => {
            return Ok(ExecutionOutcome::user_error(
                err.to_string(),
                json!({ "manifest": manifest_path.display().to_string() }),
            ))
        }
    };

    let tag = match &request.tag {
        Some(tag) => tag.clone(),
        None => {
            let root = manifest_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            match ctx.git().exact_tag(root)? {
                Some(tag) => tag,
                None => {
                    return Ok(ExecutionOutcome::user_error(
                        "no tag points at the current commit",
                        json!({
                            "version": version,
                            "hint": "Tag the release commit (git tag vX.Y.Z) or pass --tag.",
                        }),
                    ))
                }
            }
        }
    };

    debug!(tag, version, "checking release tag");
    let details = json!({
        "tag": tag,
        "version": version,
        "manifest": manifest_path.display().to_string(),
    });

    if tag_matches(&tag, &version) {
        Ok(ExecutionOutcome::success(
            format!("tag {tag} matches version {version}"),
            details,
        ))
    } else {
        let mut details = details;
        details["hint"] = json!(
            "The tag must equal the manifest version; a single leading 'v' on the tag is allowed."
        );
        Ok(ExecutionOutcome::user_error(
            format!("tag {tag} does not match version {version}"),
            details,
        ))
    }
}
