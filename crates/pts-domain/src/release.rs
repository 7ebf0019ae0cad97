//! Tag-gated release checks.
//!
//! A release may proceed only when the tag on the current commit names
//! exactly the version declared in the package manifest. Tags conventionally
//! carry a leading `v` (`v1.2.3`); the comparison strips one before the
//! exact string match.

use toml_edit::{DocumentMut, Item};

use crate::error::ReleaseError;

/// Reads the literal `package.version` string from a Cargo manifest.
pub fn manifest_version(contents: &str) -> Result<String, ReleaseError> {
    let doc: DocumentMut = contents.parse()?;
    doc.get("package")
        .and_then(Item::as_table)
        .and_then(|package| package.get("version"))
        .and_then(Item::as_str)
        .map(ToOwned::to_owned)
        .ok_or(ReleaseError::MissingVersion)
}

/// Whether a tag names the given version. The match is exact string
/// equality after stripping a single leading `v` from the tag.
pub fn tag_matches(tag: &str, version: &str) -> bool {
    let suffix = tag.strip_prefix('v').unwrap_or(tag);
    suffix == version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_read_from_the_package_table() {
        let manifest = "[package]\nname = \"demo\"\nversion = \"1.2.3\"\n";
        assert_eq!(manifest_version(manifest).unwrap(), "1.2.3");
    }

    #[test]
    fn missing_version_is_an_error() {
        assert!(matches!(
            manifest_version("[package]\nname = \"demo\"\n"),
            Err(ReleaseError::MissingVersion)
        ));
        assert!(matches!(
            manifest_version("[dependencies]\n"),
            Err(ReleaseError::MissingVersion)
        ));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            manifest_version("not toml ["),
            Err(ReleaseError::Toml(_))
        ));
    }

    #[test]
    fn tags_match_exactly_with_an_optional_v_prefix() {
        assert!(tag_matches("1.2.3", "1.2.3"));
        assert!(tag_matches("v1.2.3", "1.2.3"));
        assert!(!tag_matches("v1.2.4", "1.2.3"));
        assert!(!tag_matches("1.2.3-rc1", "1.2.3"));
        assert!(!tag_matches("vv1.2.3", "1.2.3"));
        assert!(!tag_matches("", "1.2.3"));
    }
}
