use crate::domain::Timestamp;

/// Returns true when a configured tag name already reads like a release tag.
///
/// Release tags are `v`/`V` followed by a digit (`v1.0`, `V2`). Such names
/// are created verbatim; a bare version like `1.2.3` lacks the prefix.
pub fn is_release_tag(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('v' | 'V'), Some(c)) if c.is_ascii_digit()
    )
}

/// Compute the tag actually created for a configured tag name.
///
/// Non-release names are suffixed with the run timestamp so that repeated
/// milestone runs never collide: `release` -> `release-20240101_120000`.
pub fn derive_tag_name(configured: &str, timestamp: &Timestamp) -> String {
    if is_release_tag(configured) {
        configured.to_string()
    } else {
        format!("{}-{}", configured, timestamp)
    }
}
