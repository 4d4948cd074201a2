//! Filesystem-safe names for exported documents.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::RemoteEntry;

/// Runs of characters outside `a-z`, `0-9` and `À`..=`ỹ`.
///
/// Whitespace inside that range (U+1680) is rejected too, otherwise a slug
/// could start with it and be trimmed on a second pass.
static DISALLOWED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[^a-z0-9\x{00C0}-\x{1EF9}]|\s)+").expect("Invalid disallowed-run regex")
});

static HYPHEN_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("Invalid hyphen-run regex"));

/// Fallback token when nothing survives slugging.
pub const EMPTY_SLUG: &str = "doc";

/// Turn a display name into a lowercase, hyphen-separated token.
///
/// # Examples
///
/// ```
/// use drive_sync::slug::slugify;
///
/// assert_eq!(slugify("My Doc Title"), "my-doc-title");
/// assert_eq!(slugify("!!!"), "doc");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let replaced = DISALLOWED_REGEX.replace_all(&lowered, "-");
    let collapsed = HYPHEN_RUN_REGEX.replace_all(&replaced, "-");
    let slug = collapsed.trim_matches('-');

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Local file name for an exported entry: `<slug>__<id>.txt`.
///
/// The id suffix keeps names unique when display names collide after slugging.
pub fn export_file_name(entry: &RemoteEntry) -> String {
    format!("{}__{}.txt", slugify(entry.display_name()), entry.id)
}
