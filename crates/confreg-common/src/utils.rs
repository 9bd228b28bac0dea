//! Validation helpers for identity and label strings
//!
//! Names, versions and label parts end up as segments of a flat storage key,
//! so the characters used as separators by the key layout are rejected here.

use std::sync::LazyLock;

/// A key segment: anything but the path separator
static SEGMENT_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("^[^/]+$").expect("Invalid regex pattern"));

/// A label key or value: no path, pair or list separators
static LABEL_PART_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("^[^/:;]+$").expect("Invalid regex pattern"));

/// Check that a name or version can be used as one key segment
///
/// `.` and `..` are rejected as well; URL paths would resolve them.
///
/// # Examples
///
/// ```
/// use confreg_common::is_valid_segment;
///
/// assert!(is_valid_segment("payments-api"));
/// assert!(is_valid_segment("v1.2:rc1"));
/// assert!(!is_valid_segment("invalid/path"));
/// assert!(!is_valid_segment("   "));
/// assert!(!is_valid_segment(".."));
/// ```
pub fn is_valid_segment(value: &str) -> bool {
    !value.trim().is_empty() && value != "." && value != ".." && SEGMENT_PATTERN.is_match(value)
}

/// Check that a label key or value can be embedded in a label digest
///
/// # Examples
///
/// ```
/// use confreg_common::is_valid_label_part;
///
/// assert!(is_valid_label_part("env"));
/// assert!(!is_valid_label_part("a:b"));
/// assert!(!is_valid_label_part("a;b"));
/// ```
pub fn is_valid_label_part(value: &str) -> bool {
    !value.trim().is_empty() && LABEL_PART_PATTERN.is_match(value)
}
