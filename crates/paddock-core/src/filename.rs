//! # Upload Filenames
//!
//! Derives a name that is safe to use inside the upload directory from
//! whatever filename the browser sent.
//!
//! ## Pipeline
//! ```text
//! "../../My Horse (1).JPG"
//!      │ NFKD, then drop non-ASCII ("ü" → "u")
//!      │ path separators → spaces
//!      ▼
//! ".. .. My Horse (1).JPG"
//!      │ whitespace runs → "_"
//!      ▼
//! ".._.._My_Horse_(1).JPG"
//!      │ keep [A-Za-z0-9_.-]
//!      │ trim leading/trailing "." and "_"
//!      ▼
//! "My_Horse_1.JPG"
//! ```
//!
//! The result can be empty (`"../.."`, `"日本"`). Callers decide what an empty
//! name means.
//!
//! Two different client names can map to the same safe name. The upload
//! handler writes over the older file in that case.

use unicode_normalization::UnicodeNormalization;

/// Names Windows reserves for devices. A file called `CON.jpg` is prefixed
/// with `_` so the directory stays portable.
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Returns a filesystem-safe version of `filename`.
///
/// ## Example
/// ```rust
/// use paddock_core::filename::secure_filename;
///
/// assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
/// assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
/// assert_eq!(secure_filename("CON.jpg"), "_CON.jpg");
/// ```
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    if is_device_name(trimmed) {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn is_device_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let stem = name.split('.').next().unwrap_or_default().to_ascii_uppercase();
    WINDOWS_DEVICE_NAMES.contains(&stem.as_str())
}

// =============================================================================
// Unit Tests
// =============================================================================
