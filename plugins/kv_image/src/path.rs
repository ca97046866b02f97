//! Resolving `<image_root>/<store>/<key>.<ext>`

use kvtools_store_plugin::{basename, sanitize_segment, strip_extension};
use std::path::{Path, PathBuf};

/// Extension used when none is given
pub const DEFAULT_EXT: &str = "png";

fn image_path(image_root: &Path, store_file_name: &str, key: &str, ext: &str) -> Option<PathBuf> {
    if store_file_name.trim().is_empty() || key.trim().is_empty() {
        return None;
    }

    let store_dir = sanitize_segment(strip_extension(basename(store_file_name)));
    let key = sanitize_segment(key);
    if store_dir.is_empty() || key.is_empty() {
        return None;
    }

    let ext = sanitize_segment(ext.trim().trim_start_matches('.'));
    let ext = if ext.is_empty() || ext.chars().all(|c| c == '_') {
        DEFAULT_EXT.to_string()
    } else {
        ext
    };

    Some(image_root.join(store_dir).join(format!("{}.{}", key, ext)))
}

/// Path of the image for `key` in the store `store_file_name`.
///
/// `store_file_name` may be a bare file name or a full path; only its
/// basename without extension is used. Both derived segments are sanitized,
/// so the result always stays inside `image_root`. Blank inputs give `""`.
///
/// # Example
///
/// ```
/// use kvtools_image_plugin::resolve_image_path;
/// use std::path::Path;
///
/// let path = resolve_image_path(Path::new("/img"), "/stores/voices.json", "Tom", "png");
/// assert_eq!(path, "/img/voices/Tom.png");
/// ```
pub fn resolve_image_path(image_root: &Path, store_file_name: &str, key: &str, ext: &str) -> String {
    image_path(image_root, store_file_name, key, ext)
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The resolved image path, but only if it names an existing regular file
pub fn find_image(image_root: &Path, store_file_name: &str, key: &str, ext: &str) -> Option<PathBuf> {
    image_path(image_root, store_file_name, key, ext)
        .filter(|path| path.is_file())
}
