//! Where stores, images and the registry index live

use std::path::PathBuf;

/// Directory name of the store root when resolved from the working directory
pub const STORE_DIR_NAME: &str = "custom_kv_stores";

/// Subdirectory of the store root holding per-store image folders
pub const IMAGES_DIR_NAME: &str = "images";

/// File name of the registry index read by the front-end dropdown
pub const INDEX_FILE_NAME: &str = "kv_registry.json";

/// Fixed locations used by the registry and image nodes
///
/// Store files live directly in `base_dir`. Images live under
/// `images_root/<store>/<key>.<ext>`. The index is kept in a hidden
/// subdirectory so it never shows up as a store itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KvPaths {
    pub base_dir: PathBuf,
    pub images_root: PathBuf,
    pub index_path: PathBuf,
}

impl KvPaths {
    /// Derive all locations from a store root
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            images_root: base_dir.join(IMAGES_DIR_NAME),
            index_path: base_dir.join(".kvtools").join(INDEX_FILE_NAME),
            base_dir,
        }
    }

    /// Store root at `<working dir>/custom_kv_stores`, the layout the host expects
    pub fn from_working_dir() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(cwd.join(STORE_DIR_NAME))
    }
}
