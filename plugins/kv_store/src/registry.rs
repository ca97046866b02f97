//! Named store files under the registry root

use crate::error::{KvError, Result};
use crate::format::{StoreFormat, parse};
use crate::names::{basename, is_json_name};
use crate::store::{Store, value_to_string};
use std::path::{Path, PathBuf};

/// Entry offered when the registry holds no store files
pub const NONE_SENTINEL: &str = "(none)";

/// List the `*.json` files directly under `root`, sorted by name.
///
/// The directory is created if missing. Never returns an empty list: when
/// nothing is found, or the directory cannot be read, the result is
/// `["(none)"]`.
pub fn list_available_stores(root: &Path) -> Vec<String> {
    if let Err(e) = std::fs::create_dir_all(root) {
        log::warn!("cannot create store root {}: {}", root.display(), e);
    }

    let mut files: Vec<String> = match std::fs::read_dir(root) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_json_name(name))
            .collect(),
        Err(e) => {
            log::warn!("cannot read store root {}: {}", root.display(), e);
            Vec::new()
        }
    };

    if files.is_empty() {
        return vec![NONE_SENTINEL.to_string()];
    }
    files.sort();
    files
}

/// Resolve a store file name to its path under `root`.
///
/// Only the basename of `file_name` is used, and it must end in `.json`.
/// Returns `None` for names that cannot refer to a store file.
pub fn store_file_path(root: &Path, file_name: &str) -> Option<PathBuf> {
    let name = basename(file_name);
    if name.is_empty() || name == "." || name == ".." || !is_json_name(name) {
        return None;
    }
    Some(root.join(name))
}

/// Load and parse the named store file.
///
/// An empty name or the `(none)` sentinel gives an empty store and an empty
/// path without touching the filesystem. Otherwise the file is read as UTF-8
/// and parsed with [`StoreFormat::Auto`].
///
/// # Errors
///
/// - [`KvError::NotFound`] if the name does not resolve to an existing file
/// - [`KvError::Io`] if the file cannot be read
/// - [`KvError::Format`] if its content is not a valid store
pub fn load_store(root: &Path, file_name: &str) -> Result<(Store, String)> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() || trimmed == NONE_SENTINEL {
        return Ok((Store::new(), String::new()));
    }

    let path = store_file_path(root, trimmed)
        .filter(|path| path.is_file())
        .ok_or_else(|| KvError::NotFound {
            path: root.join(basename(trimmed)),
        })?;

    let text = std::fs::read_to_string(&path).map_err(|e| KvError::io(&path, e))?;
    let store = parse(&text, StoreFormat::Auto)?;
    log::debug!("loaded {} keys from {}", store.len(), path.display());

    Ok((store, path.to_string_lossy().into_owned()))
}

/// Read one value from a registry file for previews.
///
/// A missing key yields `""`; nested values come back as compact JSON.
///
/// # Errors
///
/// Returns [`KvError::InvalidRequest`] if `file_name` or `key` is empty,
/// and the errors of [`load_store`] otherwise.
pub fn peek(root: &Path, file_name: &str, key: &str) -> Result<String> {
    if file_name.trim().is_empty() || key.is_empty() {
        return Err(KvError::InvalidRequest(
            "missing file_name or key".to_string(),
        ));
    }

    let (store, _) = load_store(root, file_name)?;
    Ok(store.get(key).map(value_to_string).unwrap_or_default())
}
