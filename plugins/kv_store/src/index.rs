//! Registry index persisted for the front-end key dropdown
//!
//! The index lists every store file under the registry root together with
//! its sorted keys. It is a presentation cache: the nodes never read it.

use crate::config::KvPaths;
use crate::error::{KvError, Result};
use crate::format::{StoreFormat, parse};
use crate::names::is_json_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Keys of one store file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub keys: Vec<String>,
}

/// All store files known to the registry, by file name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryIndex {
    pub base_dir: PathBuf,
    pub files: BTreeMap<String, IndexEntry>,
}

/// Scan the registry root and collect the keys of each store file.
///
/// Files that cannot be read or parsed are skipped.
///
/// # Errors
///
/// Returns an error only if the root cannot be created or listed.
pub async fn scan_registry(base_dir: &Path) -> Result<RegistryIndex> {
    fs::create_dir_all(base_dir)
        .await
        .map_err(|e| KvError::io(base_dir, e))?;

    let mut entries = fs::read_dir(base_dir)
        .await
        .map_err(|e| KvError::io(base_dir, e))?;

    let mut files = BTreeMap::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| KvError::io(base_dir, e))?
    {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let path = entry.path();
        if !is_json_name(&name) || !path.is_file() {
            continue;
        }

        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        match parse(&text, StoreFormat::Auto) {
            Ok(store) => {
                files.insert(
                    name,
                    IndexEntry {
                        keys: store.sorted_keys(),
                    },
                );
            }
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }

    Ok(RegistryIndex {
        base_dir: base_dir.to_path_buf(),
        files,
    })
}

/// Write the index as pretty-printed JSON, creating parent directories.
pub async fn write_registry(index: &RegistryIndex, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| KvError::io(parent, e))?;
    }

    let contents = serde_json::to_string_pretty(index)
        .map_err(|e| KvError::Format(format!("JSON error: {}", e)))?;

    fs::write(path, contents)
        .await
        .map_err(|e| KvError::io(path, e))?;

    log::info!("registry index written: {}", path.display());
    Ok(())
}

/// Load a previously written index.
///
/// A missing or empty file yields an empty index.
pub async fn read_registry(path: &Path) -> Result<RegistryIndex> {
    if !path.exists() {
        return Ok(RegistryIndex::default());
    }

    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| KvError::io(path, e))?;

    if contents.trim().is_empty() {
        return Ok(RegistryIndex::default());
    }

    serde_json::from_str(&contents).map_err(|e| KvError::Format(format!("JSON error: {}", e)))
}

/// Rescan the registry root and rewrite the index
pub async fn refresh_registry(paths: &KvPaths) -> Result<RegistryIndex> {
    let index = scan_registry(&paths.base_dir).await?;
    write_registry(&index, &paths.index_path).await?;
    Ok(index)
}
