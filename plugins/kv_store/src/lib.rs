//! Key/value store nodes
//!
//! Parses small key/value stores and reads typed values out of them.
//! A store is written either as a JSON object or as `key=value` /
//! `key: value` lines, and the format is detected automatically.
//!
//! # Features
//!
//! - JSON and line-based stores with auto-detection
//! - Casting values to string, int, float or bool with a fallback default
//! - Named store files under a single registry root
//! - A registry index of store files and their keys for front-ends
//!
//! # Example
//!
//! ```ignore
//! use kvtools::NodeManagerBuilder;
//! use kvtools_store_plugin::{KvPaths, register_nodes};
//!
//! let paths = KvPaths::from_working_dir();
//! let nodes = register_nodes(NodeManagerBuilder::new(), &paths).build();
//! for (class_name, display_name) in nodes.class_mappings() {
//!     println!("{class_name}: {display_name}");
//! }
//! ```

mod cast;
mod config;
mod error;
mod format;
mod index;
mod names;
mod nodes;
mod registry;
mod store;

pub use cast::{TRUE_WORDS, TypedValue, ValueType, cast, cast_str, format_float, get};
pub use config::{IMAGES_DIR_NAME, INDEX_FILE_NAME, KvPaths, STORE_DIR_NAME};
pub use error::{KvError, Result};
pub use format::{StoreFormat, dump, looks_like_json, parse};
pub use index::{IndexEntry, RegistryIndex, read_registry, refresh_registry, scan_registry, write_registry};
pub use names::{basename, is_json_name, sanitize_segment, strip_extension};
pub use nodes::{KvGet, KvGetInput, KvLoadFromRegistry, KvLoadInline, register_nodes};
pub use registry::{NONE_SENTINEL, list_available_stores, load_store, peek, store_file_path};
pub use store::{Store, value_to_string};
