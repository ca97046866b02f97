//! Image nodes for key/value stores
//!
//! Each store may have a folder of images, one per key:
//!
//! ```text
//! <store root>/images/<store name>/<key>.png
//! ```
//!
//! Looking an image up never fails. When the file is missing or cannot be
//! decoded, the nodes return a 1x1 placeholder and an empty path, so a
//! missing asset never aborts the surrounding graph run. Callers that care
//! test the path.
//!
//! # Example
//!
//! ```ignore
//! use kvtools_image_plugin::{ImageRequest, KvLoadImage};
//! use kvtools_store_plugin::KvPaths;
//!
//! let mut nodes = NodeManager::new();
//! let load = nodes.install(KvLoadImage::new(KvPaths::from_working_dir()));
//! let (image, path) = load.invoke(&nodes, ImageRequest::new("Tom", "voices.json"))?;
//! if path.is_empty() {
//!     // placeholder
//! }
//! ```

mod loader;
mod nodes;
mod path;

pub use loader::{ImageLookup, load_image, placeholder};
pub use nodes::{ImageRequest, KvImagePath, KvLoadImage, register_nodes};
pub use path::{DEFAULT_EXT, find_image, resolve_image_path};
