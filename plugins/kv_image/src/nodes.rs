//! Host nodes for store images

use crate::loader::load_image;
use crate::path::{DEFAULT_EXT, resolve_image_path};
use image::Rgb32FImage;
use kvtools::{Node, NodeError, NodeManagerBuilder};
use kvtools_store_plugin::KvPaths;

/// Inputs shared by the image nodes
#[derive(Clone, Debug)]
pub struct ImageRequest {
    pub key: String,
    /// Store file name or the path output of the registry loader
    pub registry_path: String,
    pub ext: String,
}

impl ImageRequest {
    pub fn new(key: impl Into<String>, registry_path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            registry_path: registry_path.into(),
            ext: DEFAULT_EXT.to_string(),
        }
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = ext.into();
        self
    }
}

/// Loads the image stored for a key; falls back to a placeholder
#[derive(Clone, Debug)]
pub struct KvLoadImage {
    paths: KvPaths,
}

impl KvLoadImage {
    pub const CLASS_NAME: &'static str = "KVLoadImage";

    pub fn new(paths: KvPaths) -> Self {
        Self { paths }
    }
}

impl Node for KvLoadImage {
    type Input = ImageRequest;
    type Output = (Rgb32FImage, String);

    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn display_name(&self) -> &'static str {
        "KV Load Image"
    }

    fn return_names(&self) -> &'static [&'static str] {
        &["image", "path"]
    }

    fn execute(&self, request: ImageRequest) -> Result<Self::Output, NodeError> {
        let lookup = load_image(
            &self.paths.images_root,
            &request.registry_path,
            &request.key,
            &request.ext,
        );
        Ok(lookup.into_parts())
    }
}

/// Computes where the image for a key would live, without reading it
#[derive(Clone, Debug)]
pub struct KvImagePath {
    paths: KvPaths,
}

impl KvImagePath {
    pub const CLASS_NAME: &'static str = "KVImagePath";

    pub fn new(paths: KvPaths) -> Self {
        Self { paths }
    }
}

impl Node for KvImagePath {
    type Input = ImageRequest;
    type Output = String;

    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn display_name(&self) -> &'static str {
        "KV Image Path"
    }

    fn return_names(&self) -> &'static [&'static str] {
        &["path"]
    }

    fn execute(&self, request: ImageRequest) -> Result<String, NodeError> {
        Ok(resolve_image_path(
            &self.paths.images_root,
            &request.registry_path,
            &request.key,
            &request.ext,
        ))
    }
}

/// Add the image nodes to a node manager
pub fn register_nodes(builder: NodeManagerBuilder, paths: &KvPaths) -> NodeManagerBuilder {
    builder
        .with_node(KvLoadImage::new(paths.clone()))
        .with_node(KvImagePath::new(paths.clone()))
}
