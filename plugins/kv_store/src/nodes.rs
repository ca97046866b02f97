//! Host nodes backed by the store parser, caster and registry

use crate::cast::{ValueType, get};
use crate::config::KvPaths;
use crate::format::{StoreFormat, parse};
use crate::registry::{list_available_stores, load_store};
use crate::store::Store;
use kvtools::{Node, NodeError, NodeManagerBuilder};

/// Parses a store from text typed into the node
#[derive(Clone, Debug, Default)]
pub struct KvLoadInline;

impl KvLoadInline {
    pub const CLASS_NAME: &'static str = "KVLoadInline";
}

impl Node for KvLoadInline {
    /// The inline text, JSON or `key=value` lines
    type Input = String;
    type Output = Store;

    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn display_name(&self) -> &'static str {
        "KV Load Inline"
    }

    fn return_names(&self) -> &'static [&'static str] {
        &["store"]
    }

    fn execute(&self, data: String) -> Result<Store, NodeError> {
        parse(&data, StoreFormat::Auto).map_err(|e| NodeError::execution(Self::CLASS_NAME, e))
    }
}

/// Loads a named store file from the registry root
#[derive(Clone, Debug)]
pub struct KvLoadFromRegistry {
    paths: KvPaths,
}

impl KvLoadFromRegistry {
    pub const CLASS_NAME: &'static str = "KVLoadFromRegistry";

    pub fn new(paths: KvPaths) -> Self {
        Self { paths }
    }

    /// Choices for the file name dropdown; never empty
    pub fn available_files(&self) -> Vec<String> {
        list_available_stores(&self.paths.base_dir)
    }
}

impl Node for KvLoadFromRegistry {
    /// The store file name, as picked from [`KvLoadFromRegistry::available_files`]
    type Input = String;
    /// The store and the path it was read from
    type Output = (Store, String);

    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn display_name(&self) -> &'static str {
        "KV Load from Registry"
    }

    fn return_names(&self) -> &'static [&'static str] {
        &["store", "path"]
    }

    fn execute(&self, file_name: String) -> Result<(Store, String), NodeError> {
        load_store(&self.paths.base_dir, &file_name)
            .map_err(|e| NodeError::execution(Self::CLASS_NAME, e))
    }
}

/// Inputs of [`KvGet`]
#[derive(Clone, Debug, Default)]
pub struct KvGetInput {
    pub store: Store,
    pub key: String,
    pub default: String,
    /// One of `string`, `int`, `float`, `bool`; anything else reads as `string`
    pub as_type: String,
    /// Key list cached by the front-end for its dropdown; not used here
    pub keys_hint: Option<String>,
}

/// Reads one value from a store
#[derive(Clone, Debug, Default)]
pub struct KvGet;

impl KvGet {
    pub const CLASS_NAME: &'static str = "KVGet";
}

impl Node for KvGet {
    type Input = KvGetInput;
    /// The value and the newline-joined sorted key list of the store
    type Output = (String, String);

    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn display_name(&self) -> &'static str {
        "KV Get Value"
    }

    fn return_names(&self) -> &'static [&'static str] {
        &["value", "keys"]
    }

    fn is_output_node(&self) -> bool {
        true
    }

    fn execute(&self, input: KvGetInput) -> Result<(String, String), NodeError> {
        let as_type = ValueType::from_host(&input.as_type);
        let value = get(&input.store, &input.key, Some(&input.default), as_type);
        Ok((value, input.store.key_listing()))
    }
}

/// Add the store nodes to a node manager
pub fn register_nodes(builder: NodeManagerBuilder, paths: &KvPaths) -> NodeManagerBuilder {
    builder
        .with_node(KvLoadInline)
        .with_node(KvLoadFromRegistry::new(paths.clone()))
        .with_node(KvGet)
}
