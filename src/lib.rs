use std::any::{Any, TypeId};
use std::sync::Arc;

mod error;

pub use error::NodeError;

/// Category every KV tools node is listed under in the host's node menu.
pub const DEFAULT_CATEGORY: &str = "Utils/KV";

/// Core trait that all nodes must implement.
/// A node is a stateless function the host's graph scheduler evaluates once per run.
pub trait Node: Send + Sync {
    /// The input values the host supplies for one evaluation
    type Input: Clone + Send + Sync + 'static;

    /// The output values handed back to the host
    /// The arity must match [`Node::return_names`]
    type Output: Clone + Send + Sync + 'static;

    /// Returns the stable class identifier the host stores in saved graphs
    fn class_name(&self) -> &'static str;

    /// Returns the human readable name shown in the node menu
    fn display_name(&self) -> &'static str;

    /// Returns the menu category for this node
    fn category(&self) -> &'static str {
        DEFAULT_CATEGORY
    }

    /// Returns the names of the output slots, in order
    fn return_names(&self) -> &'static [&'static str];

    /// Whether the host should treat this node as producing visible output
    fn is_output_node(&self) -> bool {
        false
    }

    /// Evaluate the node
    fn execute(&self, input: Self::Input) -> Result<Self::Output, NodeError>;
}

/// A handle to an installed node that allows building inputs for it
#[derive(Clone, Debug)]
pub struct NodeHandle<N: Node> {
    node_index: usize,
    class_name: &'static str,
    _phantom: std::marker::PhantomData<N>,
}

impl<N: Node> NodeHandle<N> {
    fn new(node_index: usize, class_name: &'static str) -> Self {
        Self {
            node_index,
            class_name,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Wrap a typed input into a routable [`NodeInput`]
    pub fn input(&self, input: N::Input) -> NodeInput {
        NodeInput::new(self.node_index, input)
    }

    /// Execute the node through the manager and return its typed output
    ///
    /// # Example
    /// ```ignore
    /// let handle = nodes.install(KvLoadInline);
    /// let output = handle.invoke(&nodes, "lang=de".to_string())?;
    /// ```
    pub fn invoke(&self, manager: &NodeManager, input: N::Input) -> Result<N::Output, NodeError> {
        let output = manager.execute(self.input(input))?;
        output
            .downcast::<N::Output>()
            .cloned()
            .ok_or(NodeError::OutputMismatch {
                node: self.class_name,
            })
    }

    /// Get the install index of the node
    pub fn node_index(&self) -> usize {
        self.node_index
    }
}

/// A type-erased node input that can be routed automatically
#[derive(Clone, Debug)]
pub struct NodeInput {
    node_index: usize,
    input: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
}

impl NodeInput {
    fn new<I: 'static + Send + Sync>(node_index: usize, input: I) -> Self {
        Self {
            node_index,
            type_id: TypeId::of::<I>(),
            input: Arc::new(input),
        }
    }

    /// Get the node index this input is for
    pub fn node_index(&self) -> usize {
        self.node_index
    }
}

/// Type-erased output of one node evaluation
#[derive(Clone)]
pub struct NodeOutput {
    node_index: usize,
    output: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
}

impl NodeOutput {
    fn new<O: 'static + Send + Sync>(node_index: usize, output: O) -> Self {
        Self {
            node_index,
            type_id: TypeId::of::<O>(),
            output: Arc::new(output),
        }
    }

    /// Get the node index this output is from
    pub fn node_index(&self) -> usize {
        self.node_index
    }

    /// Try to downcast the output to a specific type
    pub fn downcast<O: 'static>(&self) -> Option<&O> {
        if self.type_id == TypeId::of::<O>() {
            self.output.downcast_ref::<O>()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for NodeOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NodeOutput {{ node_index: {}, type_id: {:?} }}",
            self.node_index, self.type_id
        )
    }
}

type AnyInput = Arc<dyn Any + Send + Sync>;
type ExecuteFn = Box<dyn Fn(&AnyInput) -> Option<Result<NodeOutput, NodeError>> + Send + Sync>;

/// Holds a single installed node with its metadata and erased behavior
struct NodeEntry {
    class_name: &'static str,
    display_name: &'static str,
    category: &'static str,
    return_names: &'static [&'static str],
    output_node: bool,
    input_type_id: TypeId,
    execute_fn: ExecuteFn,
}

impl std::fmt::Debug for NodeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NodeEntry {{ class_name: {}, display_name: {}, category: {}, return_names: {:?}, input_type_id: {:?} }}",
            self.class_name, self.display_name, self.category, self.return_names, self.input_type_id
        )
    }
}

/// Static description of an installed node, as the host registers it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub class_name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub return_names: &'static [&'static str],
    pub output_node: bool,
}

/// Holds all installed nodes and routes host evaluations to them.
///
/// # Example
/// ```ignore
/// let mut nodes = NodeManager::new();
/// let get = nodes.install(KvGet);
/// let output = get.invoke(&nodes, input)?;
/// ```
pub struct NodeManager {
    nodes: Vec<NodeEntry>,
}

impl std::fmt::Debug for NodeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeManager {{ nodes: {:?} }}", self.nodes)
    }
}

impl Default for NodeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeManager {
    /// Create a new empty node manager
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Install a node.
    /// Returns a handle that builds inputs for it.
    /// Nodes keep the order they are installed in.
    pub fn install<N>(&mut self, node: N) -> NodeHandle<N>
    where
        N: Node + 'static,
    {
        let node_index = self.nodes.len();
        let class_name = node.class_name();
        let node = Arc::new(node);

        let node_for_execute = Arc::clone(&node);
        let execute_fn: ExecuteFn = Box::new(move |input: &AnyInput| {
            let typed = input.downcast_ref::<N::Input>()?;
            log::debug!("executing node {}", class_name);
            Some(
                node_for_execute
                    .execute(typed.clone())
                    .map(|output| NodeOutput::new(node_index, output)),
            )
        });

        self.nodes.push(NodeEntry {
            class_name,
            display_name: node.display_name(),
            category: node.category(),
            return_names: node.return_names(),
            output_node: node.is_output_node(),
            input_type_id: TypeId::of::<N::Input>(),
            execute_fn,
        });

        NodeHandle::new(node_index, class_name)
    }

    /// Execute a node with a routed input.
    ///
    /// Fails when the index is unknown, when the input type does not belong
    /// to the target node, or when the node itself fails.
    pub fn execute(&self, input: NodeInput) -> Result<NodeOutput, NodeError> {
        let entry = self
            .nodes
            .get(input.node_index)
            .ok_or(NodeError::UnknownNode {
                index: input.node_index,
            })?;

        if entry.input_type_id != input.type_id {
            return Err(NodeError::InputMismatch {
                node: entry.class_name,
            });
        }

        (entry.execute_fn)(&input.input).unwrap_or(Err(NodeError::InputMismatch {
            node: entry.class_name,
        }))
    }
}

// Lookups used when registering with the host
impl NodeManager {
    /// Get the number of installed nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the class names of all installed nodes in order
    pub fn node_names(&self) -> Vec<&'static str> {
        self.nodes.iter().map(|n| n.class_name).collect()
    }

    /// Pairs of class name and display name, in install order
    pub fn class_mappings(&self) -> Vec<(&'static str, &'static str)> {
        self.nodes
            .iter()
            .map(|n| (n.class_name, n.display_name))
            .collect()
    }

    /// Describe the node registered under `class_name`
    pub fn find(&self, class_name: &str) -> Option<NodeInfo> {
        self.nodes
            .iter()
            .find(|n| n.class_name == class_name)
            .map(|n| NodeInfo {
                class_name: n.class_name,
                display_name: n.display_name,
                category: n.category,
                return_names: n.return_names,
                output_node: n.output_node,
            })
    }
}

/// Builder pattern for constructing a NodeManager
pub struct NodeManagerBuilder {
    nodes: Vec<Box<dyn FnOnce(&mut NodeManager) + Send>>,
}

impl NodeManagerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node
    pub fn with_node<N>(mut self, node: N) -> Self
    where
        N: Node + 'static,
    {
        self.nodes.push(Box::new(move |manager: &mut NodeManager| {
            let _ = manager.install(node);
        }));
        self
    }

    /// Build the node manager
    pub fn build(self) -> NodeManager {
        let mut manager = NodeManager::new();
        for install_fn in self.nodes {
            install_fn(&mut manager);
        }
        manager
    }
}

impl Default for NodeManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
