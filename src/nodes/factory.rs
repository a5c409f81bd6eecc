//! Node adapter trait and the registry that dispatches node kinds to adapters

use crate::code::Operation;
use crate::error::{CodegenError, CodegenResult};
use crate::nodes::NodeContext;
use log::debug;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Hierarchical category used to group adapters in listings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the full path as a slice
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Get display string for listings
    pub fn display_string(&self) -> String {
        self.path.join(" > ")
    }

    /// Get standard math category
    pub fn math() -> Self {
        Self::new(&["Math"])
    }
}

/// Descriptive data about an adapter
#[derive(Debug, Clone)]
pub struct AdapterMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub category: NodeCategory,
    pub description: &'static str,
    /// Output socket the adapter writes its result to
    pub output_socket: &'static str,
}

impl AdapterMetadata {
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            category,
            description,
            output_socket: "",
        }
    }

    pub fn with_output_socket(mut self, output_socket: &'static str) -> Self {
        self.output_socket = output_socket;
        self
    }
}

/// Translates one node kind into intermediate operations.
///
/// [`generate_code`](NodeAdapter::generate_code) is a template method: it yields the
/// [`preamble`](NodeAdapter::preamble) followed by the adapter's own
/// [`emit`](NodeAdapter::emit) operations. The returned list is built in one pass
/// over the context; generate again if the context changes.
pub trait NodeAdapter: Send + Sync {
    /// Node kind this adapter answers for; also its registry key
    fn vop_type_name(&self) -> &'static str;

    fn metadata(&self) -> AdapterMetadata;

    /// Operations common to every node of this adapter. Empty by default.
    fn preamble(&self, _ctx: &NodeContext) -> CodegenResult<Vec<Operation>> {
        Ok(Vec::new())
    }

    /// Operations specific to the node kind
    fn emit(&self, ctx: &NodeContext) -> CodegenResult<Vec<Operation>>;

    /// Full operation list for a node. Nothing is returned if any step fails.
    fn generate_code(&self, ctx: &NodeContext) -> CodegenResult<Vec<Operation>> {
        let mut operations = self.preamble(ctx)?;
        operations.extend(self.emit(ctx)?);
        Ok(operations)
    }
}

/// Registry mapping node kinds to adapters
pub struct AdapterRegistry {
    adapters: BTreeMap<String, Box<dyn NodeAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            adapters: BTreeMap::new(),
        }
    }

    /// Create a registry holding every built-in adapter
    pub fn with_builtin_adapters() -> CodegenResult<Self> {
        let mut registry = Self::new();
        crate::nodes::math::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Register an adapter under its own kind
    pub fn register<T: NodeAdapter + Default + 'static>(&mut self) -> CodegenResult<()> {
        self.register_adapter(Box::new(T::default()))
    }

    /// Register an already constructed adapter
    pub fn register_adapter(&mut self, adapter: Box<dyn NodeAdapter>) -> CodegenResult<()> {
        let kind = adapter.vop_type_name();
        if self.adapters.contains_key(kind) {
            return Err(CodegenError::DuplicateAdapter(kind.to_string()));
        }

        debug!("Registered adapter for node kind '{}'", kind);
        self.adapters.insert(kind.to_string(), adapter);
        Ok(())
    }

    /// Find the adapter responsible for a node kind
    pub fn lookup(&self, kind: &str) -> CodegenResult<&dyn NodeAdapter> {
        self.adapters
            .get(kind)
            .map(|adapter| adapter.as_ref())
            .ok_or_else(|| CodegenError::UnknownNodeKind(kind.to_string()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.adapters.contains_key(kind)
    }

    /// Registered kinds in sorted order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(|k| k.as_str())
    }

    /// Metadata for every registered adapter, sorted by kind
    pub fn list_adapters(&self) -> Vec<AdapterMetadata> {
        self.adapters.values().map(|adapter| adapter.metadata()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared registry of the built-in adapters, read-only after first use
pub static BUILTIN_ADAPTERS: Lazy<AdapterRegistry> = Lazy::new(|| {
    let mut registry = AdapterRegistry::new();
    // Built-in kinds are distinct, so registration cannot collide
    if let Err(e) = crate::nodes::math::register_all(&mut registry) {
        log::error!("Failed to register built-in adapters: {}", e);
    }
    registry
});
