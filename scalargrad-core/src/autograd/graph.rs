use crate::autograd::OpKind;
use crate::config::{DomainPolicy, GraphConfig};
use crate::error::ScalarGradError;
use log::{debug, trace};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::collections::HashSet;
use std::fmt::{self, Write as _};

/// Stable identifier of a node inside a [`Graph`].
///
/// Identity is the arena index: two nodes holding the same value are still distinct
/// graph entities. A node's parents always have smaller ids than the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in its graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One arena slot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeRecord {
    /// Forward value, never modified after construction.
    pub(crate) value: f64,
    /// Derivative of the last backward root with respect to this node.
    pub(crate) grad: f64,
    /// Operands in operand order (0, 1 or 2 entries).
    pub(crate) parents: Vec<NodeId>,
    /// Nodes built from this one. Bookkeeping only, backward never reads it.
    pub(crate) children: Vec<NodeId>,
    pub(crate) trainable: bool,
    pub(crate) op: OpKind,
}

/// Arena holding every node of a computation graph.
///
/// Operators (see [`crate::ops`]) push new nodes; nothing is ever removed except by
/// [`Graph::clear`] or by dropping the graph. Apart from `grad`, a node never changes
/// once pushed.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<NodeRecord>,
    pub(crate) config: GraphConfig,
}

impl Graph {
    /// Creates an empty graph with [`GraphConfig::default`].
    pub fn new() -> Self {
        let config = GraphConfig::default();
        Graph {
            nodes: Vec::with_capacity(config.capacity),
            config,
        }
    }

    /// Creates an empty graph after validating `config`.
    pub fn with_config(config: GraphConfig) -> Result<Self, ScalarGradError> {
        config.validate()?;
        Ok(Graph {
            nodes: Vec::with_capacity(config.capacity),
            config,
        })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- Leaf creation ---

    /// Wraps a raw scalar as a leaf node.
    ///
    /// # Errors
    /// `DomainError` if `value` is NaN or infinite and the domain policy is strict.
    pub fn leaf(&mut self, value: f64, trainable: bool) -> Result<NodeId, ScalarGradError> {
        self.ensure_finite_input("leaf", value)?;
        Ok(self.push_leaf(value, trainable))
    }

    /// Wraps a raw scalar as a non-trainable leaf.
    pub fn constant(&mut self, value: f64) -> Result<NodeId, ScalarGradError> {
        self.leaf(value, false)
    }

    /// Creates a leaf holding a value drawn uniformly from `[0, 1)`.
    pub fn leaf_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R, trainable: bool) -> NodeId {
        let value: f64 = rng.gen();
        self.push_leaf(value, trainable)
    }

    /// Creates a leaf holding a value drawn from `N(mean, std_dev²)`.
    ///
    /// # Errors
    /// `DomainError` if `std_dev` is negative or not finite.
    pub fn leaf_normal<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        mean: f64,
        std_dev: f64,
        trainable: bool,
    ) -> Result<NodeId, ScalarGradError> {
        if !(std_dev >= 0.0 && std_dev.is_finite()) {
            return Err(ScalarGradError::domain(
                "leaf_normal",
                format!("standard deviation {std_dev} must be finite and non-negative"),
            ));
        }
        let normal = Normal::new(mean, std_dev)
            .map_err(|e| ScalarGradError::domain("leaf_normal", e.to_string()))?;
        let value = normal.sample(rng);
        self.ensure_finite_input("leaf_normal", value)?;
        Ok(self.push_leaf(value, trainable))
    }

    pub(crate) fn push_leaf(&mut self, value: f64, trainable: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeRecord {
            value,
            grad: 0.0,
            parents: Vec::new(),
            children: Vec::new(),
            trainable,
            op: OpKind::Leaf,
        });
        trace!("push leaf {id} value={value} trainable={trainable}");
        id
    }

    /// Appends a derived node. Parents must already exist.
    ///
    /// Derived nodes are always trainable; only leaves can opt out. The node is
    /// registered as a child of every trainable parent.
    pub(crate) fn push_derived(&mut self, value: f64, parents: Vec<NodeId>, op: OpKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        for parent in &parents {
            debug_assert!(parent.0 < id.0, "parent {parent} created after child {id}");
            let record = &mut self.nodes[parent.0];
            // `x op x` lists the same parent twice
            if record.trainable && record.children.last() != Some(&id) {
                record.children.push(id);
            }
        }
        trace!("push {op} {id} value={value} parents={parents:?}");
        self.nodes.push(NodeRecord {
            value,
            grad: 0.0,
            parents,
            children: Vec::new(),
            trainable: true,
            op,
        });
        id
    }

    /// Drops every node with index `>= mark`, undoing a partially applied composite
    /// operation.
    pub(crate) fn rollback(&mut self, mark: usize) {
        if mark >= self.nodes.len() {
            return;
        }
        self.nodes.truncate(mark);
        for record in &mut self.nodes {
            record.children.retain(|c| c.0 < mark);
        }
    }

    pub(crate) fn ensure_finite_input(&self, operation: &str, value: f64) -> Result<(), ScalarGradError> {
        if self.config.domain_policy == DomainPolicy::Strict && !value.is_finite() {
            return Err(ScalarGradError::domain(
                operation,
                format!("input value {value} is not finite"),
            ));
        }
        Ok(())
    }

    // --- Accessors ---

    pub(crate) fn record(&self, id: NodeId) -> Result<&NodeRecord, ScalarGradError> {
        self.nodes.get(id.0).ok_or(ScalarGradError::InvalidNode {
            id: id.0,
            len: self.nodes.len(),
        })
    }

    /// Forward value of `id`.
    pub fn value(&self, id: NodeId) -> Result<f64, ScalarGradError> {
        Ok(self.record(id)?.value)
    }

    /// Gradient of `id` relative to the last backward pass that visited it.
    pub fn gradient(&self, id: NodeId) -> Result<f64, ScalarGradError> {
        Ok(self.record(id)?.grad)
    }

    pub fn is_trainable(&self, id: NodeId) -> Result<bool, ScalarGradError> {
        Ok(self.record(id)?.trainable)
    }

    pub fn op(&self, id: NodeId) -> Result<OpKind, ScalarGradError> {
        Ok(self.record(id)?.op)
    }

    pub fn parents(&self, id: NodeId) -> Result<&[NodeId], ScalarGradError> {
        Ok(&self.record(id)?.parents)
    }

    /// Nodes produced from `id`. Only trainable nodes record their children.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], ScalarGradError> {
        Ok(&self.record(id)?.children)
    }

    /// Sets every gradient in the graph back to 0.
    pub fn zero_grad(&mut self) {
        for record in &mut self.nodes {
            record.grad = 0.0;
        }
    }

    /// Removes every node.
    ///
    /// Ids are plain arena indices with no generation tag: an id handed out before
    /// `clear` fails with `InvalidNode` until a new node takes its slot, and then
    /// refers to that new node.
    pub fn clear(&mut self) {
        debug!("clearing graph with {} nodes", self.nodes.len());
        self.nodes.clear();
    }

    // --- Traversal ---

    /// Returns every node reachable from `root` through parent links, each exactly once,
    /// with every parent placed before all of its children. `root` is last.
    ///
    /// Iterative depth-first post-order, so long chains do not grow the call stack.
    pub fn topological_sort(&self, root: NodeId) -> Result<Vec<NodeId>, ScalarGradError> {
        self.record(root)?;

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut sorted_list = Vec::new();
        // (node, parents already pushed)
        let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];

        while let Some((node_id, expanded)) = stack.pop() {
            if expanded {
                sorted_list.push(node_id);
                continue;
            }
            if !visited.insert(node_id) {
                continue;
            }
            stack.push((node_id, true));
            // Reversed so the first operand is explored first.
            for parent in self.nodes[node_id.0].parents.iter().rev() {
                if !visited.contains(parent) {
                    stack.push((*parent, false));
                }
            }
        }

        trace!("topological_sort from {root}: {} nodes", sorted_list.len());
        Ok(sorted_list)
    }

    /// Renders the subgraph under `root`, one node per line in topological order.
    pub fn describe(&self, root: NodeId) -> Result<String, ScalarGradError> {
        let order = self.topological_sort(root)?;
        let mut out = String::new();
        for id in order {
            let record = &self.nodes[id.0];
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{id} {op:<4} value={value:.6} grad={grad:.6} trainable={trainable} parents={parents:?}",
                op = record.op,
                value = record.value,
                grad = record.grad,
                trainable = record.trainable,
                parents = record.parents.iter().map(|p| p.0).collect::<Vec<_>>(),
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
