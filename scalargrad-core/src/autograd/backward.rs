use crate::autograd::graph::{Graph, NodeId};
use crate::autograd::OpKind;
use crate::config::AccumulationMode;
use crate::error::ScalarGradError;
use log::{debug, trace, warn};

impl Graph {
    /// Performs the backward pass starting from `root`.
    ///
    /// Seeds \( \frac{\partial root}{\partial root} = 1 \), sorts the ancestors of `root`
    /// topologically and applies each node's local derivative rule in reverse order, so a
    /// node's gradient is complete before it is pushed to its parents. Contributions from
    /// several children are summed.
    ///
    /// The gradients of the pass are computed in a scratch buffer indexed by node and then
    /// committed to the root and every visited trainable node according to the graph's
    /// [`AccumulationMode`]:
    /// * `Reset` (default): the stored gradient is replaced, so repeated calls are idempotent.
    /// * `Accumulate`: the pass is added onto the stored gradient.
    ///
    /// Derived nodes are always trainable. Non-trainable leaves are never written unless
    /// they are the root itself.
    ///
    /// # Errors
    /// `InvalidNode` if `root` does not belong to this graph.
    pub fn backward(&mut self, root: NodeId) -> Result<(), ScalarGradError> {
        if !self.record(root)?.trainable {
            warn!("backward called on non-trainable leaf {root}; only the seed is written");
        }
        let sorted_nodes = self.topological_sort(root)?;
        debug!(
            "backward from {root}: {} of {} nodes reachable",
            sorted_nodes.len(),
            self.nodes.len()
        );

        // Parents precede children, so every visited index is below root + 1.
        let mut grads = vec![0.0; root.0 + 1];
        grads[root.0] = 1.0;

        for &node_id in sorted_nodes.iter().rev() {
            let record = &self.nodes[node_id.0];
            if record.op == OpKind::Leaf {
                continue;
            }
            let upstream = grads[node_id.0];

            let mut inputs = [0.0; 2];
            for (slot, parent) in inputs.iter_mut().zip(&record.parents) {
                *slot = self.nodes[parent.0].value;
            }
            let partials = record.op.partials(&inputs, record.value);

            for (parent, partial) in record.parents.iter().zip(partials) {
                if self.nodes[parent.0].trainable {
                    grads[parent.0] += upstream * partial;
                }
            }
            trace!(
                "backward {node_id} ({}) upstream={upstream} partials={partials:?}",
                record.op
            );
        }

        let mode = self.config.accumulation;
        for node_id in sorted_nodes {
            let record = &mut self.nodes[node_id.0];
            if !record.trainable && node_id != root {
                continue;
            }
            let pass_grad = grads[node_id.0];
            match mode {
                AccumulationMode::Reset => record.grad = pass_grad,
                AccumulationMode::Accumulate => record.grad += pass_grad,
            }
        }
        debug!("backward from {root} finished ({mode} mode)");
        Ok(())
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
