// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure owning nodes, their sockets and the wires between them.
//!
//! Every structural mutation re-resolves the graph: uniforms are named,
//! the single output node is located, and the nodes it depends on are
//! ordered so that each producer comes before its consumers. Callers making
//! many changes at once can batch them with [`Graph::begin_edit`] and
//! resolve a single time on [`GraphEdit::commit`].

use crate::error::{BuildError, GraphError};
use crate::node::{AttributeKind, ShaderNode};
use crate::runtime::{FrameContext, UniformBinding};
use crate::socket::{Socket, SocketDirection, SocketId};
use crate::uniform::{uniform_name, ShaderValue};
use crate::wire::Wire;
use indexmap::IndexMap;
use std::collections::HashSet;

/// A node and the arena handles of its sockets
#[derive(Debug)]
pub(crate) struct NodeEntry {
    pub(crate) node: Box<dyn ShaderNode>,
    pub(crate) inputs: Vec<SocketId>,
    pub(crate) outputs: Vec<SocketId>,
}

/// A shader graph
#[derive(Debug)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes keyed by id, in insertion order
    pub(crate) nodes: IndexMap<String, NodeEntry>,
    /// Socket arena; nodes and wires hold indices into it
    pub(crate) sockets: Vec<Socket>,
    pub(crate) wires: Vec<Wire>,
    /// Node indices in dependency order, `None` when not resolved
    pub(crate) resolved: Option<Vec<usize>>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            sockets: Vec::new(),
            wires: Vec::new(),
            resolved: Some(Vec::new()),
        }
    }

    /// Add a node and re-resolve
    pub fn add_node<N: ShaderNode + 'static>(&mut self, node: N) -> crate::Result<()> {
        self.add_boxed_node(Box::new(node))
    }

    /// Add an already boxed node and re-resolve
    pub fn add_boxed_node(&mut self, node: Box<dyn ShaderNode>) -> crate::Result<()> {
        self.insert_node(node)?;
        self.resolve()
    }

    /// Add a wire from an out socket to an in socket and re-resolve
    pub fn add_wire(&mut self, source: SocketId, sink: SocketId) -> crate::Result<()> {
        self.insert_wire(source, sink)?;
        self.resolve()
    }

    /// Start a batch of mutations resolved once on commit
    pub fn begin_edit(&mut self) -> GraphEdit<'_> {
        self.resolved = None;
        GraphEdit {
            graph: self,
            committed: false,
        }
    }

    fn insert_node(&mut self, node: Box<dyn ShaderNode>) -> Result<(), GraphError> {
        let id = node.core().id().to_string();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }

        let owner = self.nodes.len();
        let mut allocate = |name: &str, data_type, direction| {
            self.sockets.push(Socket::new(owner, &id, name, data_type, direction));
            SocketId(self.sockets.len() - 1)
        };
        let core = node.core();
        let inputs: Vec<SocketId> = core
            .in_sockets()
            .iter()
            .map(|spec| allocate(&spec.name, spec.data_type, SocketDirection::Input))
            .collect();
        let outputs: Vec<SocketId> = core
            .out_sockets()
            .iter()
            .map(|spec| allocate(&spec.name, spec.data_type, SocketDirection::Output))
            .collect();

        self.nodes.insert(id, NodeEntry { node, inputs, outputs });
        Ok(())
    }

    fn insert_wire(&mut self, source: SocketId, sink: SocketId) -> Result<(), GraphError> {
        let source_socket = self.socket(source).ok_or(GraphError::UnknownSocket(source.0))?;
        let sink_socket = self.socket(sink).ok_or(GraphError::UnknownSocket(sink.0))?;
        if source_socket.direction() != SocketDirection::Output || sink_socket.direction() != SocketDirection::Input {
            return Err(GraphError::WireDirection {
                source_id: source_socket.id().to_string(),
                sink_id: sink_socket.id().to_string(),
            });
        }
        self.wires.push(Wire::new(source, sink));
        Ok(())
    }

    fn entry(&self, node_id: &str) -> Result<&NodeEntry, GraphError> {
        self.nodes
            .get(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))
    }

    /// Handle of input socket `index` of a node
    pub fn in_socket(&self, node_id: &str, index: usize) -> crate::Result<SocketId> {
        let entry = self.entry(node_id)?;
        Ok(*entry.inputs.get(index).ok_or_else(|| BuildError::SocketIndex {
            node: node_id.to_string(),
            direction: "in",
            index,
        })?)
    }

    /// Handle of output socket `index` of a node
    pub fn out_socket(&self, node_id: &str, index: usize) -> crate::Result<SocketId> {
        let entry = self.entry(node_id)?;
        Ok(*entry.outputs.get(index).ok_or_else(|| BuildError::SocketIndex {
            node: node_id.to_string(),
            direction: "out",
            index,
        })?)
    }

    /// Get a socket by handle
    pub fn socket(&self, id: SocketId) -> Option<&Socket> {
        self.sockets.get(id.0)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: &str) -> Option<&dyn ShaderNode> {
        self.nodes.get(node_id).map(|entry| entry.node.as_ref())
    }

    /// Get all nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &dyn ShaderNode> {
        self.nodes.values().map(|entry| entry.node.as_ref())
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get all wires
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Id of the first node flagged as the shader output
    pub fn output_node(&self) -> Option<&str> {
        self.nodes
            .values()
            .find(|entry| entry.node.core().is_output_sink())
            .map(|entry| entry.node.core().id())
    }

    /// Whether the last resolution succeeded and no edit is pending
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Ids of the resolved nodes, producers first, output last
    pub fn resolved_nodes(&self) -> Result<Vec<&str>, GraphError> {
        let order = self.resolved.as_ref().ok_or(GraphError::Unresolved)?;
        Ok(order
            .iter()
            .filter_map(|&index| self.nodes.get_index(index))
            .map(|(id, _)| id.as_str())
            .collect())
    }

    pub(crate) fn resolved_entries(&self) -> Result<Vec<&NodeEntry>, GraphError> {
        let order = self.resolved.as_ref().ok_or(GraphError::Unresolved)?;
        Ok(order
            .iter()
            .filter_map(|&index| self.nodes.get_index(index))
            .map(|(_, entry)| entry)
            .collect())
    }

    /// Wires whose sink is `socket`
    pub(crate) fn wires_into(&self, socket: SocketId) -> impl Iterator<Item = &Wire> {
        self.wires.iter().filter(move |wire| wire.sink == socket)
    }

    /// Recompute uniform names, dependency order and variable aliases.
    ///
    /// On failure the graph is left unresolved and code generation refuses
    /// to run until a later resolution succeeds.
    pub fn resolve(&mut self) -> crate::Result<()> {
        match self.try_resolve() {
            Ok(order) => {
                tracing::debug!("Resolved graph '{}': {} of {} nodes", self.name, order.len(), self.nodes.len());
                self.resolved = Some(order);
                Ok(())
            }
            Err(err) => {
                tracing::debug!("Failed to resolve graph '{}': {}", self.name, err);
                self.resolved = None;
                Err(err)
            }
        }
    }

    fn try_resolve(&mut self) -> crate::Result<Vec<usize>> {
        self.name_uniforms()?;
        let order = self.dependency_order()?;
        self.apply_aliases(&order)?;
        Ok(order)
    }

    fn name_uniforms(&mut self) -> Result<(), crate::error::UniformError> {
        for entry in self.nodes.values_mut() {
            let core = entry.node.core_mut();
            for index in 0..core.uniforms().len() {
                let name = uniform_name(core.id(), index, core.uniforms()[index].data_type());
                core.set_uniform_name(index, name)?;
            }
        }
        Ok(())
    }

    fn dependency_order(&self) -> Result<Vec<usize>, GraphError> {
        let sinks: Vec<usize> = self
            .nodes
            .values()
            .enumerate()
            .filter(|(_, entry)| entry.node.core().is_output_sink())
            .map(|(index, _)| index)
            .collect();
        let sink = match sinks.as_slice() {
            [] => return Ok(Vec::new()),
            [sink] => *sink,
            _ => {
                return Err(GraphError::MultipleOutputs(
                    sinks.iter().map(|&index| self.node_id(index).to_string()).collect(),
                ))
            }
        };

        // Depth below the sink, keyed by node index in first-visit order
        let mut depths: IndexMap<usize, usize> = IndexMap::new();
        let mut stack = Vec::new();
        self.visit(sink, 0, &mut depths, &mut stack)?;

        let mut order: Vec<(usize, usize)> = depths.into_iter().collect();
        order.sort_by(|a, b| b.1.cmp(&a.1));
        let order: Vec<usize> = order.into_iter().map(|(index, _)| index).collect();

        if order.last() != Some(&sink) {
            return Err(GraphError::NoLastNode {
                expected: self.node_id(sink).to_string(),
                found: order.last().map(|&index| self.node_id(index).to_string()),
            });
        }
        Ok(order)
    }

    /// Walk backward from `index`, pushing every producer deeper than all of
    /// its consumers.
    fn visit(
        &self,
        index: usize,
        depth: usize,
        depths: &mut IndexMap<usize, usize>,
        stack: &mut Vec<usize>,
    ) -> Result<(), GraphError> {
        if stack.contains(&index) {
            return Err(GraphError::Cycle(self.node_id(index).to_string()));
        }
        if depths.get(&index).is_some_and(|&known| known >= depth) {
            return Ok(());
        }
        depths.insert(index, depth);

        let Some((_, entry)) = self.nodes.get_index(index) else {
            return Ok(());
        };
        stack.push(index);
        for &input in &entry.inputs {
            let mut feeding = self.wires_into(input);
            let Some(wire) = feeding.next() else {
                continue;
            };
            let extra = feeding.count();
            if extra > 0 {
                return Err(GraphError::MultipleWires {
                    socket: self.socket(input).map(|s| s.id().to_string()).unwrap_or_default(),
                    count: extra + 1,
                });
            }
            let producer = self
                .socket(wire.source)
                .ok_or(GraphError::UnknownSocket(wire.source.0))?
                .owner();
            self.visit(producer, depth + 1, depths, stack)?;
        }
        stack.pop();
        Ok(())
    }

    fn apply_aliases(&mut self, order: &[usize]) -> crate::Result<()> {
        for socket in &mut self.sockets {
            socket.clear_override();
        }
        let resolved: HashSet<usize> = order.iter().copied().collect();

        for &index in order {
            let Some((_, entry)) = self.nodes.get_index(index) else {
                continue;
            };
            for (slot, output) in entry.outputs.iter().enumerate() {
                if let Some(alias) = entry.node.output_alias(slot)? {
                    if let Some(socket) = self.sockets.get_mut(output.0) {
                        socket.override_variable_name(alias);
                    }
                }
            }
            for wire in &self.wires {
                let sink_resolved = self
                    .sockets
                    .get(wire.sink.0)
                    .is_some_and(|socket| resolved.contains(&socket.owner()));
                if sink_resolved && entry.outputs.contains(&wire.source) {
                    wire.bind_alias(&mut self.sockets);
                }
            }
        }
        Ok(())
    }

    fn node_id(&self, index: usize) -> &str {
        self.nodes.get_index(index).map_or("", |(id, _)| id.as_str())
    }

    /// Whether any resolved node needs the given vertex attribute
    pub fn requires_attribute(&self, kind: AttributeKind) -> bool {
        self.resolved_entries()
            .map(|entries| entries.iter().any(|entry| entry.node.core().attributes().contains(&kind)))
            .unwrap_or(false)
    }

    /// Run every resolved node's per-frame hook, in dependency order
    pub fn update_on_draw(&mut self, frame: &FrameContext) -> crate::Result<()> {
        let order = self.resolved.clone().ok_or(GraphError::Unresolved)?;
        for index in order {
            if let Some((_, entry)) = self.nodes.get_index_mut(index) {
                entry.node.update_on_draw(frame)?;
            }
        }
        Ok(())
    }

    /// Uniforms of the resolved nodes with their current values
    pub fn uniform_bindings(&self) -> crate::Result<Vec<UniformBinding<'_>>> {
        let mut bindings = Vec::new();
        for entry in self.resolved_entries()? {
            let core = entry.node.core();
            for (index, slot) in core.uniforms().iter().enumerate() {
                bindings.push(UniformBinding {
                    node: core.id(),
                    name: core.uniform_name(index)?,
                    data_type: slot.data_type(),
                    value: slot.value(),
                });
            }
        }
        Ok(bindings)
    }

    /// Replace the value of a node's uniform, e.g. to rebind a texture
    pub fn set_uniform_value(&mut self, node_id: &str, slot: usize, value: ShaderValue) -> crate::Result<()> {
        let entry = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        entry.node.core_mut().set_uniform_value(slot, value)?;
        Ok(())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// A batch of graph mutations resolved once on [`commit`](GraphEdit::commit)
#[derive(Debug)]
pub struct GraphEdit<'g> {
    graph: &'g mut Graph,
    committed: bool,
}

impl GraphEdit<'_> {
    /// Add a node without resolving
    pub fn add_node<N: ShaderNode + 'static>(&mut self, node: N) -> crate::Result<()> {
        self.add_boxed_node(Box::new(node))
    }

    /// Add a boxed node without resolving
    pub fn add_boxed_node(&mut self, node: Box<dyn ShaderNode>) -> crate::Result<()> {
        Ok(self.graph.insert_node(node)?)
    }

    /// Add a wire without resolving
    pub fn add_wire(&mut self, source: SocketId, sink: SocketId) -> crate::Result<()> {
        Ok(self.graph.insert_wire(source, sink)?)
    }

    /// Handle of input socket `index` of a node
    pub fn in_socket(&self, node_id: &str, index: usize) -> crate::Result<SocketId> {
        self.graph.in_socket(node_id, index)
    }

    /// Handle of output socket `index` of a node
    pub fn out_socket(&self, node_id: &str, index: usize) -> crate::Result<SocketId> {
        self.graph.out_socket(node_id, index)
    }

    /// Resolve the graph once for the whole batch
    pub fn commit(mut self) -> crate::Result<()> {
        self.committed = true;
        self.graph.resolve()
    }
}

impl Drop for GraphEdit<'_> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::warn!("Edit of graph '{}' dropped without commit; graph left unresolved", self.graph.name);
            self.graph.resolved = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShaderGraphError;
    use crate::nodes::{BinaryMathNode, ColorOutputNode, FloatInputNode, TextureInputNode, TimeInputNode};
    use crate::socket::DataType;
    use crate::uniform::ImageHandle;
    use std::time::Duration;

    fn connect(graph: &mut Graph, source: &str, out: usize, sink: &str, input: usize) -> crate::Result<()> {
        let source = graph.out_socket(source, out)?;
        let sink = graph.in_socket(sink, input)?;
        graph.add_wire(source, sink)
    }

    fn position(order: &[&str], id: &str) -> usize {
        order.iter().position(|n| *n == id).unwrap()
    }

    /// a -> add.in0, b -> add.in1, add -> out
    fn float_sum() -> Graph {
        let mut graph = Graph::new("sum");
        graph.add_node(FloatInputNode::new("a", 0.5).unwrap()).unwrap();
        graph.add_node(FloatInputNode::new("b", 0.25).unwrap()).unwrap();
        graph.add_node(BinaryMathNode::add("add", DataType::Float).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "a", 0, "add", 0).unwrap();
        connect(&mut graph, "b", 0, "add", 1).unwrap();
        connect(&mut graph, "add", 0, "out", 0).unwrap();
        graph
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = Graph::new("dup");
        graph.add_node(FloatInputNode::new("a", 1.0).unwrap()).unwrap();
        let err = graph.add_node(FloatInputNode::new("a", 2.0).unwrap()).unwrap_err();
        assert_eq!(err, ShaderGraphError::Graph(GraphError::DuplicateNode("a".to_string())));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_wire_direction_checked() {
        let mut graph = Graph::new("dir");
        graph.add_node(FloatInputNode::new("a", 1.0).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        let out = graph.out_socket("a", 0).unwrap();
        let input = graph.in_socket("out", 0).unwrap();

        assert!(matches!(
            graph.add_wire(input, out),
            Err(ShaderGraphError::Graph(GraphError::WireDirection { .. }))
        ));
        assert!(matches!(
            graph.add_wire(out, SocketId(99)),
            Err(ShaderGraphError::Graph(GraphError::UnknownSocket(99)))
        ));
        assert!(matches!(
            graph.in_socket("a", 0),
            Err(ShaderGraphError::Build(BuildError::SocketIndex { .. }))
        ));
    }

    #[test]
    fn test_producers_before_consumers() {
        let graph = float_sum();
        let order = graph.resolved_nodes().unwrap();
        assert_eq!(order.len(), 4);
        assert!(position(&order, "a") < position(&order, "add"));
        assert!(position(&order, "b") < position(&order, "add"));
        assert_eq!(order.last(), Some(&"out"));
    }

    #[test]
    fn test_diamond_orders_shared_producer_first() {
        // a feeds both m1 and m2; m1 also feeds m2
        let mut graph = Graph::new("diamond");
        graph.add_node(FloatInputNode::new("a", 1.0).unwrap()).unwrap();
        graph.add_node(BinaryMathNode::add("m1", DataType::Float).unwrap()).unwrap();
        graph.add_node(BinaryMathNode::add("m2", DataType::Float).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "a", 0, "m1", 0).unwrap();
        connect(&mut graph, "a", 0, "m1", 1).unwrap();
        connect(&mut graph, "a", 0, "m2", 0).unwrap();
        connect(&mut graph, "m1", 0, "m2", 1).unwrap();
        connect(&mut graph, "m2", 0, "out", 0).unwrap();

        let order = graph.resolved_nodes().unwrap();
        assert_eq!(order, vec!["a", "m1", "m2", "out"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut graph = float_sum();
        let first: Vec<String> = graph.resolved_nodes().unwrap().iter().map(|s| s.to_string()).collect();
        graph.resolve().unwrap();
        graph.resolve().unwrap();
        let second: Vec<String> = graph.resolved_nodes().unwrap().iter().map(|s| s.to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_orphans_are_excluded() {
        let mut graph = float_sum();
        graph.add_node(FloatInputNode::new("stray", 3.0).unwrap()).unwrap();
        let order = graph.resolved_nodes().unwrap();
        assert!(!order.contains(&"stray"));
        assert_eq!(graph.node_count(), 5);
    }

    #[test]
    fn test_multiple_outputs_leave_graph_unresolved() {
        let mut graph = float_sum();
        let err = graph.add_node(ColorOutputNode::rgb("out2").unwrap()).unwrap_err();
        assert_eq!(
            err,
            ShaderGraphError::Graph(GraphError::MultipleOutputs(vec!["out".to_string(), "out2".to_string()]))
        );
        assert!(!graph.is_resolved());
        assert_eq!(graph.resolved_nodes(), Err(GraphError::Unresolved));
    }

    #[test]
    fn test_zero_outputs_resolve_empty() {
        let mut graph = Graph::new("empty");
        graph.add_node(FloatInputNode::new("a", 1.0).unwrap()).unwrap();
        assert!(graph.resolved_nodes().unwrap().is_empty());
        assert_eq!(graph.output_node(), None);
    }

    #[test]
    fn test_fan_in_rejected() {
        let mut graph = float_sum();
        let err = connect(&mut graph, "b", 0, "add", 0).unwrap_err();
        assert_eq!(
            err,
            ShaderGraphError::Graph(GraphError::MultipleWires {
                socket: "add_in0".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let mut graph = Graph::new("cycle");
        graph.add_node(BinaryMathNode::add("p", DataType::Float).unwrap()).unwrap();
        graph.add_node(BinaryMathNode::add("q", DataType::Float).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "p", 0, "out", 0).unwrap();
        connect(&mut graph, "q", 0, "p", 0).unwrap();
        let err = connect(&mut graph, "p", 0, "q", 0).unwrap_err();
        assert!(matches!(err, ShaderGraphError::Graph(GraphError::Cycle(_))));
    }

    #[test]
    fn test_edit_scope_resolves_once_on_commit() {
        let mut graph = Graph::new("batch");
        let mut edit = graph.begin_edit();
        edit.add_node(FloatInputNode::new("a", 1.0).unwrap()).unwrap();
        edit.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        // A second sink mid-edit is fine until commit
        edit.add_node(ColorOutputNode::rgb("spare").unwrap()).unwrap();
        let source = edit.out_socket("a", 0).unwrap();
        let sink = edit.in_socket("out", 0).unwrap();
        edit.add_wire(source, sink).unwrap();
        assert!(edit.commit().is_err());
        assert!(!graph.is_resolved());
    }

    #[test]
    fn test_dropped_edit_leaves_graph_unresolved() {
        let mut graph = float_sum();
        {
            let mut edit = graph.begin_edit();
            edit.add_node(FloatInputNode::new("c", 1.0).unwrap()).unwrap();
        }
        assert!(!graph.is_resolved());
        graph.resolve().unwrap();
        assert!(graph.is_resolved());
    }

    #[test]
    fn test_uniform_names_distinct() {
        let mut graph = Graph::new("uniforms");
        graph.add_node(TimeInputNode::new("t").unwrap()).unwrap();
        graph.add_node(TimeInputNode::new("t_0").unwrap()).unwrap();
        graph.add_node(BinaryMathNode::add("add", DataType::Float).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "t", 0, "add", 0).unwrap();
        connect(&mut graph, "t_0", 0, "add", 1).unwrap();
        connect(&mut graph, "add", 0, "out", 0).unwrap();

        let names: Vec<&str> = graph.uniform_bindings().unwrap().iter().map(|b| b.name).collect();
        assert_eq!(names.len(), 2);
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), 2);
        assert!(unique.contains("ut_0_float"));
        assert!(unique.contains("ut_0_0_float"));
    }

    #[test]
    fn test_uniform_alias_applied_on_resolve() {
        let mut graph = Graph::new("alias");
        graph.add_node(TimeInputNode::new("time").unwrap()).unwrap();
        let out = graph.out_socket("time", 0).unwrap();
        assert_eq!(graph.socket(out).unwrap().variable_name(), "time_out_float");

        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "time", 0, "out", 0).unwrap();
        assert_eq!(graph.socket(out).unwrap().variable_name(), "utime_0_float");
    }

    #[test]
    fn test_update_on_draw_refreshes_uniforms() {
        let mut graph = Graph::new("draw");
        graph.add_node(TimeInputNode::new("time").unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "time", 0, "out", 0).unwrap();

        graph
            .update_on_draw(&FrameContext::new(Duration::from_secs(2), [0.0; 3]))
            .unwrap();
        let bindings = graph.uniform_bindings().unwrap();
        assert_eq!(bindings[0].value, Some(&ShaderValue::Float(2.0)));
    }

    #[test]
    fn test_set_uniform_value_rebinds_texture() {
        let mut graph = Graph::new("tex");
        graph
            .add_node(TextureInputNode::new("tex", ImageHandle::new("a.png")).unwrap())
            .unwrap();
        graph
            .set_uniform_value("tex", 0, ShaderValue::Sampler2D(ImageHandle::new("b.png")))
            .unwrap();
        assert!(graph.set_uniform_value("tex", 0, ShaderValue::Float(1.0)).is_err());
        assert!(matches!(
            graph.set_uniform_value("missing", 0, ShaderValue::Float(1.0)),
            Err(ShaderGraphError::Graph(GraphError::NodeNotFound(_)))
        ));
    }
}
