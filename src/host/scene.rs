use std::collections::BTreeMap;

use crate::{
    foundation::core::{LocalTransform, NodeId},
    host::{NodeFactory, NodeHost},
};

/// State of one node in a [`SceneGraph`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneNode {
    /// Name given at creation; not required to be unique.
    pub name: String,
    pub parent: Option<NodeId>,
    /// Children in render order, last renders on top.
    pub children: Vec<NodeId>,
    pub active: bool,
    pub transform: LocalTransform,
    pub opacity: f64,
    pub interactable: bool,
    pub blocks_input: bool,
}

/// In-memory host scene graph.
///
/// Useful for headless runs (CLI, tests) and as a reference for toolkit adapters.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    by_name: BTreeMap<String, NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an active, interactable node with the given transform.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        transform: LocalTransform,
    ) -> NodeId {
        let name = name.into();
        let id = NodeId(self.nodes.len() as u64);
        let parent = parent.filter(|p| self.node(*p).is_some());
        self.nodes.push(SceneNode {
            name: name.clone(),
            parent,
            children: Vec::new(),
            active: true,
            transform,
            opacity: 1.0,
            interactable: true,
            blocks_input: true,
        });
        match parent {
            Some(p) => self.nodes[p.0 as usize].children.push(id),
            None => self.roots.push(id),
        }
        self.by_name.entry(name).or_insert(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    /// First node created with `name`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Top-level nodes in render order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Active flag of the node and all of its ancestors.
    pub fn is_active_in_hierarchy(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            match self.node(n) {
                Some(node) if node.active => cur = node.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn opacity(&self, id: NodeId) -> Option<f64> {
        self.node(id).map(|n| n.opacity)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        let node = self.nodes.get_mut(id.0 as usize);
        if node.is_none() {
            tracing::warn!(node = id.0, "unknown scene node");
        }
        node
    }
}

impl NodeHost for SceneGraph {
    fn set_active(&mut self, node: NodeId, active: bool) {
        if let Some(n) = self.node_mut(node) {
            n.active = active;
        }
    }

    fn is_active(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.active)
    }

    fn local_transform(&self, node: NodeId) -> Option<LocalTransform> {
        self.node(node).map(|n| n.transform)
    }

    fn set_local_transform(&mut self, node: NodeId, transform: LocalTransform) {
        if let Some(n) = self.node_mut(node) {
            n.transform = transform;
        }
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f64) {
        if let Some(n) = self.node_mut(node) {
            n.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_interactable(&mut self, node: NodeId, interactable: bool) {
        if let Some(n) = self.node_mut(node) {
            n.interactable = interactable;
        }
    }

    fn set_blocks_input(&mut self, node: NodeId, blocks: bool) {
        if let Some(n) = self.node_mut(node) {
            n.blocks_input = blocks;
        }
    }

    fn set_as_last_sibling(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).map(|n| n.parent) else {
            tracing::warn!(node = node.0, "unknown scene node");
            return;
        };
        let siblings = match parent {
            Some(p) => &mut self.nodes[p.0 as usize].children,
            None => &mut self.roots,
        };
        siblings.retain(|&n| n != node);
        siblings.push(node);
    }
}

impl NodeFactory for SceneGraph {
    fn spawn_node(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        transform: LocalTransform,
    ) -> NodeId {
        self.add_node(name, parent, transform)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scene.rs"]
mod tests;
