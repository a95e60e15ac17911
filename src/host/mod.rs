//! Narrow interface to the host scene graph.
//!
//! pageflow never renders anything itself; it toggles and moves nodes that live in the
//! application's toolkit through [`NodeHost`].

pub(crate) mod scene;

use crate::foundation::core::{LocalTransform, NodeId};

/// Operations pageflow needs from the host scene graph.
///
/// Calls addressing a node the host does not know about should be ignored by the
/// implementation; pageflow treats every call as infallible.
pub trait NodeHost {
    /// Enable or disable a node (and, by host convention, its subtree).
    fn set_active(&mut self, node: NodeId, active: bool);

    /// Current enabled flag of the node itself.
    fn is_active(&self, node: NodeId) -> bool;

    /// Current local transform, `None` for unknown nodes.
    fn local_transform(&self, node: NodeId) -> Option<LocalTransform>;

    fn set_local_transform(&mut self, node: NodeId, transform: LocalTransform);

    /// Group opacity in `[0, 1]`.
    fn set_opacity(&mut self, node: NodeId, opacity: f64);

    fn set_interactable(&mut self, node: NodeId, interactable: bool);

    fn set_blocks_input(&mut self, node: NodeId, blocks: bool);

    /// Move the node to the end of its parent's child list so it renders above its siblings.
    fn set_as_last_sibling(&mut self, node: NodeId);
}

/// Node creation, used by the configuration loader to materialize pages and elements.
pub trait NodeFactory {
    fn spawn_node(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        transform: LocalTransform,
    ) -> NodeId;
}
