//! Hit testing: point → node lookup.
//!
//! Reverse-walks the node list (front-to-back) to find which component
//! node is at a given (x, y) canvas position. Decorations are skipped.

use swatch_core::id::NodeId;
use swatch_core::layout::component_size;
use swatch_core::model::{GraphNode, NodeKind, Rect, Size};

/// Canvas bounds of a node. Component nodes take their size from the
/// component size table, decorations from their explicit size.
pub fn node_bounds(node: &GraphNode) -> Rect {
    let size = match (&node.kind, node.size) {
        (_, Some(size)) => size,
        (NodeKind::Component(data), None) => component_size(data.component_id),
        (_, None) => Size::default(),
    };
    Rect::from_parts(node.position, size)
}

/// Find the topmost component node at position (px, py).
/// Returns `None` if no node is hit (background).
pub fn hit_test(nodes: &[GraphNode], px: f32, py: f32) -> Option<NodeId> {
    // Last painted = topmost
    nodes
        .iter()
        .rev()
        .filter(|n| n.is_interactive())
        .find(|n| node_bounds(n).contains(px, py))
        .map(|n| n.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_core::model::{Category, NodeData, Position};
    use swatch_core::props::Props;

    fn component(id: &str, component: &str, x: f32, y: f32) -> GraphNode {
        GraphNode::component(
            NodeId::intern(id),
            Position::new(x, y),
            NodeData {
                component_id: NodeId::intern(component),
                props: Props::new(),
                label: component.to_string(),
                category: Category::Form,
            },
        )
    }

    #[test]
    fn hit_test_basic() {
        let nodes = vec![
            component("button", "button", 10.0, 10.0),
            component("input", "input", 200.0, 200.0),
        ];
        assert_eq!(hit_test(&nodes, 50.0, 30.0), Some(NodeId::intern("button")));
        assert_eq!(hit_test(&nodes, 250.0, 220.0), Some(NodeId::intern("input")));
        assert_eq!(hit_test(&nodes, 150.0, 150.0), None);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let nodes = vec![
            component("button", "button", 0.0, 0.0),
            component("button-copy-1", "button", 20.0, 0.0),
        ];
        assert_eq!(
            hit_test(&nodes, 50.0, 20.0),
            Some(NodeId::intern("button-copy-1"))
        );
    }

    #[test]
    fn decorations_are_never_hit() {
        let nodes = vec![
            GraphNode::decorative_block(
                NodeId::intern("card"),
                Position::new(0.0, 0.0),
                Size::new(500.0, 500.0),
            ),
            GraphNode::category_label(Category::Form, Position::new(0.0, 0.0)),
        ];
        assert_eq!(hit_test(&nodes, 10.0, 10.0), None);
        assert_eq!(node_bounds(&nodes[0]).width, 500.0);
    }
}
