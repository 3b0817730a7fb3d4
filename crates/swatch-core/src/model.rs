//! Canvas data model.
//!
//! The canvas is a flat, ordered list of `GraphNode`s. Component nodes
//! mirror an entry in the instance store (same id); category labels and
//! decorative blocks are layout-only and never selectable. Later nodes in
//! the list paint above earlier ones.

use crate::id::{ComponentId, NodeId};
use crate::props::Props;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Categories ──────────────────────────────────────────────────────────

/// Library section a component is filed under. Declaration order is the
/// order categories are laid out on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Form,
    DataDisplay,
    Navigation,
    Overlay,
    Feedback,
    Layout,
    Advanced,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Form,
        Category::DataDisplay,
        Category::Navigation,
        Category::Overlay,
        Category::Feedback,
        Category::Layout,
        Category::Advanced,
    ];

    /// Stable kebab-case key (used in decoration ids).
    pub fn key(&self) -> &'static str {
        match self {
            Category::Form => "form",
            Category::DataDisplay => "data-display",
            Category::Navigation => "navigation",
            Category::Overlay => "overlay",
            Category::Feedback => "feedback",
            Category::Layout => "layout",
            Category::Advanced => "advanced",
        }
    }

    /// Heading shown above the category row.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Form => "Form Components",
            Category::DataDisplay => "Data Display",
            Category::Navigation => "Navigation",
            Category::Overlay => "Overlays",
            Category::Feedback => "Feedback",
            Category::Layout => "Layout",
            Category::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_parts(pos: Position, size: Size) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Payload of a component node: a cached projection of its instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub component_id: ComponentId,
    pub props: Props,
    pub label: String,
    pub category: Category,
}

/// What a canvas node represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    /// A live component instance.
    Component(NodeData),
    /// Heading above a category row.
    CategoryLabel { category: Category, text: String },
    /// Backdrop reserving the room a component's variants will occupy.
    DecorativeBlock { component_id: ComponentId },
}

/// A positioned element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    /// Explicit size; decorative elements only. Component nodes take their
    /// size from the component size table.
    pub size: Option<Size>,
}

impl GraphNode {
    pub fn component(id: NodeId, position: Position, data: NodeData) -> Self {
        Self {
            id,
            kind: NodeKind::Component(data),
            position,
            size: None,
        }
    }

    pub fn category_label(category: Category, position: Position) -> Self {
        Self {
            id: NodeId::category_label(category.key()),
            kind: NodeKind::CategoryLabel {
                category,
                text: category.display_name().to_string(),
            },
            position,
            size: None,
        }
    }

    pub fn decorative_block(component_id: ComponentId, position: Position, size: Size) -> Self {
        Self {
            id: NodeId::block_of(component_id),
            kind: NodeKind::DecorativeBlock { component_id },
            position,
            size: Some(size),
        }
    }

    pub fn data(&self) -> Option<&NodeData> {
        match &self.kind {
            NodeKind::Component(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut NodeData> {
        match &mut self.kind {
            NodeKind::Component(data) => Some(data),
            _ => None,
        }
    }

    pub fn component_id(&self) -> Option<ComponentId> {
        self.data().map(|d| d.component_id)
    }

    /// Only component nodes can be selected or dragged.
    pub fn is_interactive(&self) -> bool {
        matches!(self.kind, NodeKind::Component(_))
    }

    /// Whether this is the base member of its variant group.
    pub fn is_base(&self) -> bool {
        self.component_id() == Some(self.id)
    }
}

/// A connection between two nodes. The canvas stores them but draws none
/// by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: NodeId,
    pub source: NodeId,
    pub target: NodeId,
}

// ─── Export targets ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Styling {
    #[default]
    Tailwind,
    Css,
}

impl Framework {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "react" => Some(Framework::React),
            "vue" => Some(Framework::Vue),
            _ => None,
        }
    }
}

impl Styling {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tailwind" => Some(Styling::Tailwind),
            "css" => Some(Styling::Css),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropValue;

    fn button_node(id: &str) -> GraphNode {
        let mut props = Props::new();
        props.insert("variant".into(), PropValue::option("default"));
        GraphNode::component(
            NodeId::intern(id),
            Position::new(50.0, 200.0),
            NodeData {
                component_id: NodeId::intern("button"),
                props,
                label: "Button".into(),
                category: Category::Form,
            },
        )
    }

    #[test]
    fn base_detection() {
        assert!(button_node("button").is_base());
        assert!(!button_node("button-variant-1").is_base());
    }

    #[test]
    fn decorations_are_not_interactive() {
        let label = GraphNode::category_label(Category::Overlay, Position::new(50.0, 50.0));
        assert_eq!(label.id.as_str(), "category-label-overlay");
        assert!(!label.is_interactive());
        assert!(label.component_id().is_none());

        let block = GraphNode::decorative_block(
            NodeId::intern("card"),
            Position::default(),
            Size::new(350.0, 200.0),
        );
        assert!(!block.is_interactive());
        assert_eq!(block.size, Some(Size::new(350.0, 200.0)));
    }

    #[test]
    fn category_order_and_names() {
        assert_eq!(Category::ALL[0], Category::Form);
        assert_eq!(Category::ALL[6], Category::Advanced);
        assert_eq!(Category::DataDisplay.key(), "data-display");
        assert_eq!(Category::Overlay.display_name(), "Overlays");
    }

    #[test]
    fn rect_edges() {
        let r = Rect::from_parts(Position::new(10.0, 20.0), Size::new(100.0, 40.0));
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 60.0);
        assert!(r.contains(10.0, 20.0));
        assert!(!r.contains(111.0, 30.0));
    }
}
