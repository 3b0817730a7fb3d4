//! Canvas graph store.
//!
//! Holds the positioned node array, edges, selection, an optional viewport
//! binding and the undo history. Component nodes are grouped by their
//! `component_id` into variant groups: the base member's id equals the
//! component id, the others are `<cid>-variant-<n>` or `<id>-copy-<ms>`.
//!
//! ## History
//!
//! Every structural edit (update, refresh, variant, duplicate, delete,
//! reset) commits a snapshot of the resulting array. Bulk `set_nodes` and
//! drag moves do not; instead, before the next edit or undo the live array
//! is compared with the snapshot under the cursor and checkpointed first if
//! it drifted. That way `undo` always lands on the exact array that
//! preceded the edit being undone.

use crate::config::CanvasConfig;
use crate::history::History;
use crate::instances::ComponentInstance;
use crate::viewport::ViewportHandle;
use smallvec::SmallVec;
use swatch_core::id::{ComponentId, NodeId};
use swatch_core::model::{GraphEdge, GraphNode, NodeData, NodeKind, Position, Size};
use swatch_core::props::Props;
use swatch_core::registry::Registry;

/// Millisecond wall-clock source used to stamp copy ids.
pub type Clock = fn() -> u64;

/// Wall-clock milliseconds since the Unix epoch (0 if the clock is unset).
pub fn system_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// How `add_variant` picks the props to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantMode {
    /// Copy the base member's props.
    #[default]
    Default,
    /// Copy the props of a given member (fallback: the rightmost one).
    Duplicate,
}

/// Result of a user-facing delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The node was the sole base instance; its props were reset instead.
    ResetToDefaults,
    NotFound,
}

/// Partial update for `update_node`. Props are not updatable here; they
/// flow in through `refresh_from_instance`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub label: Option<String>,
}

pub struct GraphStore {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    selected: Option<NodeId>,
    viewport: Option<Box<dyn ViewportHandle>>,
    history: History,
    config: CanvasConfig,
    clock: Clock,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("selected", &self.selected)
            .field("viewport", &self.viewport.as_ref().map(|v| v.state()))
            .field("history", &self.history.len())
            .finish()
    }
}

impl GraphStore {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            selected: None,
            viewport: None,
            history: History::new(config.history_depth),
            config,
            clock: system_clock,
        }
    }

    /// Replace the clock used for copy-id stamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn position_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Component nodes whose data points at `component`, in array order.
    pub fn variant_group(&self, component: ComponentId) -> SmallVec<[&GraphNode; 4]> {
        self.nodes
            .iter()
            .filter(|n| n.component_id() == Some(component))
            .collect()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || (self.drifted() && !self.history.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.drifted() && self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, viewport: Box<dyn ViewportHandle>) {
        self.viewport = Some(viewport);
    }

    pub fn viewport(&self) -> Option<&dyn ViewportHandle> {
        self.viewport.as_deref()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut (dyn ViewportHandle + 'static)> {
        self.viewport.as_deref_mut()
    }

    /// Animate the viewport onto a node: its position offset by half the
    /// approximate node footprint. No-op without a viewport or node.
    pub fn center_on_node(&mut self, id: NodeId, zoom: Option<f32>) -> bool {
        let Some(pos) = self.node(id).map(|n| n.position) else {
            return false;
        };
        let config = self.config;
        let Some(viewport) = self.viewport.as_deref_mut() else {
            return false;
        };
        viewport.set_center(
            pos.x + config.center_offset_x,
            pos.y + config.center_offset_y,
            zoom.unwrap_or(config.default_zoom),
            config.center_duration_ms,
        );
        true
    }

    // ─── Bulk replace (no history) ───────────────────────────────────────

    pub fn set_nodes(&mut self, nodes: Vec<GraphNode>) {
        self.nodes = nodes;
        if self.selected.is_some_and(|id| self.node(id).is_none()) {
            self.selected = None;
        }
    }

    pub fn set_edges(&mut self, edges: Vec<GraphEdge>) {
        self.edges = edges;
    }

    /// Drag a component node by a canvas delta. Like `set_nodes`, this is
    /// not a history step on its own.
    pub fn move_node(&mut self, id: NodeId, dx: f32, dy: f32) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id && n.is_interactive()) {
            Some(node) => {
                node.position = node.position.offset(dx, dy);
                true
            }
            None => false,
        }
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select a component node, or clear with `None`. Decorations and
    /// unknown ids are ignored.
    pub fn select_node(&mut self, id: Option<NodeId>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) => {
                if self.node(id).is_some_and(|n| n.is_interactive()) {
                    self.selected = Some(id);
                    true
                } else {
                    false
                }
            }
        }
    }

    // ─── Structural edits ────────────────────────────────────────────────

    fn drifted(&self) -> bool {
        self.history.current() != Some(self.nodes.as_slice())
    }

    /// Record the live array if history doesn't already end on it.
    fn checkpoint(&mut self) {
        if self.drifted() {
            self.history.push(self.nodes.clone());
        }
    }

    fn commit(&mut self) {
        self.history.push(self.nodes.clone());
    }

    pub fn update_node(&mut self, id: NodeId, update: NodeUpdate) -> bool {
        let Some(i) = self.position_of(id) else {
            return false;
        };
        self.checkpoint();
        let node = &mut self.nodes[i];
        if let Some(position) = update.position {
            node.position = position;
        }
        if let Some(size) = update.size {
            node.size = Some(size);
        }
        if let Some(label) = update.label {
            match &mut node.kind {
                NodeKind::Component(data) => data.label = label,
                NodeKind::CategoryLabel { text, .. } => *text = label,
                NodeKind::DecorativeBlock { .. } => {}
            }
        }
        self.commit();
        true
    }

    /// Pull an instance's current props into its node's cached copy.
    /// Commits history only when the props actually changed.
    pub fn refresh_from_instance(&mut self, instance: &ComponentInstance) -> bool {
        let Some(i) = self.position_of(instance.id) else {
            return false;
        };
        if self.nodes[i].data().is_none_or(|d| d.props == instance.props) {
            return false;
        }
        self.checkpoint();
        if let Some(data) = self.nodes[i].data_mut() {
            data.props = instance.props.clone();
        }
        self.commit();
        true
    }

    /// Remove any node by id, without protection.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let Some(i) = self.position_of(id) else {
            return false;
        };
        self.checkpoint();
        self.nodes.remove(i);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.commit();
        true
    }

    /// User-facing delete. The sole base member of a variant group is never
    /// removed; its props are reset to the component defaults instead.
    pub fn protected_delete_node(&mut self, id: NodeId, registry: &Registry) -> DeleteOutcome {
        let Some(component) = self.node(id).and_then(|n| n.component_id()) else {
            return DeleteOutcome::NotFound;
        };
        let group_size = self.variant_group(component).len();

        if group_size == 1 && id == component {
            let defaults = registry
                .definition(component)
                .map(|d| d.default_props.clone())
                .unwrap_or_default();
            self.reset_props(id, defaults);
            log::warn!("{id} is the last instance of its component; reset to defaults");
            return DeleteOutcome::ResetToDefaults;
        }

        self.delete_node(id);
        log::debug!("deleted {id} ({} left in group)", group_size - 1);
        DeleteOutcome::Deleted
    }

    fn reset_props(&mut self, id: NodeId, props: Props) {
        let Some(i) = self.position_of(id) else {
            return;
        };
        self.checkpoint();
        if let Some(data) = self.nodes[i].data_mut() {
            data.props = props;
        }
        self.commit();
    }

    /// First free `<id>-copy-<ms>` id, bumping the stamp on collision.
    fn copy_id(&self, id: NodeId) -> NodeId {
        let mut stamp = (self.clock)();
        loop {
            let candidate = NodeId::copy_of(id, stamp);
            if self.node(candidate).is_none() {
                return candidate;
            }
            stamp += 1;
        }
    }

    /// Clone a component node under a fresh copy id, offset diagonally, and
    /// append it. Returns the new id.
    pub fn duplicate_node(&mut self, id: NodeId) -> Option<NodeId> {
        let source = self.node(id).filter(|n| n.is_interactive())?;
        let offset = self.config.duplicate_offset;
        let mut copy = source.clone();
        copy.id = self.copy_id(id);
        copy.position = copy.position.offset(offset, offset);

        let new_id = copy.id;
        self.checkpoint();
        self.nodes.push(copy);
        self.commit();
        log::debug!("duplicated {id} as {new_id}");
        Some(new_id)
    }

    /// Append a new variant to `component`'s group, to the right of the
    /// rightmost member and aligned with the base row. Returns the new id.
    pub fn add_variant(
        &mut self,
        component: ComponentId,
        mode: VariantMode,
        from: Option<NodeId>,
    ) -> Option<NodeId> {
        let (node, id, source_id) = {
            let group = self.variant_group(component);
            let base = group
                .iter()
                .find(|n| n.id == component)
                .or_else(|| group.first())
                .copied()?;
            let last = group.iter().fold(base, |acc, &n| {
                if n.position.x > acc.position.x { n } else { acc }
            });
            // Only members of this group can seed a duplicate.
            let source = match mode {
                VariantMode::Default => base,
                VariantMode::Duplicate => from
                    .and_then(|id| group.iter().find(|n| n.id == id).copied())
                    .unwrap_or(last),
            };
            let base_data = base.data()?;

            let mut index = 1 + group.iter().filter(|n| n.id.is_variant_of(component)).count();
            let mut id = NodeId::variant_of(component, index);
            while self.node(id).is_some() {
                index += 1;
                id = NodeId::variant_of(component, index);
            }

            let node = GraphNode::component(
                id,
                Position::new(last.position.x + self.config.variant_offset_x, base.position.y),
                NodeData {
                    component_id: component,
                    props: source.data().map(|d| d.props.clone()).unwrap_or_default(),
                    label: format!("{} • Variant {index}", base_data.label),
                    category: base_data.category,
                },
            );
            (node, id, source.id)
        };

        self.checkpoint();
        self.nodes.push(node);
        self.commit();
        log::debug!("added variant {id} from {source_id}");
        Some(id)
    }

    // ─── Undo / redo ─────────────────────────────────────────────────────

    /// Step back one snapshot. Uncommitted drag moves count as a step of
    /// their own. Returns whether the live array changed.
    pub fn undo(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        self.checkpoint();
        match self.history.undo() {
            Some(snapshot) => {
                let nodes = snapshot.to_vec();
                self.set_nodes(nodes);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns whether the live array changed.
    pub fn redo(&mut self) -> bool {
        if self.drifted() {
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                let nodes = snapshot.to_vec();
                self.set_nodes(nodes);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_core::model::Category;
    use swatch_core::props::PropValue;

    fn base(id: &str, x: f32) -> GraphNode {
        let mut props = Props::new();
        props.insert("variant".into(), PropValue::option("default"));
        GraphNode::component(
            NodeId::intern(id),
            Position::new(x, 200.0),
            NodeData {
                component_id: NodeId::intern(id),
                props,
                label: "Button".into(),
                category: Category::Form,
            },
        )
    }

    fn store() -> GraphStore {
        let mut store = GraphStore::default().with_clock(|| 1_000);
        store.set_nodes(vec![
            GraphNode::category_label(Category::Form, Position::new(50.0, 50.0)),
            base("button", 50.0),
        ]);
        store
    }

    #[test]
    fn add_variant_positions_right_of_group() {
        let mut store = store();
        let button = NodeId::intern("button");
        let v1 = store.add_variant(button, VariantMode::Default, None).unwrap();
        assert_eq!(v1.as_str(), "button-variant-1");
        let node = store.node(v1).unwrap();
        assert_eq!(node.position, Position::new(464.0, 200.0));
        assert_eq!(node.data().unwrap().label, "Button • Variant 1");

        let v2 = store.add_variant(button, VariantMode::Default, None).unwrap();
        assert_eq!(v2.as_str(), "button-variant-2");
        assert_eq!(store.node(v2).unwrap().position.x, 878.0);
    }

    #[test]
    fn add_variant_unknown_component_is_noop() {
        let mut store = store();
        assert_eq!(
            store.add_variant(NodeId::intern("calendar"), VariantMode::Default, None),
            None
        );
        assert!(store.history().is_empty());
    }

    #[test]
    fn variant_index_skips_taken_ids() {
        let mut store = store();
        let button = NodeId::intern("button");
        store.add_variant(button, VariantMode::Default, None);
        store.add_variant(button, VariantMode::Default, None);
        store.delete_node(NodeId::intern("button-variant-1"));
        // One variant left → index 2 is taken, so 3 is used.
        let v = store.add_variant(button, VariantMode::Default, None).unwrap();
        assert_eq!(v.as_str(), "button-variant-3");
    }

    #[test]
    fn duplicate_ids_are_unique_within_a_millisecond() {
        let mut store = store();
        let button = NodeId::intern("button");
        let a = store.duplicate_node(button).unwrap();
        let b = store.duplicate_node(button).unwrap();
        assert_eq!(a.as_str(), "button-copy-1000");
        assert_eq!(b.as_str(), "button-copy-1001");
        assert_eq!(store.node(a).unwrap().position, Position::new(100.0, 250.0));
    }

    #[test]
    fn decorations_cannot_be_selected_or_duplicated() {
        let mut store = store();
        let label = NodeId::intern("category-label-form");
        assert!(!store.select_node(Some(label)));
        assert_eq!(store.selected(), None);
        assert_eq!(store.duplicate_node(label), None);
        assert!(!store.move_node(label, 5.0, 5.0));
    }

    #[test]
    fn delete_clears_selection() {
        let mut store = store();
        let button = NodeId::intern("button");
        let v1 = store.add_variant(button, VariantMode::Default, None).unwrap();
        store.select_node(Some(v1));
        assert_eq!(store.selected(), Some(v1));
        assert!(store.delete_node(v1));
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn refresh_without_change_skips_history() {
        let mut store = store();
        let node = store.node(NodeId::intern("button")).unwrap();
        let instance = ComponentInstance::new(
            node.id,
            node.id,
            node.data().unwrap().props.clone(),
        );
        assert!(!store.refresh_from_instance(&instance));
        assert!(store.history().is_empty());
    }

    #[test]
    fn undo_covers_uncommitted_drag() {
        let mut store = store();
        let button = NodeId::intern("button");
        store.update_node(button, NodeUpdate { label: Some("Primary".into()), ..Default::default() });
        let after_update = store.nodes().to_vec();

        store.move_node(button, 30.0, 0.0);
        assert!(store.can_undo());
        assert!(!store.can_redo());

        assert!(store.undo());
        assert_eq!(store.nodes(), after_update.as_slice());
        assert!(store.undo());
        assert_eq!(store.node(button).unwrap().data().unwrap().label, "Button");
    }

    #[test]
    fn center_without_viewport_is_noop() {
        let mut store = store();
        assert!(!store.center_on_node(NodeId::intern("button"), None));
    }
}
