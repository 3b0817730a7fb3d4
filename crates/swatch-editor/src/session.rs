//! The editor session: one registry, one instance store, one graph store.
//!
//! `EditorSession` is the only place that touches both stores, so every
//! cross-store rule lives here:
//!
//! - prop writes go to the instance store first, then the node is refreshed
//!   from it (the graph never accepts prop edits directly);
//! - variant and duplicate operations create a matching instance;
//! - deleting a variant or copy removes its instance, while the protected
//!   base is reset in both stores and a notification is queued;
//! - after undo/redo the instance store is reconciled with the restored
//!   node array.

use crate::config::CanvasConfig;
use crate::gesture::{CanvasAction, PointerGesture};
use crate::graph::{Clock, DeleteOutcome, GraphStore, VariantMode};
use crate::input::InputEvent;
use crate::instances::{ComponentInstance, InstanceStore};
use crate::palette::CommandPalette;
use crate::panel::{EditorPanel, PropField, prop_fields};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::viewport::ViewportHandle;
use serde::Serialize;
use std::collections::HashSet;
use swatch_core::error::PropError;
use swatch_core::id::{ComponentId, NodeId};
use swatch_core::layout::{component_size, compute_layout, variant_positions};
use swatch_core::model::{Framework, GraphNode, NodeData, Position, Size, Styling};
use swatch_core::props::{PropValue, Props};
use swatch_core::registry::{ComponentDefinition, Registry};
use swatch_render::{Preview, PreviewRegistry, hit_test};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// A user-facing message queued by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug)]
pub struct EditorSession {
    registry: Registry,
    previews: PreviewRegistry,
    instances: InstanceStore,
    graph: GraphStore,
    panel: EditorPanel,
    palette: CommandPalette,
    gesture: PointerGesture,
    notifications: Vec<Notification>,
    config: CanvasConfig,
}

impl EditorSession {
    pub fn new(registry: Registry, config: CanvasConfig) -> Self {
        Self {
            registry,
            previews: PreviewRegistry::builtin(),
            instances: InstanceStore::new(),
            graph: GraphStore::new(config),
            panel: EditorPanel::new(),
            palette: CommandPalette::new(),
            gesture: PointerGesture::new(config.click_threshold),
            notifications: Vec::new(),
            config,
        }
    }

    /// Replace the clock used to stamp copy ids.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.graph.set_clock(clock);
        self
    }

    pub fn with_previews(mut self, previews: PreviewRegistry) -> Self {
        self.previews = previews;
        self
    }

    /// Lay out the whole library and populate both stores: one base node
    /// and instance per component, one heading per non-empty category and
    /// one backdrop block per component. Not a history step.
    pub fn bootstrap(&mut self) {
        let registry = &self.registry;
        let layout = compute_layout(
            registry.categories(),
            |category| registry.component_ids_in(category),
            |_| 0,
            &self.config.layout,
        );

        let mut decorations = Vec::with_capacity(layout.sections.len() + layout.blocks.len());
        let mut components = Vec::with_capacity(layout.blocks.len());
        let mut instances = InstanceStore::new();

        for section in &layout.sections {
            decorations.push(GraphNode::category_label(section.category, section.label));
        }
        for block in &layout.blocks {
            let Some(definition) = registry.definition(block.component_id) else {
                continue;
            };
            let base_size = component_size(block.component_id);
            let base_position = variant_positions(block, base_size, 0, &self.config.layout)
                .first()
                .copied()
                .unwrap_or_else(|| block.position());
            decorations.push(GraphNode::decorative_block(
                block.component_id,
                block.position(),
                Size::new(block.width, block.height),
            ));
            components.push(GraphNode::component(
                block.component_id,
                base_position,
                NodeData {
                    component_id: block.component_id,
                    props: definition.default_props.clone(),
                    label: definition.display_name.clone(),
                    category: definition.category,
                },
            ));
            instances.add_instance(ComponentInstance::new(
                block.component_id,
                block.component_id,
                definition.default_props.clone(),
            ));
        }

        decorations.extend(components);
        log::debug!(
            "bootstrap: {} nodes, {} instances, canvas height {}",
            decorations.len(),
            instances.len(),
            layout.total_height
        );
        self.instances = instances;
        self.panel.close_panel();
        self.graph.select_node(None);
        self.graph.set_nodes(decorations);
    }

    pub fn set_viewport(&mut self, viewport: Box<dyn ViewportHandle>) {
        self.graph.set_viewport(viewport);
    }

    /// Advance viewport animation. Returns whether it is still running.
    pub fn tick(&mut self, elapsed_ms: f32) -> bool {
        self.graph
            .viewport_mut()
            .is_some_and(|viewport| viewport.tick(elapsed_ms))
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn instances(&self) -> &InstanceStore {
        &self.instances
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn panel(&self) -> &EditorPanel {
        &self.panel
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ─── Selection & panel ───────────────────────────────────────────────

    /// Select a component node and open the panel on its instance.
    pub fn click_node(&mut self, id: NodeId) -> bool {
        if !self.graph.select_node(Some(id)) {
            return false;
        }
        self.panel.open_panel(id);
        true
    }

    pub fn select(&mut self, id: Option<NodeId>) -> bool {
        self.graph.select_node(id)
    }

    pub fn close_panel(&mut self) {
        self.panel.close_panel();
    }

    pub fn set_export_framework(&mut self, framework: Framework) {
        self.panel.set_export_framework(framework);
    }

    pub fn set_export_styling(&mut self, styling: Styling) {
        self.panel.set_export_styling(styling);
    }

    /// Property form rows for the instance open in the panel.
    pub fn form_fields(&self) -> Vec<PropField<'_>> {
        let Some((instance, definition)) = self.open_instance() else {
            return Vec::new();
        };
        prop_fields(definition, &instance.props)
    }

    /// Source for the open instance in the chosen framework and styling.
    pub fn export_code(&self) -> Option<String> {
        let (instance, definition) = self.open_instance()?;
        Some(swatch_export::export(
            definition,
            &instance.props,
            self.panel.export_framework(),
            self.panel.export_styling(),
        ))
    }

    fn open_instance(&self) -> Option<(&ComponentInstance, &ComponentDefinition)> {
        let instance = self.instances.get_instance(self.panel.selected_instance()?)?;
        let definition = self.registry.definition(instance.component_id)?;
        Some((instance, definition))
    }

    /// Live preview of a component node from its cached props.
    pub fn preview(&self, id: NodeId) -> Option<Preview> {
        let data = self.graph.node(id)?.data()?;
        Some(self.previews.render(data.component_id, &data.props))
    }

    // ─── Prop edits ──────────────────────────────────────────────────────

    /// Write one prop. Unknown instances are a silent no-op (`Ok(false)`);
    /// values the schema rejects leave both stores untouched.
    pub fn edit_prop(&mut self, id: NodeId, name: &str, value: PropValue) -> Result<bool, PropError> {
        let Some(instance) = self.instances.get_instance(id) else {
            return Ok(false);
        };
        let component = instance.component_id;
        let definition = self
            .registry
            .definition(component)
            .ok_or(PropError::UnknownComponent(component))?;
        definition.check_prop(name, &value)?;

        let mut partial = Props::new();
        partial.insert(name.to_string(), value);
        self.instances.update_instance(id, &partial);
        Ok(self.sync_node(id))
    }

    pub fn edit_selected_prop(&mut self, name: &str, value: PropValue) -> Result<bool, PropError> {
        match self.panel.selected_instance() {
            Some(id) => self.edit_prop(id, name, value),
            None => Ok(false),
        }
    }

    /// Write every component default back onto an instance through the
    /// same merge as a form edit. Props without a default keep their value.
    pub fn reset_props(&mut self, id: NodeId) -> bool {
        let Some(definition) = self
            .instances
            .get_instance(id)
            .and_then(|i| self.registry.definition(i.component_id))
        else {
            return false;
        };
        let defaults = definition.default_props.clone();
        if let Err(err) = definition.check_props(&defaults) {
            log::warn!("reset of {id} skipped: {err}");
            return false;
        }
        self.instances.update_instance(id, &defaults);
        self.sync_node(id)
    }

    fn sync_node(&mut self, id: NodeId) -> bool {
        match self.instances.get_instance(id) {
            Some(instance) => self.graph.refresh_from_instance(instance),
            None => false,
        }
    }

    // ─── Structural edits ────────────────────────────────────────────────

    pub fn add_variant(
        &mut self,
        component: ComponentId,
        mode: VariantMode,
        from: Option<NodeId>,
    ) -> Option<NodeId> {
        let id = self.graph.add_variant(component, mode, from)?;
        self.adopt_node(id);
        Some(id)
    }

    pub fn duplicate(&mut self, id: NodeId) -> Option<NodeId> {
        let copy = self.graph.duplicate_node(id)?;
        self.adopt_node(copy);
        Some(copy)
    }

    pub fn duplicate_selected(&mut self) -> Option<NodeId> {
        self.duplicate(self.graph.selected()?)
    }

    /// Register an instance for a node the graph just created.
    fn adopt_node(&mut self, id: NodeId) {
        if let Some(data) = self.graph.node(id).and_then(|n| n.data()) {
            self.instances.add_instance(ComponentInstance::new(
                id,
                data.component_id,
                data.props.clone(),
            ));
        }
    }

    /// Protected delete. Removing the last instance of a component resets
    /// it instead and queues a warning.
    pub fn delete(&mut self, id: NodeId) -> DeleteOutcome {
        let outcome = self.graph.protected_delete_node(id, &self.registry);
        match outcome {
            DeleteOutcome::Deleted => {
                if self.instances.get_instance(id).is_some_and(|i| !i.is_base()) {
                    self.instances.delete_instance(id);
                }
                if self.panel.selected_instance() == Some(id) {
                    self.panel.close_panel();
                }
            }
            DeleteOutcome::ResetToDefaults => {
                let definition = self.registry.definition(id);
                let defaults = definition.map(|d| d.default_props.clone()).unwrap_or_default();
                self.instances.replace_props(id, defaults);
                let name = definition.map_or(id.as_str(), |d| d.display_name.as_str());
                self.notifications.push(Notification {
                    level: NotificationLevel::Warning,
                    message: format!(
                        "{name} is the only instance of its component and can't be deleted. Its props were reset to defaults."
                    ),
                });
            }
            DeleteOutcome::NotFound => {}
        }
        outcome
    }

    pub fn delete_selected(&mut self) -> Option<DeleteOutcome> {
        Some(self.delete(self.graph.selected()?))
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let changed = self.graph.undo();
        if changed {
            self.reconcile();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.graph.redo();
        if changed {
            self.reconcile();
        }
        changed
    }

    /// Bring the instance store in line with the live node array: upsert
    /// every component node's props, drop non-base instances without a node.
    fn reconcile(&mut self) {
        let mut live = HashSet::new();
        for node in self.graph.nodes() {
            let Some(data) = node.data() else {
                continue;
            };
            live.insert(node.id);
            if self.instances.contains(node.id) {
                self.instances.replace_props(node.id, data.props.clone());
            } else {
                self.instances.add_instance(ComponentInstance::new(
                    node.id,
                    data.component_id,
                    data.props.clone(),
                ));
            }
        }
        self.instances
            .retain(|instance| instance.is_base() || live.contains(&instance.id));

        if self
            .panel
            .selected_instance()
            .is_some_and(|id| !live.contains(&id))
        {
            self.panel.close_panel();
        }
        log::trace!("reconciled {} instances with {} nodes", self.instances.len(), live.len());
    }

    // ─── Navigation ──────────────────────────────────────────────────────

    pub fn center_on(&mut self, id: NodeId) -> bool {
        self.graph.center_on_node(id, None)
    }

    pub fn toggle_palette(&mut self) {
        self.palette.toggle();
    }

    pub fn set_palette_query(&mut self, query: &str) {
        self.palette.set_query(query);
    }

    pub fn palette_results(&self) -> Vec<&ComponentDefinition> {
        self.palette.results(&self.registry)
    }

    /// Jump to a component chosen in the palette and close it.
    pub fn choose_from_palette(&mut self, component: ComponentId) -> bool {
        self.palette.close();
        self.graph.center_on_node(component, Some(1.0))
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Dispatch a key press. Returns whether a binding fired.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return false;
        };
        log::trace!("shortcut {key} -> {action:?}");
        match action {
            // The panel's text fields own Backspace while it is open
            ShortcutAction::Delete if self.panel.is_open() => false,
            ShortcutAction::Delete => self.delete_selected().is_some(),
            ShortcutAction::Duplicate => self.duplicate_selected().is_some(),
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::TogglePalette => {
                self.palette.toggle();
                true
            }
            ShortcutAction::Dismiss => {
                if self.palette.is_open() {
                    self.palette.close();
                } else {
                    self.panel.close_panel();
                    self.graph.select_node(None);
                }
                true
            }
        }
    }

    /// Feed one input event through hit testing and the gesture
    /// interpreter. Returns whether anything changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::Key {
            key,
            ctrl,
            shift,
            alt,
            meta,
        } = event
        {
            return self.handle_key(key, *ctrl, *shift, *alt, *meta);
        }

        let hit = match event {
            InputEvent::PointerDown { x, y, .. } => {
                let p = self.to_canvas(*x, *y);
                hit_test(self.graph.nodes(), p.x, p.y)
            }
            _ => None,
        };
        let zoom = self.graph.viewport().map_or(1.0, |v| v.state().zoom);
        let actions = self.gesture.handle(event, hit, zoom);

        let mut changed = false;
        for action in actions {
            changed |= self.apply(action);
        }
        changed
    }

    fn to_canvas(&self, sx: f32, sy: f32) -> Position {
        self.graph
            .viewport()
            .map_or(Position::new(sx, sy), |v| v.screen_to_canvas(sx, sy))
    }

    fn apply(&mut self, action: CanvasAction) -> bool {
        match action {
            CanvasAction::MoveNode { id, dx, dy } => self.graph.move_node(id, dx, dy),
            CanvasAction::Pan { dx, dy } => match self.graph.viewport_mut() {
                Some(viewport) => {
                    viewport.pan_by(dx, dy);
                    true
                }
                None => false,
            },
            CanvasAction::Zoom { factor, x, y } => match self.graph.viewport_mut() {
                Some(viewport) => {
                    viewport.zoom_at(factor, x, y);
                    true
                }
                None => false,
            },
            CanvasAction::Click(id) => self.click_node(id),
            CanvasAction::ClearSelection => {
                let had_selection = self.graph.selected().is_some() || self.panel.is_open();
                self.graph.select_node(None);
                self.panel.close_panel();
                had_selection
            }
        }
    }
}
