//! WASM bridge for Swatch: exposes the editor session to JavaScript.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the canvas
//! page. Structured results cross the boundary as JSON strings.

use serde::Serialize;
use swatch_core::id::NodeId;
use swatch_core::model::{Framework, Size, Styling};
use swatch_core::props::PropValue;
use swatch_core::registry::Registry;
use swatch_editor::input::InputEvent;
use swatch_editor::{
    Camera, CanvasConfig, DeleteOutcome, EditorSession, VariantMode, ViewportHandle,
};
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// Owns one editor session bound to a camera sized to the host canvas.
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct SwatchCanvas {
    session: EditorSession,
    width: f32,
    height: f32,
}

#[wasm_bindgen]
impl SwatchCanvas {
    /// Create a controller for a canvas of the given size. `config_json`
    /// may be empty for defaults; malformed config falls back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: &str) -> Self {
        // Set up panic hook for better error messages in console
        console_error_panic_hook_setup();

        let config = if config_json.trim().is_empty() {
            CanvasConfig::default()
        } else {
            CanvasConfig::from_json(config_json).unwrap_or_else(|e| {
                log::warn!("{e}; using default canvas config");
                CanvasConfig::default()
            })
        };
        let camera = Camera::new(Size::new(width, height))
            .with_zoom_limits(config.min_zoom, config.max_zoom);
        let mut session = EditorSession::new(Registry::builtin(), config).with_clock(clock());
        session.set_viewport(Box::new(camera));

        Self {
            session,
            width,
            height,
        }
    }

    /// Lay out the component library onto the canvas.
    pub fn bootstrap(&mut self) {
        self.session.bootstrap();
    }

    /// Resize the canvas, keeping the current camera center and zoom.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        let state = self.camera_state();
        let config = *self.session.config();
        let mut camera = Camera::new(Size::new(width, height))
            .with_zoom_limits(config.min_zoom, config.max_zoom);
        camera.set_center(state.x, state.y, state.zoom, 0);
        self.session.set_viewport(Box::new(camera));
    }

    /// Advance camera animation. Returns `true` while it is still running.
    pub fn tick(&mut self, elapsed_ms: f32) -> bool {
        self.session.tick(elapsed_ms)
    }

    // ─── Snapshot queries ────────────────────────────────────────────────

    /// Every node on the canvas as a JSON array.
    pub fn nodes_json(&self) -> String {
        to_json(self.session.graph().nodes(), "[]")
    }

    /// Camera center and zoom as JSON `{"x":..,"y":..,"zoom":..}`.
    pub fn viewport_json(&self) -> String {
        to_json(&self.camera_state(), "null")
    }

    /// Current editor UI state as JSON.
    pub fn state_json(&self) -> String {
        let panel = self.session.panel();
        let state = UiState {
            selected: self.session.graph().selected(),
            panel_open: panel.is_open(),
            panel_instance: panel.selected_instance(),
            framework: panel.export_framework(),
            styling: panel.export_styling(),
            palette_open: self.session.palette().is_open(),
            can_undo: self.session.graph().can_undo(),
            can_redo: self.session.graph().can_redo(),
        };
        to_json(&state, "{}")
    }

    /// Preview markup for one node as JSON `{"status":..,"body":..}`.
    pub fn preview_json(&self, node_id: &str) -> String {
        match self.session.preview(NodeId::intern(node_id)) {
            Some(preview) => to_json(&preview, "null"),
            None => "null".to_string(),
        }
    }

    /// Property form rows for the open instance as a JSON array.
    pub fn form_json(&self) -> String {
        to_json(&self.session.form_fields(), "[]")
    }

    /// Drain queued user notifications as a JSON array.
    pub fn take_notifications(&mut self) -> String {
        to_json(&self.session.drain_notifications(), "[]")
    }

    // ─── Pointer & keyboard ──────────────────────────────────────────────

    /// Handle pointer down event. Returns true if anything changed.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_input(&InputEvent::from_pointer_down(x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_input(&InputEvent::from_pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_input(&InputEvent::from_pointer_up(x, y))
    }

    /// Wheel or pinch. `zoom` is a multiplicative factor (1.0 = none).
    pub fn handle_scroll(&mut self, x: f32, y: f32, dx: f32, dy: f32, zoom: f32) -> bool {
        self.session
            .handle_input(&InputEvent::Scroll { x, y, dx, dy, zoom })
    }

    /// Handle a keyboard event. Returns true if a shortcut fired.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        self.session.handle_key(key, ctrl, shift, alt, meta)
    }

    // ─── Selection & panel ───────────────────────────────────────────────

    /// Select a node and open the property panel on it.
    pub fn click_node(&mut self, node_id: &str) -> bool {
        self.session.click_node(NodeId::intern(node_id))
    }

    /// Select a node by id, or clear the selection with an empty string.
    pub fn select_by_id(&mut self, node_id: &str) -> bool {
        if node_id.is_empty() {
            return self.session.select(None);
        }
        self.session.select(Some(NodeId::intern(node_id)))
    }

    pub fn close_panel(&mut self) {
        self.session.close_panel();
    }

    /// Set the export framework (`"react"` / `"vue"`). Unknown names are ignored.
    pub fn set_export_framework(&mut self, name: &str) -> bool {
        match Framework::parse(name) {
            Some(framework) => {
                self.session.set_export_framework(framework);
                true
            }
            None => false,
        }
    }

    /// Set the export styling (`"tailwind"` / `"css"`). Unknown names are ignored.
    pub fn set_export_styling(&mut self, name: &str) -> bool {
        match Styling::parse(name) {
            Some(styling) => {
                self.session.set_export_styling(styling);
                true
            }
            None => false,
        }
    }

    /// Source for the open instance, or an empty string without one.
    pub fn export_code(&self) -> String {
        self.session.export_code().unwrap_or_default()
    }

    // ─── Prop edits ──────────────────────────────────────────────────────

    /// Set one prop from a JSON value. Returns JSON:
    /// `{"ok":true,"changed":bool}` or `{"ok":false,"error":"..."}`.
    pub fn set_prop(&mut self, node_id: &str, name: &str, value_json: &str) -> String {
        let id = NodeId::intern(node_id);
        let value = match self.parse_prop(id, name, value_json) {
            Ok(value) => value,
            Err(error) => return error_json(&error),
        };
        match self.session.edit_prop(id, name, value) {
            Ok(changed) => format!(r#"{{"ok":true,"changed":{changed}}}"#),
            Err(e) => error_json(&e.to_string()),
        }
    }

    pub fn reset_props(&mut self, node_id: &str) -> bool {
        self.session.reset_props(NodeId::intern(node_id))
    }

    // ─── Structural edits ────────────────────────────────────────────────

    /// Add a variant copying the base. Returns the new id, or empty string.
    pub fn add_variant(&mut self, component_id: &str) -> String {
        id_or_empty(
            self.session
                .add_variant(NodeId::intern(component_id), VariantMode::Default, None),
        )
    }

    /// Add a variant copying `from_id` (or the rightmost member if empty).
    pub fn duplicate_as_variant(&mut self, component_id: &str, from_id: &str) -> String {
        let from = (!from_id.is_empty()).then(|| NodeId::intern(from_id));
        id_or_empty(
            self.session
                .add_variant(NodeId::intern(component_id), VariantMode::Duplicate, from),
        )
    }

    /// Duplicate the selected node. Returns the copy's id, or empty string.
    pub fn duplicate_selected(&mut self) -> String {
        id_or_empty(self.session.duplicate_selected())
    }

    /// Protected delete. Returns `"deleted"`, `"reset"` or `"notFound"`.
    pub fn delete_node(&mut self, node_id: &str) -> String {
        match self.session.delete(NodeId::intern(node_id)) {
            DeleteOutcome::Deleted => "deleted",
            DeleteOutcome::ResetToDefaults => "reset",
            DeleteOutcome::NotFound => "notFound",
        }
        .to_string()
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    // ─── Navigation & palette ────────────────────────────────────────────

    pub fn center_on(&mut self, node_id: &str) -> bool {
        self.session.center_on(NodeId::intern(node_id))
    }

    pub fn toggle_palette(&mut self) {
        self.session.toggle_palette();
    }

    /// Search the library. Returns a JSON array of `{id,displayName,category,description}`.
    pub fn palette_search(&mut self, query: &str) -> String {
        self.session.set_palette_query(query);
        let hits: Vec<PaletteHit<'_>> = self
            .session
            .palette_results()
            .into_iter()
            .map(|d| PaletteHit {
                id: d.id,
                display_name: &d.display_name,
                category: d.category.display_name(),
                description: &d.description,
            })
            .collect();
        to_json(&hits, "[]")
    }

    pub fn choose_from_palette(&mut self, component_id: &str) -> bool {
        self.session.choose_from_palette(NodeId::intern(component_id))
    }
}

impl SwatchCanvas {
    fn camera_state(&self) -> swatch_editor::ViewportState {
        self.session
            .graph()
            .viewport()
            .map(|v| v.state())
            .unwrap_or(swatch_editor::ViewportState {
                x: self.width / 2.0,
                y: self.height / 2.0,
                zoom: 1.0,
            })
    }

    /// Decode a JSON prop value using the kind the component schema declares.
    fn parse_prop(&self, id: NodeId, name: &str, value_json: &str) -> Result<PropValue, String> {
        let raw: serde_json::Value =
            serde_json::from_str(value_json).map_err(|e| format!("invalid JSON value: {e}"))?;
        let component = self
            .session
            .instances()
            .get_instance(id)
            .map(|i| i.component_id)
            .ok_or_else(|| format!("no instance `{id}`"))?;
        let kind = self
            .session
            .registry()
            .definition(component)
            .and_then(|d| d.prop(name))
            .map(|p| p.kind)
            .ok_or_else(|| format!("component `{component}` has no prop named `{name}`"))?;
        PropValue::from_json(kind, &raw).ok_or_else(|| format!("`{value_json}` is not a valid {kind} value"))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UiState {
    selected: Option<NodeId>,
    panel_open: bool,
    panel_instance: Option<NodeId>,
    framework: Framework,
    styling: Styling,
    palette_open: bool,
    can_undo: bool,
    can_redo: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaletteHit<'a> {
    id: NodeId,
    display_name: &'a str,
    category: &'static str,
    description: &'a str,
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("serialization failed: {e}");
        fallback.to_string()
    })
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

fn id_or_empty(id: Option<NodeId>) -> String {
    id.map(|id| id.as_str().to_string()).unwrap_or_default()
}

/// Copy-id stamps come from the browser clock on wasm.
fn clock() -> swatch_editor::graph::Clock {
    #[cfg(target_arch = "wasm32")]
    {
        || js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        swatch_editor::graph::system_clock
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Swatch WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn canvas() -> SwatchCanvas {
        let mut canvas = SwatchCanvas::new(800.0, 600.0, "");
        canvas.bootstrap();
        canvas
    }

    #[test]
    fn nodes_dump_is_a_json_array() {
        let canvas = canvas();
        let nodes: serde_json::Value = serde_json::from_str(&canvas.nodes_json()).unwrap();
        let first_button = nodes
            .as_array()
            .unwrap()
            .iter()
            .find(|n| n["id"] == "button")
            .unwrap();
        assert_eq!(first_button["position"]["x"], 50.0);
    }

    #[test]
    fn set_prop_decodes_by_schema_kind() {
        let mut canvas = canvas();
        assert_eq!(
            canvas.set_prop("slider", "max", "10"),
            r#"{"ok":true,"changed":true}"#
        );
        let bad: serde_json::Value =
            serde_json::from_str(&canvas.set_prop("slider", "max", "\"ten\"")).unwrap();
        assert_eq!(bad["ok"], false);
        let unknown: serde_json::Value =
            serde_json::from_str(&canvas.set_prop("slider", "colour", "1")).unwrap();
        assert_eq!(unknown["ok"], false);
    }

    #[test]
    fn variant_delete_and_undo() {
        let mut canvas = canvas();
        assert_eq!(canvas.add_variant("button"), "button-variant-1");
        assert_eq!(canvas.delete_node("button-variant-1"), "deleted");
        assert_eq!(canvas.delete_node("avatar"), "reset");
        let notes: serde_json::Value = serde_json::from_str(&canvas.take_notifications()).unwrap();
        assert_eq!(notes[0]["level"], "warning");

        assert!(canvas.undo());
        assert!(canvas.undo());
        let state: serde_json::Value = serde_json::from_str(&canvas.state_json()).unwrap();
        assert_eq!(state["canRedo"], true);
    }

    #[test]
    fn palette_search_and_export() {
        let mut canvas = canvas();
        let hits: serde_json::Value = serde_json::from_str(&canvas.palette_search("toast")).unwrap();
        assert_eq!(hits[0]["id"], "sonner");
        assert_eq!(hits[0]["category"], "Feedback");

        assert_eq!(canvas.export_code(), "");
        assert!(canvas.click_node("badge"));
        assert!(canvas.set_export_framework("vue"));
        assert!(!canvas.set_export_styling("sass"));
        assert!(canvas.export_code().starts_with("<template>"));
    }
}
