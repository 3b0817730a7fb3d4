//! Property panel state.
//!
//! Tracks which instance is being edited and the export target. The panel
//! never writes props itself: edits go through `EditorSession::edit_prop`,
//! which updates the instance store first and then refreshes the node.

use serde::Serialize;
use swatch_core::id::NodeId;
use swatch_core::model::{Framework, Styling};
use swatch_core::props::{PropDefinition, PropValue, Props};
use swatch_core::registry::ComponentDefinition;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorPanel {
    is_open: bool,
    selected_instance: Option<NodeId>,
    export_framework: Framework,
    export_styling: Styling,
}

impl EditorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_panel(&mut self, instance: NodeId) {
        self.is_open = true;
        self.selected_instance = Some(instance);
    }

    pub fn close_panel(&mut self) {
        self.is_open = false;
        self.selected_instance = None;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn selected_instance(&self) -> Option<NodeId> {
        self.selected_instance
    }

    pub fn export_framework(&self) -> Framework {
        self.export_framework
    }

    pub fn export_styling(&self) -> Styling {
        self.export_styling
    }

    pub fn set_export_framework(&mut self, framework: Framework) {
        self.export_framework = framework;
    }

    pub fn set_export_styling(&mut self, styling: Styling) {
        self.export_styling = styling;
    }
}

/// One row of the property form: the schema entry and the value to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropField<'a> {
    pub definition: &'a PropDefinition,
    /// The instance's value, else the schema default.
    pub value: Option<&'a PropValue>,
}

/// Form rows for an instance, in schema order.
pub fn prop_fields<'a>(definition: &'a ComponentDefinition, props: &'a Props) -> Vec<PropField<'a>> {
    definition
        .props
        .iter()
        .map(|p| PropField {
            definition: p,
            value: definition.value_or_default(props, &p.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_core::id::ComponentId;
    use swatch_core::registry::Registry;

    #[test]
    fn open_and_close() {
        let mut panel = EditorPanel::new();
        assert!(!panel.is_open());
        assert_eq!(panel.export_framework(), Framework::React);
        assert_eq!(panel.export_styling(), Styling::Tailwind);

        let id = NodeId::intern("button-variant-1");
        panel.open_panel(id);
        assert!(panel.is_open());
        assert_eq!(panel.selected_instance(), Some(id));

        panel.close_panel();
        assert!(!panel.is_open());
        assert_eq!(panel.selected_instance(), None);
    }

    #[test]
    fn export_target_survives_close() {
        let mut panel = EditorPanel::new();
        panel.set_export_framework(Framework::Vue);
        panel.set_export_styling(Styling::Css);
        panel.close_panel();
        assert_eq!(panel.export_framework(), Framework::Vue);
        assert_eq!(panel.export_styling(), Styling::Css);
    }

    #[test]
    fn fields_fall_back_to_schema_defaults() {
        let registry = Registry::builtin();
        let input = registry.definition(ComponentId::intern("input")).unwrap();
        let mut props = Props::new();
        props.insert("type".into(), PropValue::option("email"));

        let fields = prop_fields(input, &props);
        let names: Vec<&str> = fields.iter().map(|f| f.definition.name.as_str()).collect();
        assert_eq!(names, vec!["type", "placeholder", "disabled"]);
        assert_eq!(fields[0].value, Some(&PropValue::option("email")));
        assert_eq!(fields[2].value, Some(&PropValue::Bool(false)));
    }
}
