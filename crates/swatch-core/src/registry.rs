//! The component catalog.
//!
//! An immutable, ordered list of component definitions with an id index.
//! Registration order inside a category is the left-to-right order used by
//! the layout calculator.

use crate::error::{PropError, RegistryError};
use crate::id::ComponentId;
use crate::model::Category;
use crate::props::{PropDefinition, PropValue, Props};
use serde::Serialize;
use std::collections::HashMap;

/// Static description of one library component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub id: ComponentId,
    /// Export symbol, e.g. `RadioGroup`.
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub category: Category,
    pub props: Vec<PropDefinition>,
    pub default_props: Props,
    /// Whether the component wraps child content.
    pub has_children: bool,
}

impl ComponentDefinition {
    pub fn prop(&self, name: &str) -> Option<&PropDefinition> {
        self.props.iter().find(|p| p.name == name)
    }

    /// Validate a single prop write against this component's schema.
    pub fn check_prop(&self, name: &str, value: &PropValue) -> Result<(), PropError> {
        let def = self.prop(name).ok_or_else(|| PropError::UnknownProp {
            component: self.id,
            prop: name.to_string(),
        })?;
        def.check(value)
    }

    /// Validate every entry of a partial prop bag.
    pub fn check_props(&self, props: &Props) -> Result<(), PropError> {
        props
            .iter()
            .try_for_each(|(name, value)| self.check_prop(name, value))
    }

    /// Current value of `name`: the explicit prop, else the schema default.
    pub fn value_or_default<'a>(&'a self, props: &'a Props, name: &str) -> Option<&'a PropValue> {
        props
            .get(name)
            .or_else(|| self.prop(name).and_then(|p| p.default.as_ref()))
    }
}

/// Ordered component catalog with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct Registry {
    components: Vec<ComponentDefinition>,
    index: HashMap<ComponentId, usize>,
}

impl Registry {
    /// Build a registry, enforcing id uniqueness and default/schema agreement.
    pub fn from_definitions(components: Vec<ComponentDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(components.len());
        for (i, def) in components.iter().enumerate() {
            if index.insert(def.id, i).is_some() {
                return Err(RegistryError::DuplicateId(def.id));
            }
            for (prop, value) in &def.default_props {
                let schema = def.prop(prop).ok_or_else(|| RegistryError::UndeclaredDefault {
                    component: def.id,
                    prop: prop.clone(),
                })?;
                schema
                    .check(value)
                    .map_err(|source| RegistryError::InvalidDefault {
                        component: def.id,
                        prop: prop.clone(),
                        source,
                    })?;
            }
        }
        Ok(Self { components, index })
    }

    /// The built-in component library.
    pub fn builtin() -> Self {
        let components = builtin_definitions();
        let index = components
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id, i))
            .collect();
        Self { components, index }
    }

    /// Categories in layout order.
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Components of `category` in registration order.
    pub fn components_in(&self, category: Category) -> impl Iterator<Item = &ComponentDefinition> {
        self.components
            .iter()
            .filter(move |c| c.category == category)
    }

    /// Ids of `category`'s components in registration order.
    pub fn component_ids_in(&self, category: Category) -> Vec<ComponentId> {
        self.components_in(category).map(|c| c.id).collect()
    }

    pub fn definition(&self, id: ComponentId) -> Option<&ComponentDefinition> {
        self.index.get(&id).map(|&i| &self.components[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Case-insensitive match on display name or description.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&ComponentDefinition> {
        let needle = query.trim().to_lowercase();
        self.components
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.display_name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ─── Built-in catalog ────────────────────────────────────────────────────

struct Def {
    id: &'static str,
    name: &'static str,
    display: &'static str,
    category: Category,
    description: &'static str,
    children: bool,
}

fn define(
    d: Def,
    props: Vec<PropDefinition>,
    defaults: &[(&str, PropValue)],
) -> ComponentDefinition {
    ComponentDefinition {
        id: ComponentId::intern(d.id),
        name: d.name.to_string(),
        display_name: d.display.to_string(),
        description: d.description.to_string(),
        category: d.category,
        props,
        default_props: defaults
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
        has_children: d.children,
    }
}

/// A component with no editable props.
fn bare(
    id: &'static str,
    name: &'static str,
    display: &'static str,
    category: Category,
    description: &'static str,
    children: bool,
) -> ComponentDefinition {
    define(
        Def {
            id,
            name,
            display,
            category,
            description,
            children,
        },
        Vec::new(),
        &[],
    )
}

fn builtin_definitions() -> Vec<ComponentDefinition> {
    use Category::*;
    use PropDefinition as P;
    use PropValue as V;

    let text = |s: &str| V::text(s);
    let opt = |s: &str| V::option(s);

    vec![
        // ── Form ──
        define(
            Def { id: "button", name: "Button", display: "Button", category: Form, description: "A clickable button component", children: true },
            vec![
                P::choice("variant", &["default", "destructive", "outline", "secondary", "ghost", "link"]),
                P::choice("size", &["default", "sm", "lg", "icon"]),
                P::boolean("disabled", false),
                P::string("children", "Button"),
            ],
            &[("variant", opt("default")), ("size", opt("default")), ("children", text("Button"))],
        ),
        define(
            Def { id: "input", name: "Input", display: "Input", category: Form, description: "Text input field", children: false },
            vec![
                P::choice("type", &["text", "email", "password", "number", "tel", "url"]),
                P::string("placeholder", "Enter text..."),
                P::boolean("disabled", false),
            ],
            &[("type", opt("text")), ("placeholder", text("Enter text..."))],
        ),
        define(
            Def { id: "textarea", name: "Textarea", display: "Textarea", category: Form, description: "Multi-line text input", children: false },
            vec![
                P::string("placeholder", "Type your message..."),
                P::boolean("disabled", false),
                P::number("rows", 4.0),
            ],
            &[("placeholder", text("Type your message...")), ("rows", V::Number(4.0))],
        ),
        define(
            Def { id: "checkbox", name: "Checkbox", display: "Checkbox", category: Form, description: "Checkbox input", children: false },
            vec![P::boolean("disabled", false), P::boolean("checked", false)],
            &[("checked", V::Bool(false))],
        ),
        define(
            Def { id: "radio-group", name: "RadioGroup", display: "Radio Group", category: Form, description: "Radio button group", children: true },
            vec![P::boolean("disabled", false)],
            &[("disabled", V::Bool(false))],
        ),
        define(
            Def { id: "switch", name: "Switch", display: "Switch", category: Form, description: "Toggle switch", children: false },
            vec![P::boolean("disabled", false), P::boolean("checked", false)],
            &[("checked", V::Bool(false))],
        ),
        define(
            Def { id: "select", name: "Select", display: "Select", category: Form, description: "Dropdown select menu", children: true },
            vec![P::boolean("disabled", false), P::string("placeholder", "Select an option...")],
            &[("placeholder", text("Select an option..."))],
        ),
        define(
            Def { id: "slider", name: "Slider", display: "Slider", category: Form, description: "Range slider input", children: false },
            vec![
                P::boolean("disabled", false),
                P::number("min", 0.0),
                P::number("max", 100.0),
                P::number("step", 1.0),
            ],
            &[("min", V::Number(0.0)), ("max", V::Number(100.0)), ("step", V::Number(1.0))],
        ),
        define(
            Def { id: "label", name: "Label", display: "Label", category: Form, description: "Form label", children: true },
            vec![P::string("children", "Label")],
            &[("children", text("Label"))],
        ),
        bare("form", "Form", "Form", Form, "Form wrapper with validation", true),
        // ── Data display ──
        bare("card", "Card", "Card", DataDisplay, "Card container with header, content, and footer", true),
        define(
            Def { id: "badge", name: "Badge", display: "Badge", category: DataDisplay, description: "Small badge component", children: true },
            vec![
                P::choice("variant", &["default", "secondary", "destructive", "outline"]),
                P::string("children", "Badge"),
            ],
            &[("variant", opt("default")), ("children", text("Badge"))],
        ),
        bare("avatar", "Avatar", "Avatar", DataDisplay, "User avatar component", true),
        define(
            Def { id: "separator", name: "Separator", display: "Separator", category: DataDisplay, description: "Visual divider", children: false },
            vec![P::choice("orientation", &["horizontal", "vertical"])],
            &[("orientation", opt("horizontal"))],
        ),
        bare("skeleton", "Skeleton", "Skeleton", DataDisplay, "Loading skeleton placeholder", false),
        define(
            Def { id: "progress", name: "Progress", display: "Progress", category: DataDisplay, description: "Progress bar", children: false },
            vec![P::number("value", 50.0)],
            &[("value", V::Number(50.0))],
        ),
        bare("table", "Table", "Table", DataDisplay, "Data table", true),
        define(
            Def { id: "tooltip", name: "Tooltip", display: "Tooltip", category: DataDisplay, description: "Hover tooltip", children: true },
            vec![P::string("content", "Tooltip content")],
            &[("content", text("Tooltip content"))],
        ),
        // ── Navigation ──
        bare("tabs", "Tabs", "Tabs", Navigation, "Tab navigation component", true),
        bare("navigation-menu", "NavigationMenu", "Navigation Menu", Navigation, "Complex navigation menu", true),
        bare("menubar", "Menubar", "Menubar", Navigation, "Application menubar", true),
        bare("breadcrumb", "Breadcrumb", "Breadcrumb", Navigation, "Breadcrumb navigation", true),
        bare("pagination", "Pagination", "Pagination", Navigation, "Pagination controls", true),
        bare("command", "Command", "Command", Navigation, "Command palette / search", true),
        // ── Overlay ──
        bare("dialog", "Dialog", "Dialog", Overlay, "Modal dialog", true),
        bare("alert-dialog", "AlertDialog", "Alert Dialog", Overlay, "Alert confirmation dialog", true),
        define(
            Def { id: "sheet", name: "Sheet", display: "Sheet", category: Overlay, description: "Slide-out sheet panel", children: true },
            vec![P::choice("side", &["top", "right", "bottom", "left"]).with_default(opt("right"))],
            &[("side", opt("right"))],
        ),
        bare("drawer", "Drawer", "Drawer", Overlay, "Bottom drawer", true),
        bare("popover", "Popover", "Popover", Overlay, "Popover overlay", true),
        bare("dropdown-menu", "DropdownMenu", "Dropdown Menu", Overlay, "Dropdown menu", true),
        bare("context-menu", "ContextMenu", "Context Menu", Overlay, "Right-click context menu", true),
        bare("hover-card", "HoverCard", "Hover Card", Overlay, "Hover card overlay", true),
        // ── Feedback ──
        define(
            Def { id: "alert", name: "Alert", display: "Alert", category: Feedback, description: "Alert message", children: true },
            vec![P::choice("variant", &["default", "destructive"])],
            &[("variant", opt("default"))],
        ),
        bare("sonner", "Sonner", "Toast", Feedback, "Toast notification (Sonner)", false),
        define(
            Def { id: "aspect-ratio", name: "AspectRatio", display: "Aspect Ratio", category: Feedback, description: "Aspect ratio container", children: true },
            vec![P::number("ratio", 16.0 / 9.0)],
            &[("ratio", V::Number(16.0 / 9.0))],
        ),
        // ── Layout ──
        define(
            Def { id: "accordion", name: "Accordion", display: "Accordion", category: Layout, description: "Collapsible accordion", children: true },
            vec![P::choice("type", &["single", "multiple"])],
            &[("type", opt("single"))],
        ),
        bare("collapsible", "Collapsible", "Collapsible", Layout, "Collapsible container", true),
        bare("scroll-area", "ScrollArea", "Scroll Area", Layout, "Custom scrollable area", true),
        bare("resizable", "Resizable", "Resizable", Layout, "Resizable panels", true),
        // ── Advanced ──
        bare("calendar", "Calendar", "Calendar", Advanced, "Date picker calendar", false),
        bare("carousel", "Carousel", "Carousel", Advanced, "Image/content carousel", true),
        bare("chart", "Chart", "Chart", Advanced, "Chart visualization", true),
    ]
}
