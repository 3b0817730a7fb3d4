//! Vue single-file-component exporter.

use crate::{css, indent, ordered_props};
use swatch_core::model::Styling;
use swatch_core::props::{Props, format_num};
use swatch_core::registry::ComponentDefinition;

type TemplateFn = fn(&ComponentDefinition, &Props) -> String;

const TEMPLATES: &[(&str, TemplateFn)] = &[
    ("button", button),
    ("input", input),
    ("textarea", textarea),
    ("checkbox", checkbox),
    ("switch", switch),
    ("badge", badge),
    ("card", card),
    ("alert", alert),
    ("tabs", tabs),
    ("progress", progress),
    ("slider", slider),
];

fn text(props: &Props, name: &str, fallback: &str) -> String {
    props
        .get(name)
        .map(|v| v.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

fn number(props: &Props, name: &str, fallback: f64) -> String {
    format_num(props.get(name).and_then(|v| v.as_f64()).unwrap_or(fallback))
}

/// ` name` when the boolean prop is set, else nothing.
fn flag(props: &Props, name: &str) -> String {
    match props.get(name).and_then(|v| v.as_bool()) {
        Some(true) => format!(" {name}"),
        _ => String::new(),
    }
}

/// The `props` object literal for the `<script setup>` block.
pub fn props_literal(definition: &ComponentDefinition, props: &Props) -> String {
    let entries = ordered_props(definition, props);
    if entries.is_empty() {
        return "{}".to_string();
    }
    let body = entries
        .iter()
        .map(|(key, value)| {
            let json = serde_json::to_string(&value.to_json()).unwrap_or_default();
            format!("  \"{key}\": {json}")
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{body}\n}}")
}

pub fn generate(definition: &ComponentDefinition, props: &Props, styling: Styling) -> String {
    let template = TEMPLATES
        .iter()
        .find(|(key, _)| *key == definition.id.as_str())
        .map(|(_, render)| render(definition, props))
        .unwrap_or_else(|| fallback(definition));

    let mut out = format!(
        "<template>\n{}\n</template>\n\n<script setup lang=\"ts\">\nconst props = {};\n</script>\n",
        indent(&template, 2),
        props_literal(definition, props)
    );
    if styling == Styling::Css {
        let sheet = css::stylesheet(&template);
        out.push_str("\n<style scoped>\n");
        if sheet.is_empty() {
            out.push_str("/* No utility classes to convert. */\n");
        } else {
            out.push_str(&sheet);
            out.push('\n');
        }
        out.push_str("</style>\n");
    }
    out
}

// ─── Templates ───────────────────────────────────────────────────────────

fn fallback(definition: &ComponentDefinition) -> String {
    format!(
        "<div class=\"{}\">\n  <!-- {} Component -->\n</div>",
        definition.id, definition.display_name
    )
}

fn button(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<button class=\"btn btn-{} btn-{}\"{}>\n  {}\n</button>",
        text(props, "variant", "default"),
        text(props, "size", "default"),
        flag(props, "disabled"),
        text(props, "children", "Button")
    )
}

fn input(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<input type=\"{}\" placeholder=\"{}\" class=\"input\"{} />",
        text(props, "type", "text"),
        text(props, "placeholder", ""),
        flag(props, "disabled")
    )
}

fn textarea(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<textarea placeholder=\"{}\" rows=\"{}\" class=\"textarea\"{}></textarea>",
        text(props, "placeholder", ""),
        number(props, "rows", 4.0),
        flag(props, "disabled")
    )
}

fn checkbox(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<div class=\"flex items-center space-x-2\">\n  <input type=\"checkbox\" id=\"checkbox\" class=\"checkbox\"{}{} />\n  <label for=\"checkbox\">Checkbox</label>\n</div>",
        flag(props, "checked"),
        flag(props, "disabled")
    )
}

fn switch(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<div class=\"flex items-center space-x-2\">\n  <input type=\"checkbox\" class=\"switch\"{}{} />\n  <label>Switch</label>\n</div>",
        flag(props, "checked"),
        flag(props, "disabled")
    )
}

fn badge(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<span class=\"badge badge-{}\">\n  {}\n</span>",
        text(props, "variant", "default"),
        text(props, "children", "Badge")
    )
}

fn card(_: &ComponentDefinition, _: &Props) -> String {
    "<div class=\"card w-[350px]\">\n  <div class=\"card-header\">\n    <h3 class=\"card-title\">Card Title</h3>\n    <p class=\"card-description\">Card Description</p>\n  </div>\n  <div class=\"card-content\">\n    <p>Card content goes here.</p>\n  </div>\n  <div class=\"card-footer\">\n    <p class=\"text-sm text-muted-foreground\">Card Footer</p>\n  </div>\n</div>".to_string()
}

fn alert(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<div class=\"alert alert-{}\" role=\"alert\">\n  <h4 class=\"alert-title\">Alert Title</h4>\n  <p class=\"alert-description\">This is an alert description.</p>\n</div>",
        text(props, "variant", "default")
    )
}

fn tabs(_: &ComponentDefinition, _: &Props) -> String {
    "<div class=\"tabs w-[400px]\">\n  <div class=\"tabs-list\">\n    <button class=\"tab-trigger\" data-value=\"tab1\">Tab 1</button>\n    <button class=\"tab-trigger\" data-value=\"tab2\">Tab 2</button>\n  </div>\n  <div class=\"tab-content\" data-value=\"tab1\">Content for Tab 1</div>\n  <div class=\"tab-content\" data-value=\"tab2\">Content for Tab 2</div>\n</div>".to_string()
}

fn progress(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<div class=\"progress\">\n  <div class=\"progress-bar\" :style=\"{{ width: '{}%' }}\"></div>\n</div>",
        number(props, "value", 50.0)
    )
}

fn slider(_: &ComponentDefinition, props: &Props) -> String {
    format!(
        "<input type=\"range\" class=\"slider\" :min=\"{}\" :max=\"{}\" :step=\"{}\"{} />",
        number(props, "min", 0.0),
        number(props, "max", 100.0),
        number(props, "step", 1.0),
        flag(props, "disabled")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_core::id::ComponentId;
    use swatch_core::props::PropValue;
    use swatch_core::registry::Registry;

    fn def(id: &str) -> ComponentDefinition {
        Registry::builtin()
            .definition(ComponentId::intern(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn button_template_and_script() {
        let button = def("button");
        let mut props = button.default_props.clone();
        props.insert("disabled".into(), PropValue::Bool(true));
        assert_eq!(
            generate(&button, &props, Styling::Tailwind),
            "<template>\n  <button class=\"btn btn-default btn-default\" disabled>\n    Button\n  </button>\n</template>\n\n\
             <script setup lang=\"ts\">\nconst props = {\n  \"variant\": \"default\",\n  \"size\": \"default\",\n  \
             \"disabled\": true,\n  \"children\": \"Button\"\n};\n</script>\n"
        );
    }

    #[test]
    fn empty_props_literal() {
        assert_eq!(props_literal(&def("avatar"), &Props::new()), "{}");
    }

    #[test]
    fn slider_numbers_are_plain() {
        let slider = def("slider");
        let code = generate(&slider, &slider.default_props, Styling::Tailwind);
        assert!(code.contains(":min=\"0\" :max=\"100\" :step=\"1\" />"));
    }

    #[test]
    fn fallback_names_the_component() {
        let code = generate(&def("calendar"), &Props::new(), Styling::Tailwind);
        assert!(code.starts_with(
            "<template>\n  <div class=\"calendar\">\n    <!-- Calendar Component -->\n  </div>\n</template>"
        ));
    }

    #[test]
    fn css_styling_adds_scoped_style() {
        let code = generate(&def("checkbox"), &Props::new(), Styling::Css);
        assert!(code.contains("<style scoped>\n.flex {\n  display: flex;\n}"));
        assert!(code.ends_with("</style>\n"));
    }
}
