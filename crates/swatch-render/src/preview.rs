//! Component previews.
//!
//! A `PreviewRegistry` maps component ids to render functions producing
//! an HTML-like markup string for the canvas. Rendering never fails
//! outward: missing renderers, renderer errors and renderer panics all
//! come back as a `Preview` the canvas can show in place of the component.

use serde::Serialize;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use swatch_core::id::ComponentId;
use swatch_core::props::Props;

/// Outcome of rendering one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "body", rename_all = "lowercase")]
pub enum Preview {
    Markup(String),
    /// No renderer is registered for the component.
    Unimplemented(String),
    /// The renderer failed; carries the message.
    Error(String),
}

pub type RenderFn = fn(&Props) -> Result<Preview, String>;

/// Capability map from component id to renderer.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    renderers: HashMap<ComponentId, RenderFn>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderers for the built-in component library.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        for &(id, render) in BUILTIN {
            reg.register(ComponentId::intern(id), render);
        }
        reg
    }

    /// Add or replace the renderer for `component`.
    pub fn register(&mut self, component: ComponentId, render: RenderFn) {
        self.renderers.insert(component, render);
    }

    pub fn has_renderer(&self, component: ComponentId) -> bool {
        self.renderers.contains_key(&component)
    }

    /// Render `component` with `props`. Never panics.
    pub fn render(&self, component: ComponentId, props: &Props) -> Preview {
        let Some(render) = self.renderers.get(&component) else {
            return Preview::Unimplemented(component.to_string());
        };
        match catch_unwind(AssertUnwindSafe(|| render(props))) {
            Ok(Ok(preview)) => preview,
            Ok(Err(message)) => {
                log::warn!("preview of {component} failed: {message}");
                Preview::Error(message)
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "renderer panicked".to_string());
                log::warn!("preview of {component} panicked: {message}");
                Preview::Error(message)
            }
        }
    }
}

// ─── Markup helpers ──────────────────────────────────────────────────────

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn el(tag: &str, class: &str, inner: &str) -> String {
    format!("<{tag} class=\"{class}\">{inner}</{tag}>")
}

fn text<'a>(props: &'a Props, name: &str, fallback: &'a str) -> &'a str {
    props.get(name).and_then(|v| v.as_str()).unwrap_or(fallback)
}

fn flag(props: &Props, name: &str) -> bool {
    props.get(name).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn number(props: &Props, name: &str, fallback: f64) -> f64 {
    props.get(name).and_then(|v| v.as_f64()).unwrap_or(fallback)
}

fn markup(s: String) -> Result<Preview, String> {
    Ok(Preview::Markup(s))
}

fn disabled_attr(props: &Props) -> &'static str {
    if flag(props, "disabled") { " disabled" } else { "" }
}

// ─── Built-in renderers ──────────────────────────────────────────────────

const BUILTIN: &[(&str, RenderFn)] = &[
    ("button", button),
    ("input", input),
    ("textarea", textarea),
    ("checkbox", checkbox),
    ("switch", switch),
    ("slider", slider),
    ("label", label),
    ("card", card),
    ("badge", badge),
    ("avatar", avatar),
    ("separator", separator),
    ("skeleton", skeleton),
    ("progress", progress),
    ("tooltip", tooltip),
    ("tabs", tabs),
    ("alert", alert),
    ("accordion", accordion),
    ("breadcrumb", breadcrumb),
    ("sheet", sheet),
    ("aspect-ratio", aspect_ratio),
];

fn button(props: &Props) -> Result<Preview, String> {
    let variant = text(props, "variant", "default");
    let size = text(props, "size", "default");
    markup(format!(
        "<button class=\"btn btn-{variant} btn-{size}\"{}>{}</button>",
        disabled_attr(props),
        escape(text(props, "children", "Button"))
    ))
}

fn input(props: &Props) -> Result<Preview, String> {
    markup(format!(
        "<input type=\"{}\" placeholder=\"{}\"{} />",
        text(props, "type", "text"),
        escape(text(props, "placeholder", "Enter text...")),
        disabled_attr(props)
    ))
}

fn textarea(props: &Props) -> Result<Preview, String> {
    markup(format!(
        "<textarea rows=\"{}\" placeholder=\"{}\"{}></textarea>",
        number(props, "rows", 4.0),
        escape(text(props, "placeholder", "Type your message...")),
        disabled_attr(props)
    ))
}

fn toggle_with_label(kind: &str, caption: &str, props: &Props) -> Result<Preview, String> {
    let state = if flag(props, "checked") { "checked" } else { "unchecked" };
    markup(el(
        "div",
        "flex items-center space-x-2",
        &format!(
            "<span class=\"{kind}\" data-state=\"{state}\"></span><label>{caption}</label>"
        ),
    ))
}

fn checkbox(props: &Props) -> Result<Preview, String> {
    toggle_with_label("checkbox", "Checkbox", props)
}

fn switch(props: &Props) -> Result<Preview, String> {
    toggle_with_label("switch", "Switch", props)
}

fn slider(props: &Props) -> Result<Preview, String> {
    let (min, max) = (number(props, "min", 0.0), number(props, "max", 100.0));
    if min > max {
        return Err(format!("slider min {min} exceeds max {max}"));
    }
    markup(format!(
        "<input type=\"range\" class=\"w-[200px]\" min=\"{min}\" max=\"{max}\" step=\"{}\" />",
        number(props, "step", 1.0)
    ))
}

fn label(props: &Props) -> Result<Preview, String> {
    markup(el("label", "label", &escape(text(props, "children", "Label"))))
}

fn card(_: &Props) -> Result<Preview, String> {
    markup(el(
        "div",
        "card w-[350px]",
        "<h3>Card Title</h3><p>Card Description</p><p>Card content goes here.</p>\
         <p class=\"text-sm text-muted-foreground\">Card Footer</p>",
    ))
}

fn badge(props: &Props) -> Result<Preview, String> {
    let variant = text(props, "variant", "default");
    markup(el(
        "span",
        &format!("badge badge-{variant}"),
        &escape(text(props, "children", "Badge")),
    ))
}

fn avatar(_: &Props) -> Result<Preview, String> {
    markup(el("span", "avatar", "<span class=\"avatar-fallback\">CN</span>"))
}

fn separator(props: &Props) -> Result<Preview, String> {
    let orientation = text(props, "orientation", "horizontal");
    markup(format!(
        "<div class=\"separator my-4\" data-orientation=\"{orientation}\"></div>"
    ))
}

fn skeleton(_: &Props) -> Result<Preview, String> {
    markup(el(
        "div",
        "space-y-2",
        "<div class=\"skeleton h-4 w-[250px]\"></div><div class=\"skeleton h-4 w-[200px]\"></div>",
    ))
}

fn progress(props: &Props) -> Result<Preview, String> {
    let value = number(props, "value", 50.0).clamp(0.0, 100.0);
    markup(format!(
        "<div class=\"progress w-[200px]\"><div class=\"progress-bar\" style=\"width: {value}%\"></div></div>"
    ))
}

fn tooltip(props: &Props) -> Result<Preview, String> {
    markup(el(
        "div",
        "tooltip",
        &format!(
            "<button class=\"btn btn-outline\">Hover me</button><span role=\"tooltip\">{}</span>",
            escape(text(props, "content", "Tooltip content"))
        ),
    ))
}

fn tabs(_: &Props) -> Result<Preview, String> {
    markup(el(
        "div",
        "tabs w-[400px]",
        "<div role=\"tablist\"><button data-state=\"active\">Tab 1</button><button>Tab 2</button></div>\
         <div role=\"tabpanel\">Content for tab 1</div>",
    ))
}

fn alert(props: &Props) -> Result<Preview, String> {
    let variant = text(props, "variant", "default");
    markup(el(
        "div",
        &format!("alert alert-{variant}"),
        "<h5>Heads up!</h5><p>You can add components to your app using the cli.</p>",
    ))
}

fn accordion(props: &Props) -> Result<Preview, String> {
    let mode = text(props, "type", "single");
    markup(format!(
        "<div class=\"accordion w-[400px]\" data-type=\"{mode}\"><details><summary>Is it accessible?</summary>\
         <p>Yes.</p></details></div>"
    ))
}

fn breadcrumb(_: &Props) -> Result<Preview, String> {
    markup(el(
        "nav",
        "breadcrumb",
        "<a href=\"/\">Home</a> / <a href=\"/components\">Components</a> / <span>Breadcrumb</span>",
    ))
}

fn sheet(props: &Props) -> Result<Preview, String> {
    let side = text(props, "side", "right");
    markup(format!(
        "<button class=\"btn btn-outline\" data-sheet-side=\"{side}\">Open Sheet</button>"
    ))
}

fn aspect_ratio(props: &Props) -> Result<Preview, String> {
    let ratio = number(props, "ratio", 16.0 / 9.0);
    if ratio <= 0.0 {
        return Err(format!("aspect ratio must be positive, got {ratio}"));
    }
    markup(format!(
        "<div class=\"w-[300px]\" style=\"aspect-ratio: {ratio:.4}\"><div class=\"bg-muted rounded-md\"></div></div>"
    ))
}
