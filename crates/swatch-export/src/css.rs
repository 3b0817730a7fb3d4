//! Tailwind utility classes → plain CSS.
//!
//! Covers the utilities the exporters' templates actually emit plus the
//! common layout, spacing and color classes. Unknown classes are skipped.

/// Utility class → CSS declarations (property, value).
const TAILWIND_TO_CSS: &[(&str, &[(&str, &str)])] = &[
    // Width
    ("w-full", &[("width", "100%")]),
    ("w-screen", &[("width", "100vw")]),
    ("w-auto", &[("width", "auto")]),
    ("w-1/2", &[("width", "50%")]),
    ("w-1/3", &[("width", "33.333333%")]),
    ("w-2/3", &[("width", "66.666667%")]),
    ("w-[200px]", &[("width", "200px")]),
    ("w-[250px]", &[("width", "250px")]),
    ("w-[350px]", &[("width", "350px")]),
    ("w-[400px]", &[("width", "400px")]),
    ("w-[500px]", &[("width", "500px")]),
    // Height
    ("h-full", &[("height", "100%")]),
    ("h-screen", &[("height", "100vh")]),
    ("h-auto", &[("height", "auto")]),
    ("h-4", &[("height", "1rem")]),
    ("h-10", &[("height", "2.5rem")]),
    ("h-12", &[("height", "3rem")]),
    // Spacing
    ("p-2", &[("padding", "0.5rem")]),
    ("p-4", &[("padding", "1rem")]),
    ("px-5", &[("padding-left", "1.25rem"), ("padding-right", "1.25rem")]),
    ("py-2", &[("padding-top", "0.5rem"), ("padding-bottom", "0.5rem")]),
    ("my-4", &[("margin-top", "1rem"), ("margin-bottom", "1rem")]),
    ("m-0", &[("margin", "0")]),
    ("mr-1", &[("margin-right", "0.25rem")]),
    // Flexbox & grid
    ("flex", &[("display", "flex")]),
    ("flex-col", &[("flex-direction", "column")]),
    ("flex-row", &[("flex-direction", "row")]),
    ("items-center", &[("align-items", "center")]),
    ("justify-center", &[("justify-content", "center")]),
    ("justify-between", &[("justify-content", "space-between")]),
    ("space-x-2", &[("gap", "0.5rem")]),
    ("space-y-2", &[("display", "grid"), ("row-gap", "0.5rem")]),
    ("grid", &[("display", "grid")]),
    ("grid-cols-2", &[("grid-template-columns", "repeat(2, minmax(0, 1fr))")]),
    ("gap-2", &[("gap", "0.5rem")]),
    // Text
    ("text-xs", &[("font-size", "0.75rem"), ("line-height", "1rem")]),
    ("text-sm", &[("font-size", "0.875rem"), ("line-height", "1.25rem")]),
    ("text-lg", &[("font-size", "1.125rem"), ("line-height", "1.75rem")]),
    ("font-medium", &[("font-weight", "500")]),
    ("font-semibold", &[("font-weight", "600")]),
    ("font-bold", &[("font-weight", "700")]),
    ("text-center", &[("text-align", "center")]),
    ("uppercase", &[("text-transform", "uppercase")]),
    ("capitalize", &[("text-transform", "capitalize")]),
    ("tracking-wide", &[("letter-spacing", "0.025em")]),
    // Colors
    ("text-white", &[("color", "#ffffff")]),
    ("text-black", &[("color", "#000000")]),
    ("text-gray-500", &[("color", "#6b7280")]),
    ("text-gray-600", &[("color", "#4b5563")]),
    ("text-gray-700", &[("color", "#374151")]),
    ("text-muted-foreground", &[("color", "hsl(var(--muted-foreground))")]),
    ("bg-white", &[("background-color", "#ffffff")]),
    ("bg-black", &[("background-color", "#000000")]),
    ("bg-gray-100", &[("background-color", "#f3f4f6")]),
    ("bg-gray-900", &[("background-color", "#111827")]),
    // Borders
    ("border", &[("border", "1px solid #e5e7eb")]),
    ("border-2", &[("border", "2px solid #e5e7eb")]),
    ("border-gray-200", &[("border-color", "#e5e7eb")]),
    ("rounded", &[("border-radius", "0.25rem")]),
    ("rounded-md", &[("border-radius", "0.375rem")]),
    ("rounded-lg", &[("border-radius", "0.5rem")]),
    ("rounded-full", &[("border-radius", "9999px")]),
    // Effects
    ("shadow-lg", &[("box-shadow", "0 10px 15px -3px rgb(0 0 0 / 0.1)")]),
    ("shadow-2xl", &[("box-shadow", "0 25px 50px -12px rgb(0 0 0 / 0.25)")]),
    ("opacity-0", &[("opacity", "0")]),
    ("opacity-100", &[("opacity", "1")]),
    // Position
    ("relative", &[("position", "relative")]),
    ("absolute", &[("position", "absolute")]),
    ("fixed", &[("position", "fixed")]),
    ("top-0", &[("top", "0")]),
    ("right-0", &[("right", "0")]),
    ("bottom-0", &[("bottom", "0")]),
    ("left-0", &[("left", "0")]),
    ("inset-0", &[("top", "0"), ("right", "0"), ("bottom", "0"), ("left", "0")]),
    ("z-40", &[("z-index", "40")]),
    ("z-50", &[("z-index", "50")]),
    ("overflow-hidden", &[("overflow", "hidden")]),
    ("overflow-x-auto", &[("overflow-x", "auto")]),
    ("overflow-y-auto", &[("overflow-y", "auto")]),
    // Motion
    ("transition-all", &[("transition", "all 0.15s cubic-bezier(0.4, 0, 0.2, 1)")]),
    ("transition-opacity", &[("transition", "opacity 0.15s cubic-bezier(0.4, 0, 0.2, 1)")]),
    ("transition-transform", &[("transition", "transform 0.15s cubic-bezier(0.4, 0, 0.2, 1)")]),
    ("duration-300", &[("transition-duration", "300ms")]),
    ("translate-x-0", &[("transform", "translateX(0)")]),
    ("translate-x-full", &[("transform", "translateX(100%)")]),
    // Interaction
    ("cursor-pointer", &[("cursor", "pointer")]),
    ("pointer-events-none", &[("pointer-events", "none")]),
];

fn rule_for(class: &str) -> Option<&'static [(&'static str, &'static str)]> {
    TAILWIND_TO_CSS
        .iter()
        .find(|(name, _)| *name == class)
        .map(|(_, decls)| *decls)
}

/// Merge the declarations of a space-separated class list. A property set
/// by a later class overrides the earlier value in place.
pub fn tailwind_to_css(classes: &str) -> String {
    let mut decls: Vec<(&str, &str)> = Vec::new();
    for class in classes.split_whitespace() {
        let Some(rule) = rule_for(class) else {
            continue;
        };
        for &(prop, value) in rule {
            match decls.iter_mut().find(|(p, _)| *p == prop) {
                Some(existing) => existing.1 = value,
                None => decls.push((prop, value)),
            }
        }
    }
    decls
        .iter()
        .map(|(prop, value)| format!("  {prop}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Distinct classes used in `className="…"` or `class="…"` attributes, in
/// first-seen order.
pub fn extract_tailwind_classes(markup: &str) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    let mut rest = markup;
    while let Some(start) = rest.find("class") {
        rest = &rest[start + "class".len()..];
        let Some(body) = rest
            .strip_prefix("Name=\"")
            .or_else(|| rest.strip_prefix("=\""))
        else {
            continue;
        };
        let Some(end) = body.find('"') else {
            break;
        };
        for class in body[..end].split_whitespace() {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
        rest = &body[end + 1..];
    }
    classes
}

/// Escape a class name for use in a CSS selector.
fn selector(class: &str) -> String {
    let mut out = String::from(".");
    for c in class.chars() {
        if matches!(c, '[' | ']' | '/' | ':' | '.' | '%') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// One rule per convertible class found in `markup`.
pub fn stylesheet(markup: &str) -> String {
    extract_tailwind_classes(markup)
        .iter()
        .filter(|class| rule_for(class).is_some())
        .map(|class| format!("{} {{\n{}\n}}", selector(class), tailwind_to_css(class)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_known_classes() {
        assert_eq!(
            tailwind_to_css("flex items-center unknown-class"),
            "  display: flex;\n  align-items: center;"
        );
    }

    #[test]
    fn later_classes_override_in_place() {
        assert_eq!(
            tailwind_to_css("text-white text-sm text-black"),
            "  color: #000000;\n  font-size: 0.875rem;\n  line-height: 1.25rem;"
        );
    }

    #[test]
    fn extracts_both_attribute_spellings() {
        let markup = r#"<div className="flex space-x-2"><p class="text-sm flex"></p><Card variant="x" /></div>"#;
        assert_eq!(
            extract_tailwind_classes(markup),
            vec!["flex", "space-x-2", "text-sm"]
        );
        assert!(extract_tailwind_classes("<Button />").is_empty());
    }

    #[test]
    fn stylesheet_escapes_selectors() {
        assert_eq!(
            stylesheet(r#"<Card className="w-[350px] mystery">"#),
            ".w-\\[350px\\] {\n  width: 350px;\n}"
        );
    }
}
