//! Source code export for configured components.
//!
//! `export` renders one component with its current props as a React or
//! Vue source file. Both exporters are capability maps from component id
//! to template, with a generic fallback for components without one.

pub mod css;
pub mod react;
pub mod vue;

use swatch_core::model::{Framework, Styling};
use swatch_core::props::{PropValue, Props};
use swatch_core::registry::ComponentDefinition;

/// Render `definition` configured with `props` as source text.
pub fn export(
    definition: &ComponentDefinition,
    props: &Props,
    framework: Framework,
    styling: Styling,
) -> String {
    log::debug!(
        "export {} as {framework:?}/{styling:?}",
        definition.id
    );
    match framework {
        Framework::React => react::generate(definition, props, styling),
        Framework::Vue => vue::generate(definition, props, styling),
    }
}

/// Props in schema declaration order, then any undeclared extras.
pub(crate) fn ordered_props<'a>(
    definition: &ComponentDefinition,
    props: &'a Props,
) -> Vec<(&'a str, &'a PropValue)> {
    let mut ordered: Vec<(&str, &PropValue)> = definition
        .props
        .iter()
        .filter_map(|p| props.get_key_value(p.name.as_str()))
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    for (k, v) in props {
        if definition.prop(k).is_none() {
            ordered.push((k.as_str(), v));
        }
    }
    ordered
}

/// Indent every non-empty line by `width` spaces.
pub(crate) fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
