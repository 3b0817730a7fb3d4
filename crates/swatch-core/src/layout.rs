//! Block layout for the component canvas.
//!
//! Places one block per base component: categories stack top to bottom,
//! components run left to right inside a category row, and each block is
//! wide enough to hold the base instance plus its variants. The result is
//! deterministic for a given registry order and variant counts.

use crate::error::ConfigError;
use crate::id::ComponentId;
use crate::model::{Category, Position, Rect, Size};
use serde::{Deserialize, Serialize};

/// Spacing constants, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub origin_x: f32,
    pub origin_y: f32,
    pub label_height: f32,
    /// Room between a category heading and its component row.
    pub label_gap: f32,
    pub inter_variant_spacing: f32,
    pub component_gap: f32,
    pub category_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            label_height: 30.0,
            label_gap: 120.0,
            inter_variant_spacing: 40.0,
            component_gap: 60.0,
            category_spacing: 80.0,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ─── Size table ──────────────────────────────────────────────────────────

/// Footprint used for components missing from the size table.
pub const DEFAULT_SIZE: Size = Size::new(200.0, 100.0);

const COMPONENT_SIZES: &[(&str, f32, f32)] = &[
    ("button", 100.0, 40.0),
    ("input", 200.0, 40.0),
    ("textarea", 300.0, 120.0),
    ("checkbox", 120.0, 40.0),
    ("radio-group", 200.0, 120.0),
    ("switch", 120.0, 40.0),
    ("select", 200.0, 40.0),
    ("slider", 200.0, 40.0),
    ("label", 100.0, 40.0),
    ("card", 350.0, 200.0),
    ("badge", 80.0, 24.0),
    ("avatar", 48.0, 48.0),
    ("separator", 300.0, 1.0),
    ("skeleton", 250.0, 80.0),
    ("progress", 200.0, 8.0),
    ("tooltip", 120.0, 40.0),
    ("tabs", 400.0, 150.0),
    ("alert", 400.0, 120.0),
    ("accordion", 400.0, 150.0),
    ("table", 500.0, 200.0),
    ("breadcrumb", 250.0, 30.0),
    ("navigation-menu", 300.0, 40.0),
    ("menubar", 250.0, 40.0),
    ("pagination", 300.0, 40.0),
    ("dialog", 120.0, 40.0),
    ("sheet", 120.0, 40.0),
    ("popover", 120.0, 40.0),
    ("dropdown-menu", 120.0, 40.0),
    ("collapsible", 350.0, 80.0),
    ("scroll-area", 350.0, 200.0),
    ("calendar", 350.0, 350.0),
    ("carousel", 300.0, 200.0),
    ("aspect-ratio", 300.0, 169.0),
];

/// Estimated on-canvas size of a component's preview.
pub fn component_size(component: ComponentId) -> Size {
    let key = component.as_str();
    COMPONENT_SIZES
        .iter()
        .find(|(id, _, _)| *id == key)
        .map(|&(_, w, h)| Size::new(w, h))
        .unwrap_or(DEFAULT_SIZE)
}

// ─── Layout ──────────────────────────────────────────────────────────────

/// Room reserved for one component and its variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlock {
    pub component_id: ComponentId,
    pub category: Category,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub variant_count: usize,
}

impl LayoutBlock {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Placement of one non-empty category row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
    pub category: Category,
    /// Where the category heading sits.
    pub label: Position,
    /// Top edge of the component row.
    pub row_top: f32,
    /// Lowest block bottom in the row.
    pub row_bottom: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub blocks: Vec<LayoutBlock>,
    pub sections: Vec<CategorySection>,
    pub total_height: f32,
}

/// Lay out every component of every category.
///
/// `components_in` lists a category's components in registration order and
/// `variant_count_of` reports how many variants a component already has.
/// Empty categories take no vertical space. Rows never wrap.
pub fn compute_layout<C, V>(
    categories: &[Category],
    components_in: C,
    variant_count_of: V,
    config: &LayoutConfig,
) -> LayoutResult
where
    C: Fn(Category) -> Vec<ComponentId>,
    V: Fn(ComponentId) -> usize,
{
    let mut result = LayoutResult::default();
    let mut cursor_y = config.origin_y;

    for &category in categories {
        let components = components_in(category);
        if components.is_empty() {
            continue;
        }

        let row_top = cursor_y + config.label_height + config.label_gap;
        let mut cursor_x = config.origin_x;
        let mut row_bottom = row_top;

        for component_id in components {
            let base = component_size(component_id);
            let variant_count = variant_count_of(component_id);
            let slots = (1 + variant_count) as f32;
            let width = slots * (base.width + config.inter_variant_spacing)
                - config.inter_variant_spacing;

            let block = LayoutBlock {
                component_id,
                category,
                x: cursor_x,
                y: row_top,
                width,
                height: base.height,
                variant_count,
            };
            row_bottom = row_bottom.max(block.rect().bottom());
            cursor_x += width + config.component_gap;
            result.blocks.push(block);
        }

        result.sections.push(CategorySection {
            category,
            label: Position::new(config.origin_x, cursor_y),
            row_top,
            row_bottom,
        });
        log::trace!("layout: {category} row at y={row_top} bottom={row_bottom}");
        cursor_y = row_bottom + config.category_spacing;
    }

    result.total_height = cursor_y;
    result
}

/// Slot positions inside `block`: the base first, then `count` variants
/// left to right, all on the block's top edge.
pub fn variant_positions(
    block: &LayoutBlock,
    base_size: Size,
    count: usize,
    config: &LayoutConfig,
) -> Vec<Position> {
    let stride = base_size.width + config.inter_variant_spacing;
    (0..=count)
        .map(|slot| Position::new(block.x + slot as f32 * stride, block.y))
        .collect()
}
