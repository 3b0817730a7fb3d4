//! Typed prop values and the per-component prop schema.
//!
//! Every prop a component exposes is declared by a `PropDefinition`. Values
//! are a tagged `PropValue`, checked against the definition at write time
//! so a mistyped value never reaches the stores.

use crate::error::PropError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// A component's current prop bag, keyed by prop name.
pub type Props = BTreeMap<String, PropValue>;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let channel = |hi: u8, lo: u8| -> Option<f32> {
            Some((hex_val(hi)? << 4 | hex_val(lo)?) as f32 / 255.0)
        };
        let short = |c: u8| -> Option<f32> { Some((hex_val(c)? * 17) as f32 / 255.0) };

        match bytes.len() {
            3 => Some(Self::rgba(
                short(bytes[0])?,
                short(bytes[1])?,
                short(bytes[2])?,
                1.0,
            )),
            4 => Some(Self::rgba(
                short(bytes[0])?,
                short(bytes[1])?,
                short(bytes[2])?,
                short(bytes[3])?,
            )),
            6 => Some(Self::rgba(
                channel(bytes[0], bytes[1])?,
                channel(bytes[2], bytes[3])?,
                channel(bytes[4], bytes[5])?,
                1.0,
            )),
            8 => Some(Self::rgba(
                channel(bytes[0], bytes[1])?,
                channel(bytes[2], bytes[3])?,
                channel(bytes[4], bytes[5])?,
                channel(bytes[6], bytes[7])?,
            )),
            _ => None,
        }
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (byte(self.r), byte(self.g), byte(self.b), byte(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Values ──────────────────────────────────────────────────────────────

/// The editor widget family a prop belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    String,
    Number,
    Boolean,
    Enum,
    Color,
    Node,
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PropKind::String => "string",
            PropKind::Number => "number",
            PropKind::Boolean => "boolean",
            PropKind::Enum => "enum",
            PropKind::Color => "color",
            PropKind::Node => "node",
        })
    }
}

/// A single prop value, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PropValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Enum(String),
    Color(Color),
    /// Child content slot (rendered as text by the exporters).
    Node(String),
}

impl PropValue {
    pub fn text(s: impl Into<String>) -> Self {
        PropValue::Text(s.into())
    }

    pub fn option(s: impl Into<String>) -> Self {
        PropValue::Enum(s.into())
    }

    pub fn kind(&self) -> PropKind {
        match self {
            PropValue::Text(_) => PropKind::String,
            PropValue::Number(_) => PropKind::Number,
            PropValue::Bool(_) => PropKind::Boolean,
            PropValue::Enum(_) => PropKind::Enum,
            PropValue::Color(_) => PropKind::Color,
            PropValue::Node(_) => PropKind::Node,
        }
    }

    /// String payload of text-like values (text, enum, node).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) | PropValue::Enum(s) | PropValue::Node(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Decode a loosely typed JSON value as a prop of the given kind.
    /// Colors are accepted as hex strings.
    pub fn from_json(kind: PropKind, value: &serde_json::Value) -> Option<Self> {
        match kind {
            PropKind::String => value.as_str().map(PropValue::text),
            PropKind::Number => value.as_f64().map(PropValue::Number),
            PropKind::Boolean => value.as_bool().map(PropValue::Bool),
            PropKind::Enum => value.as_str().map(PropValue::option),
            PropKind::Color => value.as_str().and_then(Color::from_hex).map(PropValue::Color),
            PropKind::Node => value.as_str().map(|s| PropValue::Node(s.to_string())),
        }
    }

    /// The inverse of `from_json`: a plain JSON value without the kind tag.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropValue::Text(s) | PropValue::Enum(s) | PropValue::Node(s) => {
                serde_json::Value::String(s.clone())
            }
            PropValue::Number(n) => serde_json::json!(n),
            PropValue::Bool(b) => serde_json::Value::Bool(*b),
            PropValue::Color(c) => serde_json::Value::String(c.to_hex()),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Text(s) | PropValue::Enum(s) | PropValue::Node(s) => f.write_str(s),
            PropValue::Number(n) => write!(f, "{}", format_num(*n)),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Color(c) => f.write_str(&c.to_hex()),
        }
    }
}

/// Format a number without a trailing `.0` for whole values.
pub fn format_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let s = format!("{n:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

// ─── Schema ──────────────────────────────────────────────────────────────

/// Declaration of one editable prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDefinition {
    pub name: String,
    pub kind: PropKind,
    pub default: Option<PropValue>,
    /// Allowed values for `PropKind::Enum`.
    pub options: SmallVec<[String; 4]>,
}

impl PropDefinition {
    pub fn new(name: &str, kind: PropKind, default: Option<PropValue>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default,
            options: SmallVec::new(),
        }
    }

    pub fn string(name: &str, default: &str) -> Self {
        Self::new(name, PropKind::String, Some(PropValue::text(default)))
    }

    pub fn number(name: &str, default: f64) -> Self {
        Self::new(name, PropKind::Number, Some(PropValue::Number(default)))
    }

    pub fn boolean(name: &str, default: bool) -> Self {
        Self::new(name, PropKind::Boolean, Some(PropValue::Bool(default)))
    }

    pub fn color(name: &str, default: Color) -> Self {
        Self::new(name, PropKind::Color, Some(PropValue::Color(default)))
    }

    /// An enum prop whose default is the first option.
    pub fn choice(name: &str, options: &[&str]) -> Self {
        let mut def = Self::new(
            name,
            PropKind::Enum,
            options.first().map(|o| PropValue::option(*o)),
        );
        def.options = options.iter().map(|o| o.to_string()).collect();
        def
    }

    pub fn with_default(mut self, default: PropValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Check that `value` is acceptable for this prop.
    pub fn check(&self, value: &PropValue) -> Result<(), PropError> {
        if value.kind() != self.kind {
            return Err(PropError::KindMismatch {
                prop: self.name.clone(),
                expected: self.kind,
                found: value.kind(),
            });
        }
        if let PropValue::Number(n) = value
            && !n.is_finite()
        {
            return Err(PropError::NonFinite {
                prop: self.name.clone(),
                value: *n,
            });
        }
        if let PropValue::Enum(v) = value
            && !self.options.iter().any(|o| o == v)
        {
            return Err(PropError::InvalidOption {
                prop: self.name.clone(),
                value: v.clone(),
                options: self.options.join(", "),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");

        let c2 = Color::from_hex("#FF000080").unwrap();
        assert!((c2.a - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(c2.to_hex().len(), 9);

        assert_eq!(Color::from_hex("fff").unwrap().to_hex(), "#FFFFFF");
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
    }

    #[test]
    fn choice_defaults_to_first_option() {
        let def = PropDefinition::choice("side", &["top", "right"]);
        assert_eq!(def.default, Some(PropValue::option("top")));
        assert!(def.check(&PropValue::option("right")).is_ok());
        assert!(matches!(
            def.check(&PropValue::option("middle")),
            Err(PropError::InvalidOption { .. })
        ));
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let def = PropDefinition::number("rows", 4.0);
        let err = def.check(&PropValue::text("four")).unwrap_err();
        assert_eq!(
            err,
            PropError::KindMismatch {
                prop: "rows".into(),
                expected: PropKind::Number,
                found: PropKind::String,
            }
        );
        assert_eq!(
            err.to_string(),
            "prop `rows` expects a number value, got string"
        );
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let def = PropDefinition::number("rows", 4.0);
        assert!(def.check(&PropValue::Number(12.0)).is_ok());
        assert!(matches!(
            def.check(&PropValue::Number(f64::NAN)),
            Err(PropError::NonFinite { ref prop, .. }) if prop == "rows"
        ));
        assert_eq!(
            def.check(&PropValue::Number(f64::INFINITY)).unwrap_err().to_string(),
            "prop `rows` must be a finite number, got inf"
        );
    }

    #[test]
    fn json_decoding_follows_kind() {
        let v = serde_json::json!("#00FF00");
        assert_eq!(
            PropValue::from_json(PropKind::Color, &v),
            Some(PropValue::Color(Color::rgba(0.0, 1.0, 0.0, 1.0)))
        );
        assert_eq!(
            PropValue::from_json(PropKind::Number, &serde_json::json!(2.5)),
            Some(PropValue::Number(2.5))
        );
        assert_eq!(PropValue::from_json(PropKind::Boolean, &v), None);
        assert_eq!(PropValue::Bool(true).to_json(), serde_json::json!(true));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_num(4.0), "4");
        assert_eq!(format_num(16.0 / 9.0), "1.7778");
        assert_eq!(format_num(0.5), "0.5");
    }
}
