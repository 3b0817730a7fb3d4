//! Error types for schema validation and configuration loading.
//!
//! Lookups that miss (unknown node, instance or definition) are not errors:
//! they surface as `None` / `false` so the canvas stays interactive.

use crate::id::ComponentId;
use crate::props::PropKind;
use thiserror::Error;

/// A prop write rejected by the owning component's schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropError {
    #[error("unknown component `{0}`")]
    UnknownComponent(ComponentId),

    #[error("component `{component}` has no prop named `{prop}`")]
    UnknownProp { component: ComponentId, prop: String },

    #[error("prop `{prop}` expects a {expected} value, got {found}")]
    KindMismatch {
        prop: String,
        expected: PropKind,
        found: PropKind,
    },

    #[error("prop `{prop}` must be a finite number, got {value}")]
    NonFinite { prop: String, value: f64 },

    #[error("`{value}` is not an option of `{prop}` (expected one of: {options})")]
    InvalidOption {
        prop: String,
        value: String,
        options: String,
    },
}

/// Failure to load a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A component catalog that breaks the registry invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("component id `{0}` is registered twice")]
    DuplicateId(ComponentId),

    #[error("default prop `{prop}` of `{component}` has no matching definition")]
    UndeclaredDefault { component: ComponentId, prop: String },

    #[error("default prop `{prop}` of `{component}` is invalid: {source}")]
    InvalidDefault {
        component: ComponentId,
        prop: String,
        source: PropError,
    },
}
