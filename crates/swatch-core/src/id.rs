use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for component and node ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for components, instances and canvas nodes.
/// Internally a `Spur` index: 4 bytes, `Copy`, O(1) hashing and equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

/// Registry key of a component definition. Base instances share it as their id.
pub type ComponentId = NodeId;

impl NodeId {
    /// Intern a new string as a NodeId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// `<component>-variant-<index>`
    pub fn variant_of(component: ComponentId, index: usize) -> Self {
        Self::intern(&format!("{}-variant-{index}", component.as_str()))
    }

    /// `<id>-copy-<stamp>`
    pub fn copy_of(id: NodeId, stamp: u64) -> Self {
        Self::intern(&format!("{}-copy-{stamp}", id.as_str()))
    }

    /// Prefix shared by every variant id of `component`.
    pub fn variant_prefix(component: ComponentId) -> String {
        format!("{}-variant-", component.as_str())
    }

    /// Whether this id was synthesized as a variant of `component`.
    pub fn is_variant_of(&self, component: ComponentId) -> bool {
        self.as_str().starts_with(&Self::variant_prefix(component))
    }

    /// Decoration id for a category heading node.
    pub fn category_label(key: &str) -> Self {
        Self::intern(&format!("category-label-{key}"))
    }

    /// Decoration id for the backdrop block behind a component row.
    pub fn block_of(component: ComponentId) -> Self {
        Self::intern(&format!("block-{}", component.as_str()))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::intern(s)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("radio-group");
        let b = NodeId::intern("radio-group");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "radio-group");
    }

    #[test]
    fn variant_ids_follow_naming_scheme() {
        let button = NodeId::intern("button");
        let v = NodeId::variant_of(button, 3);
        assert_eq!(v.as_str(), "button-variant-3");
        assert!(v.is_variant_of(button));
        assert!(!button.is_variant_of(button));
        // A copy of a variant is not itself a variant id.
        let copy = NodeId::copy_of(button, 1_700_000_000_000);
        assert_eq!(copy.as_str(), "button-copy-1700000000000");
        assert!(!copy.is_variant_of(button));
    }

    #[test]
    fn display_is_bare_string() {
        let id = NodeId::intern("dropdown-menu");
        assert_eq!(id.to_string(), "dropdown-menu");
        assert_eq!(format!("{id:?}"), "#dropdown-menu");
    }

    #[test]
    fn decoration_ids() {
        assert_eq!(NodeId::category_label("form").as_str(), "category-label-form");
        assert_eq!(NodeId::block_of(NodeId::intern("card")).as_str(), "block-card");
    }
}
