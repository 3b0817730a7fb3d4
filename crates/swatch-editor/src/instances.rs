//! Canonical component instance store.
//!
//! Owns the authoritative prop values of every instance on the canvas.
//! Canvas nodes carry a cached copy that the session refreshes after each
//! mutation here.

use serde::Serialize;
use std::collections::HashMap;
use swatch_core::id::{ComponentId, NodeId};
use swatch_core::props::Props;

/// One placed component and its current props.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    pub id: NodeId,
    pub component_id: ComponentId,
    pub props: Props,
}

impl ComponentInstance {
    pub fn new(id: NodeId, component_id: ComponentId, props: Props) -> Self {
        Self {
            id,
            component_id,
            props,
        }
    }

    /// The base instance shares its component's id.
    pub fn is_base(&self) -> bool {
        self.id == self.component_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstanceStore {
    instances: HashMap<NodeId, ComponentInstance>,
}

impl InstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new instance. An id that is already present is rejected
    /// and the existing entry kept.
    pub fn add_instance(&mut self, instance: ComponentInstance) -> bool {
        if self.instances.contains_key(&instance.id) {
            log::warn!("instance {} already exists; keeping the existing entry", instance.id);
            return false;
        }
        log::debug!("instance added: {} ({})", instance.id, instance.component_id);
        self.instances.insert(instance.id, instance);
        true
    }

    /// Shallow-merge `partial` into the instance's props; later keys win.
    pub fn update_instance(&mut self, id: NodeId, partial: &Props) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        for (name, value) in partial {
            instance.props.insert(name.clone(), value.clone());
        }
        true
    }

    /// Replace the instance's props wholesale.
    pub fn replace_props(&mut self, id: NodeId, props: Props) -> bool {
        match self.instances.get_mut(&id) {
            Some(instance) => {
                instance.props = props;
                true
            }
            None => false,
        }
    }

    pub fn delete_instance(&mut self, id: NodeId) -> bool {
        let removed = self.instances.remove(&id).is_some();
        if removed {
            log::debug!("instance removed: {id}");
        }
        removed
    }

    pub fn get_instance(&self, id: NodeId) -> Option<&ComponentInstance> {
        self.instances.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every instance for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&ComponentInstance) -> bool) {
        self.instances.retain(|_, instance| keep(instance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_core::props::PropValue;

    fn props(pairs: &[(&str, PropValue)]) -> Props {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn button() -> ComponentInstance {
        let id = NodeId::intern("button");
        ComponentInstance::new(id, id, props(&[("variant", PropValue::option("default"))]))
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut store = InstanceStore::new();
        assert!(store.add_instance(button()));

        let mut other = button();
        other.props.clear();
        assert!(!store.add_instance(other));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get_instance(NodeId::intern("button")).unwrap().props.len(),
            1
        );
    }

    #[test]
    fn update_is_a_shallow_merge() {
        let mut store = InstanceStore::new();
        store.add_instance(button());
        let id = NodeId::intern("button");

        store.update_instance(
            id,
            &props(&[
                ("variant", PropValue::option("ghost")),
                ("disabled", PropValue::Bool(true)),
            ]),
        );
        assert_eq!(
            store.get_instance(id).unwrap().props,
            props(&[
                ("disabled", PropValue::Bool(true)),
                ("variant", PropValue::option("ghost")),
            ])
        );
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut store = InstanceStore::new();
        let ghost = NodeId::intern("ghost-instance");
        assert!(!store.update_instance(ghost, &Props::new()));
        assert!(!store.replace_props(ghost, Props::new()));
        assert!(!store.delete_instance(ghost));
        assert!(store.get_instance(ghost).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn base_detection() {
        assert!(button().is_base());
        let variant = ComponentInstance::new(
            NodeId::intern("button-variant-1"),
            NodeId::intern("button"),
            Props::new(),
        );
        assert!(!variant.is_base());
    }
}
