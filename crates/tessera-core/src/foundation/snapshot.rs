//! In-memory [`Subject`] implementation.
//!
//! Hosts that prefer to copy state out of the game thread can build a
//! [`SubjectSnapshot`] and hand it to the resolver. Snapshots also
//! deserialize from JSON, which the `inspect` demo relies on.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::handle::{FieldSlot, FieldValue, HandleShape, HiddenHandle};
use super::subject::{Inventory, ItemView, Property, Slot, Subject, Value};
use crate::error::{AccessError, AccessResult};

/// A [`HiddenHandle`] backed by an ordered map of named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldHandle {
    pub type_name: String,
    #[serde(default)]
    pub fields: IndexMap<String, FieldValue>,
}

impl FieldHandle {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

impl HiddenHandle for FieldHandle {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn shape(&self) -> AccessResult<HandleShape> {
        Ok(HandleShape::new(
            self.type_name.clone(),
            self.fields.keys().cloned().collect(),
        ))
    }

    fn read(&self, slot: FieldSlot) -> AccessResult<FieldValue> {
        self.fields
            .get_index(slot.0)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| AccessError::read_failed(slot.0, "slot outside handle"))
    }
}

/// A subject whose state was captured ahead of resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectSnapshot {
    pub name: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub properties: HashMap<Property, Value>,
    #[serde(default)]
    pub items: HashMap<Slot, ItemView>,
    #[serde(default)]
    pub inventory: Option<Inventory>,
    #[serde(default)]
    pub permissions: HashSet<String>,
    #[serde(default)]
    pub handle: Option<FieldHandle>,
}

impl SubjectSnapshot {
    /// Creates an online snapshot with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            online: true,
            ..Default::default()
        }
    }

    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    pub fn with(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.properties.insert(property, value.into());
        self
    }

    pub fn with_item(mut self, slot: Slot, item: ItemView) -> Self {
        self.items.insert(slot, item);
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.insert(node.into());
        self
    }

    pub fn with_handle(mut self, handle: FieldHandle) -> Self {
        self.handle = Some(handle);
        self
    }
}

impl Subject for SubjectSnapshot {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_online(&self) -> bool {
        self.online
    }

    fn property(&self, property: Property) -> Option<Value> {
        self.properties.get(&property).cloned()
    }

    fn item(&self, slot: Slot) -> Option<ItemView> {
        self.items.get(&slot).cloned()
    }

    fn inventory(&self) -> Option<Inventory> {
        self.inventory.clone()
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.contains(node)
    }

    fn handle(&self) -> AccessResult<&dyn HiddenHandle> {
        match &self.handle {
            Some(handle) => Ok(handle),
            None => Err(AccessError::no_handle(&self.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_handle_slots_follow_insertion_order() {
        let handle = FieldHandle::new("EntityPlayer")
            .field("locale", FieldValue::Text("de_DE".into()))
            .field("ping", FieldValue::Int(42));
        let shape = handle.shape().unwrap();

        let slot = shape.slot_of("ping").unwrap();
        assert_eq!(slot, FieldSlot(1));
        assert_eq!(handle.read(slot).unwrap(), FieldValue::Int(42));
        assert!(shape.slot_of("latency").is_none());
    }

    #[test]
    fn test_snapshot_deserializes_from_json() {
        let json = r#"{
            "name": "Alice",
            "online": true,
            "properties": { "level": 3, "health": 19.5, "world": "world" },
            "handle": { "type_name": "EntityPlayer", "fields": { "ping": 7 } }
        }"#;
        let snapshot: SubjectSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.property(Property::Level), Some(Value::Int(3)));
        assert_eq!(snapshot.property(Property::Health), Some(Value::Float(19.5)));
        assert!(snapshot.handle().is_ok());
    }

    #[test]
    fn test_liveness_is_not_a_property() {
        let json = r#"{ "name": "Alice", "online": false, "properties": { "online": true } }"#;
        assert!(serde_json::from_str::<SubjectSnapshot>(json).is_err());

        let json = r#"{ "name": "Alice", "online": false }"#;
        let snapshot: SubjectSnapshot = serde_json::from_str(json).unwrap();
        assert!(!snapshot.is_online());
    }

    #[test]
    fn test_snapshot_without_handle_reports_no_handle() {
        let snapshot = SubjectSnapshot::new("Bob");
        assert!(matches!(
            snapshot.handle(),
            Err(AccessError::NoHandle { .. })
        ));
    }
}
