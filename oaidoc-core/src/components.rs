use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::schema::Schema;

/// Named schemas of one document, plus the bookkeeping that keeps names
/// unique per type identity.
///
/// A name is reserved before a struct's fields are walked, so forward
/// references emitted for cycles already point at the final name. The body
/// is inserted once the walk completes.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    schemas: BTreeMap<String, Schema>,
    owners: HashMap<String, TypeId>,
    by_key: HashMap<(TypeId, Option<String>), String>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name already assigned to `id` generated under `explicit`.
    pub fn lookup(&self, id: TypeId, explicit: Option<&str>) -> Option<&str> {
        self.by_key
            .get(&(id, explicit.map(str::to_string)))
            .map(String::as_str)
    }

    /// Reserve a name for `id`. When `wanted` belongs to another type, the
    /// first free numeric suffix is used instead (`User2`, `User3`, ...).
    pub fn reserve(&mut self, id: TypeId, explicit: Option<&str>, wanted: &str) -> String {
        let key = (id, explicit.map(str::to_string));
        if let Some(name) = self.by_key.get(&key) {
            return name.clone();
        }

        let mut name = wanted.to_string();
        let mut suffix = 2;
        while self.owners.get(&name).is_some_and(|owner| *owner != id) {
            name = format!("{wanted}{suffix}");
            suffix += 1;
        }
        if name != wanted {
            tracing::warn!(wanted, assigned = %name, "component name taken by another type");
        }

        self.owners.insert(name.clone(), id);
        self.by_key.insert(key, name.clone());
        name
    }

    /// Store the finished body for a reserved name.
    pub fn insert(&mut self, name: &str, schema: Schema) {
        tracing::debug!(component = name, "registered component");
        self.schemas.insert(name.to_string(), schema);
    }

    /// Drop a reservation whose body was never inserted.
    pub fn release(&mut self, name: &str) {
        if self.schemas.contains_key(name) {
            return;
        }
        self.owners.remove(name);
        self.by_key.retain(|_, v| v != name);
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// `true` once the body for `name` has been inserted.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for ComponentTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Components", 1)?;
        state.serialize_field("schemas", &self.schemas)?;
        state.end()
    }
}
