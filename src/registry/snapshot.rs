//! Atomic schema snapshot storage
//!
//! One generation of the name-to-schema mapping, held behind an atomically
//! swappable reference. Reads never lock; the only write replaces the whole
//! generation, so a reader can never observe a half-populated mapping.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::schema::Schema;

/// One immutable generation of the cache contents
#[derive(Debug, Default)]
pub struct SchemaSnapshot {
    /// Schemas keyed by name
    schemas: BTreeMap<String, Schema>,
}

impl SchemaSnapshot {
    /// Build a snapshot from schemas in fetch order
    ///
    /// Duplicate names keep the last schema seen.
    pub fn from_schemas(schemas: Vec<Schema>) -> Self {
        let mut by_name = BTreeMap::new();
        for schema in schemas {
            by_name.insert(schema.name().to_string(), schema);
        }

        Self { schemas: by_name }
    }

    /// Look up a schema by name
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Whether the snapshot holds the given name
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// All schemas, in name order
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Number of schemas in this generation
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether this generation is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Holder of the current snapshot, swappable in one atomic step
///
/// Callers build a complete [`SchemaSnapshot`] off to the side and publish
/// it with [`SchemaStore::replace`]; there is no partial update API. An
/// in-flight reader that loaded the previous generation keeps its `Arc`
/// alive until it is done with it.
#[derive(Debug, Default)]
pub struct SchemaStore {
    current: ArcSwap<SchemaSnapshot>,
}

impl SchemaStore {
    /// Create a store holding an empty snapshot
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(SchemaSnapshot::default()),
        }
    }

    /// The snapshot visible at call time
    pub fn current(&self) -> Arc<SchemaSnapshot> {
        self.current.load_full()
    }

    /// Atomically install a new snapshot
    pub fn replace(&self, snapshot: SchemaSnapshot) {
        self.current.store(Arc::new(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Schema {
        Schema::new(name, Vec::new())
    }

    #[test]
    fn starts_empty() {
        let store = SchemaStore::new();
        assert!(store.current().is_empty());
    }

    #[test]
    fn duplicate_names_keep_the_last_schema() {
        let older = Schema::new(
            "Visit",
            vec![crate::schema::SchemaField::new(
                "old_field",
                crate::schema::FieldType::String,
                1,
                None,
                None,
            )
            .unwrap()],
        );
        let newer = named("Visit");

        let snapshot = SchemaSnapshot::from_schemas(vec![older, newer.clone()]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("Visit"), Some(&newer));
    }

    #[test]
    fn replace_swaps_the_whole_generation() {
        let store = SchemaStore::new();
        store.replace(SchemaSnapshot::from_schemas(vec![named("A"), named("B")]));

        let before = store.current();
        store.replace(SchemaSnapshot::from_schemas(vec![named("C")]));
        let after = store.current();

        // The old generation is untouched for readers that still hold it
        assert!(before.contains("A"));
        assert!(before.contains("B"));
        assert!(!before.contains("C"));

        assert!(after.contains("C"));
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn schemas_iterate_in_name_order() {
        let snapshot = SchemaSnapshot::from_schemas(vec![named("B"), named("C"), named("A")]);
        let names: Vec<&str> = snapshot.schemas().map(Schema::name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
