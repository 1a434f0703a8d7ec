//! Published render positions, one per entity key
//!
//! The presentation layer reads the store once per draw cycle through
//! [`RenderStateStore::snapshot`]. All writes happen on the engine's owning
//! thread, so a snapshot always sees whole descriptors.

use std::collections::hash_map::Values;
use std::collections::HashMap;

use crate::core::{Color, EntityKey, RenderDescriptor};

#[derive(Debug, Clone, Default)]
pub struct RenderStateStore {
    renders: HashMap<EntityKey, RenderDescriptor>,
}

impl RenderStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish (or replace) the position of `key`
    pub fn publish(&mut self, key: EntityKey, x: f64, z: f64, color: Color) -> RenderDescriptor {
        let descriptor = RenderDescriptor { x, z, color };
        self.renders.insert(key, descriptor);
        descriptor
    }

    /// Erase the position of `key`; absent keys are a no-op
    pub fn remove(&mut self, key: &EntityKey) -> Option<RenderDescriptor> {
        self.renders.remove(key)
    }

    pub fn get(&self, key: &EntityKey) -> Option<&RenderDescriptor> {
        self.renders.get(key)
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.renders.contains_key(key)
    }

    /// Erase everything, returning how many positions were published
    pub fn clear(&mut self) -> usize {
        let count = self.renders.len();
        self.renders.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.renders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            renders: &self.renders,
        }
    }
}

/// Borrowed view of the published positions.
///
/// Iteration is lazy and can be restarted any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    renders: &'a HashMap<EntityKey, RenderDescriptor>,
}

impl<'a> Snapshot<'a> {
    pub fn iter(&self) -> Values<'a, EntityKey, RenderDescriptor> {
        self.renders.values()
    }

    /// Key/descriptor pairs, for hosts that label their markers
    pub fn entries(&self) -> impl Iterator<Item = (&'a EntityKey, &'a RenderDescriptor)> + 'a {
        self.renders.iter()
    }

    pub fn len(&self) -> usize {
        self.renders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }

    /// Owned copy, for handing across threads
    pub fn to_vec(&self) -> Vec<RenderDescriptor> {
        self.iter().copied().collect()
    }
}

impl<'a> IntoIterator for Snapshot<'a> {
    type Item = &'a RenderDescriptor;
    type IntoIter = Values<'a, EntityKey, RenderDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.renders.values()
    }
}

impl<'a> IntoIterator for &Snapshot<'a> {
    type Item = &'a RenderDescriptor;
    type IntoIter = Values<'a, EntityKey, RenderDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.renders.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::from_rgb(255, 0, 0)
    }

    #[test]
    fn test_publish_replaces() {
        let mut store = RenderStateStore::new();
        let key = EntityKey::name("a");
        store.publish(key.clone(), 1.0, 2.0, red());
        store.publish(key.clone(), 3.0, 4.0, red());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key).map(|d| (d.x, d.z)), Some((3.0, 4.0)));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = RenderStateStore::new();
        assert!(store.remove(&EntityKey::name("ghost")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_is_restartable() {
        let mut store = RenderStateStore::new();
        store.publish(EntityKey::name("a"), 1.0, 1.0, red());
        store.publish(EntityKey::name("b"), 2.0, 2.0, red());

        let snapshot = store.snapshot();
        let first: f64 = snapshot.iter().map(|d| d.x).sum();
        let second: f64 = (&snapshot).into_iter().map(|d| d.x).sum();
        assert_eq!(first, 3.0);
        assert_eq!(second, 3.0);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.to_vec().len(), 2);
        assert_eq!(snapshot.entries().count(), 2);
    }

    #[test]
    fn test_clear_counts() {
        let mut store = RenderStateStore::new();
        store.publish(EntityKey::name("a"), 1.0, 1.0, red());
        assert_eq!(store.clear(), 1);
        assert!(store.snapshot().is_empty());
    }
}
