//! Observer position providers
//!
//! The engine asks for the observer's horizontal position at the moment a
//! bearing is processed. Hosts plug in whatever tracks their local viewpoint.

use std::sync::{Arc, Mutex};

/// Source of the current observer position
pub trait ObserverPosition {
    /// Current `(x, z)` of the observer, or `None` if there is no viewpoint yet
    fn observer_position(&self) -> Option<(f64, f64)>;
}

impl<F> ObserverPosition for F
where
    F: Fn() -> Option<(f64, f64)>,
{
    fn observer_position(&self) -> Option<(f64, f64)> {
        self()
    }
}

/// Observer with a position set by hand
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedObserver {
    position: Option<(f64, f64)>,
}

impl FixedObserver {
    pub fn new(x: f64, z: f64) -> Self {
        Self {
            position: Some((x, z)),
        }
    }

    /// Observer without a viewpoint
    pub fn absent() -> Self {
        Self { position: None }
    }

    pub fn set(&mut self, x: f64, z: f64) {
        self.position = Some((x, z));
    }

    pub fn clear(&mut self) {
        self.position = None;
    }
}

impl ObserverPosition for FixedObserver {
    fn observer_position(&self) -> Option<(f64, f64)> {
        self.position
    }
}

/// Observer position shared between the host's update loop and the engine thread
#[derive(Debug, Clone, Default)]
pub struct SharedObserver {
    position: Arc<Mutex<Option<(f64, f64)>>>,
}

impl SharedObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, x: f64, z: f64) {
        *self.lock() = Some((x, z));
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(f64, f64)>> {
        // A writer that panicked cannot leave a half-written tuple behind
        self.position.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObserverPosition for SharedObserver {
    fn observer_position(&self) -> Option<(f64, f64)> {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_observer() {
        let mut observer = FixedObserver::absent();
        assert_eq!(observer.observer_position(), None);
        observer.set(1.0, -2.0);
        assert_eq!(observer.observer_position(), Some((1.0, -2.0)));
        observer.clear();
        assert_eq!(observer.observer_position(), None);
    }

    #[test]
    fn test_closure_observer() {
        let observer = || Some((5.0, 6.0));
        assert_eq!(observer.observer_position(), Some((5.0, 6.0)));
    }

    #[test]
    fn test_shared_observer_across_clones() {
        let observer = SharedObserver::new();
        let writer = observer.clone();
        writer.set(10.0, 20.0);
        assert_eq!(observer.observer_position(), Some((10.0, 20.0)));

        std::thread::spawn(move || writer.clear()).join().unwrap();
        assert_eq!(observer.observer_position(), None);
    }
}
