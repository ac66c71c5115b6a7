use std::collections::HashMap;

use crate::geometry::Rect;

/// Read-only lookup from a record's primary key to its current on-screen
/// rectangle.
///
/// The rendering layer owns the measurements; the engine only performs point
/// lookups during a hover and never retains what it reads.
pub trait SpatialRegistry {
    fn measure(&self, key: &str) -> Option<Rect>;
}

impl<R: SpatialRegistry + ?Sized> SpatialRegistry for &R {
    fn measure(&self, key: &str) -> Option<Rect> {
        (**self).measure(key)
    }
}

/// A [`SpatialRegistry`] backed by a map of the last measured rectangles.
///
/// Rendering code calls [`RectRegistry::register`] when a record is laid out and
/// [`RectRegistry::unregister`] when it goes away.
#[derive(Clone, Debug, Default)]
pub struct RectRegistry {
    rects: HashMap<String, Rect>,
}

impl RectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, rect: Rect) {
        self.rects.insert(key.into(), rect);
    }

    pub fn unregister(&mut self, key: &str) -> Option<Rect> {
        self.rects.remove(key)
    }

    /// Drop every measurement whose key is not accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.rects.retain(|key, _| keep(key));
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl SpatialRegistry for RectRegistry {
    fn measure(&self, key: &str) -> Option<Rect> {
        self.rects.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_replaces_previous_measurement() {
        let mut registry = RectRegistry::new();
        registry.register("a", Rect::new(0., 0., 10., 10.));
        registry.register("a", Rect::new(0., 10., 10., 10.));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.measure("a"), Some(Rect::new(0., 10., 10., 10.)));
    }

    #[test]
    fn unregister_and_retain_forget_keys() {
        let mut registry = RectRegistry::new();
        registry.register("a", Rect::new(0., 0., 10., 10.));
        registry.register("b", Rect::new(0., 10., 10., 10.));
        registry.register("c", Rect::new(0., 20., 10., 10.));

        assert!(registry.unregister("a").is_some());
        assert_eq!(registry.measure("a"), None);

        registry.retain(|key| key != "b");
        assert_eq!(registry.measure("b"), None);
        assert!(registry.measure("c").is_some());
    }
}
