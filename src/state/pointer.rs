// Per-interaction pointer tracking: ids, origins, and a release-velocity sample.
use std::collections::BTreeMap;

use crate::gesture::Vec2;

pub type PointerId = i32;

/// One pointer event, in coordinates relative to the carousel element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub position: Vec2,
    pub time_ms: f64,
}

impl PointerSample {
    pub fn new(id: PointerId, x: f64, y: f64, time_ms: f64) -> Self {
        Self {
            id,
            position: Vec2::new(x, y),
            time_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedPointer {
    pub origin: Vec2,
    pub current: Vec2,
}

#[derive(Default, Debug, Clone)]
pub struct GestureState {
    pointers: BTreeMap<PointerId, TrackedPointer>,
    pub start_ms: f64,
    last_x: f64,
    last_ms: f64,
    velocity: f64,
}

impl GestureState {
    pub const MAX_POINTERS: usize = 2;

    pub fn count(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.pointers.contains_key(&id)
    }

    /// Start tracking a pointer. Returns `false` when already full or known.
    pub fn insert(&mut self, sample: PointerSample) -> bool {
        if self.pointers.len() >= Self::MAX_POINTERS || self.contains(sample.id) {
            return false;
        }
        if self.pointers.is_empty() {
            self.start_ms = sample.time_ms;
        }
        self.pointers.insert(
            sample.id,
            TrackedPointer {
                origin: sample.position,
                current: sample.position,
            },
        );
        self.rebase_velocity(sample.position.x, sample.time_ms);
        true
    }

    /// Move a known pointer, returning its previous position.
    pub fn update(&mut self, sample: PointerSample) -> Option<Vec2> {
        let single = self.pointers.len() == 1;
        let p = self.pointers.get_mut(&sample.id)?;
        let previous = p.current;
        p.current = sample.position;
        if single {
            let dt = (sample.time_ms - self.last_ms).max(1.0);
            self.velocity = (sample.position.x - self.last_x) / dt;
            self.last_x = sample.position.x;
            self.last_ms = sample.time_ms;
        }
        Some(previous)
    }

    pub fn remove(&mut self, id: PointerId) -> Option<TrackedPointer> {
        self.pointers.remove(&id)
    }

    pub fn get(&self, id: PointerId) -> Option<&TrackedPointer> {
        self.pointers.get(&id)
    }

    /// The only pointer when exactly one is down.
    pub fn single(&self) -> Option<&TrackedPointer> {
        if self.pointers.len() == 1 {
            self.pointers.values().next()
        } else {
            None
        }
    }

    /// Current positions of both pointers of a pinch.
    pub fn pair(&self) -> Option<(Vec2, Vec2)> {
        let mut it = self.pointers.values();
        let a = it.next()?;
        let b = it.next()?;
        Some((a.current, b.current))
    }

    /// Treat every pointer's current position as its new origin. Used when
    /// the pointer count changes so offsets restart from zero.
    pub fn rebase(&mut self, time_ms: f64) {
        for p in self.pointers.values_mut() {
            p.origin = p.current;
        }
        if let Some(x) = self.pointers.values().next().map(|p| p.current.x) {
            self.rebase_velocity(x, time_ms);
        }
    }

    fn rebase_velocity(&mut self, x: f64, time_ms: f64) {
        self.last_x = x;
        self.last_ms = time_ms;
        self.velocity = 0.0;
    }

    /// Horizontal velocity (px/ms) from the two latest move samples, or zero
    /// when the pointer rested longer than `stale_ms` before `release_ms`.
    pub fn release_velocity(&self, release_ms: f64, stale_ms: f64) -> f64 {
        if release_ms - self.last_ms > stale_ms || !self.velocity.is_finite() {
            0.0
        } else {
            self.velocity
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_at_most_two_pointers() {
        let mut g = GestureState::default();
        assert!(g.insert(PointerSample::new(1, 0.0, 0.0, 0.0)));
        assert!(!g.insert(PointerSample::new(1, 5.0, 0.0, 1.0)));
        assert!(g.insert(PointerSample::new(2, 10.0, 0.0, 1.0)));
        assert!(!g.insert(PointerSample::new(3, 20.0, 0.0, 2.0)));
        assert_eq!(g.count(), 2);
        assert!(g.single().is_none());
        assert!(g.pair().is_some());
    }

    #[test]
    fn velocity_uses_latest_sample() {
        let mut g = GestureState::default();
        g.insert(PointerSample::new(7, 300.0, 0.0, 0.0));
        g.update(PointerSample::new(7, 280.0, 0.0, 10.0));
        g.update(PointerSample::new(7, 200.0, 0.0, 26.0));
        assert_eq!(g.release_velocity(26.0, 100.0), -5.0);
    }

    #[test]
    fn rested_pointer_has_no_velocity() {
        let mut g = GestureState::default();
        g.insert(PointerSample::new(7, 300.0, 0.0, 0.0));
        g.update(PointerSample::new(7, 200.0, 0.0, 16.0));
        assert_eq!(g.release_velocity(500.0, 100.0), 0.0);
    }

    #[test]
    fn rebase_moves_origin_to_current() {
        let mut g = GestureState::default();
        g.insert(PointerSample::new(1, 0.0, 0.0, 0.0));
        g.update(PointerSample::new(1, 40.0, 10.0, 16.0));
        g.rebase(16.0);
        let p = g.get(1).unwrap();
        assert_eq!(p.origin, p.current);
        assert_eq!(g.release_velocity(16.0, 100.0), 0.0);
    }
}
