//! Pointer tracker
//!
//! Written by input callbacks, read by the tick. Both run on the host's
//! single event queue, so the tick takes a `Copy` snapshot at the start of a
//! frame and uses it for the whole step.

use glam::Vec2;

/// Pointer position in surface coordinates plus its interaction radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// `None` while the pointer is outside the surface
    pub position: Option<Vec2>,
    pub radius: f32,
}

impl Pointer {
    /// An absent pointer with the given interaction radius
    pub fn new(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    /// A pointer already placed at `pos`
    pub fn at(pos: Vec2, radius: f32) -> Self {
        Self {
            position: Some(pos),
            radius,
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = Some(Vec2::new(x, y));
    }

    pub fn leave(&mut self) {
        self.position = None;
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }

    /// Distance from `point` to the pointer, `None` when absent
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> Option<f32> {
        self.position.map(|p| p.distance(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_starts_absent() {
        let pointer = Pointer::new(150.0);
        assert!(!pointer.is_present());
        assert_eq!(pointer.distance_to(Vec2::ZERO), None);
    }

    #[test]
    fn test_pointer_move_and_leave() {
        let mut pointer = Pointer::new(100.0);
        pointer.move_to(3.0, 4.0);
        assert_eq!(pointer.distance_to(Vec2::ZERO), Some(5.0));

        pointer.leave();
        assert!(!pointer.is_present());
        assert_eq!(pointer.radius, 100.0);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut live = Pointer::at(Vec2::new(10.0, 10.0), 150.0);
        let snapshot = live;
        live.move_to(50.0, 50.0);
        assert_eq!(snapshot.position, Some(Vec2::new(10.0, 10.0)));
    }
}
