//! Pointer state tracked across one press-move-release cycle.

use crate::geometry::Point;

/// Pointer buttons distinguished by the tool chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Pointer state shared with tools while handling an event.
///
/// Tracks where the current gesture started, where the pointer is now, and
/// whether the primary button is held.
#[derive(Debug, Clone)]
pub struct InputState {
    press_point: Point,
    current_point: Point,
    primary_down: bool,
    drag_threshold: f32,
}

impl InputState {
    /// Creates an idle input state with the given click-versus-drag threshold
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            press_point: Point::default(),
            current_point: Point::default(),
            primary_down: false,
            drag_threshold,
        }
    }

    /// Document point where the current gesture started
    pub fn press_point(&self) -> Point {
        self.press_point
    }

    /// Most recent document point of the pointer
    pub fn current_point(&self) -> Point {
        self.current_point
    }

    /// Whether the primary button is held
    pub fn is_primary_down(&self) -> bool {
        self.primary_down
    }

    /// Configured click-versus-drag threshold
    pub fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    /// Whether the pointer has travelled strictly further than the drag
    /// threshold from the press point.
    pub fn is_beyond_drag_threshold(&self) -> bool {
        self.press_point.distance(self.current_point) > self.drag_threshold
    }

    pub(crate) fn press(&mut self, button: PointerButton, point: Point) {
        self.press_point = point;
        self.current_point = point;
        self.primary_down = button == PointerButton::Primary;
    }

    pub(crate) fn move_to(&mut self, point: Point) {
        self.current_point = point;
    }

    pub(crate) fn release(&mut self, point: Point) {
        self.current_point = point;
        self.primary_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_records_both_points() {
        let mut input = InputState::new(2.0);
        input.press(PointerButton::Primary, Point::new(5.0, 5.0));

        assert_eq!(input.press_point(), Point::new(5.0, 5.0));
        assert_eq!(input.current_point(), Point::new(5.0, 5.0));
        assert!(input.is_primary_down());
        assert!(!input.is_beyond_drag_threshold());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut input = InputState::new(2.0);
        input.press(PointerButton::Primary, Point::new(0.0, 0.0));

        input.move_to(Point::new(2.0, 0.0));
        assert!(!input.is_beyond_drag_threshold());

        input.move_to(Point::new(2.01, 0.0));
        assert!(input.is_beyond_drag_threshold());
    }

    #[test]
    fn test_secondary_press_does_not_hold_primary() {
        let mut input = InputState::new(2.0);
        input.press(PointerButton::Secondary, Point::new(0.0, 0.0));
        assert!(!input.is_primary_down());
    }

    #[test]
    fn test_release_updates_point_and_button() {
        let mut input = InputState::new(2.0);
        input.press(PointerButton::Primary, Point::new(0.0, 0.0));
        input.release(Point::new(9.0, 1.0));

        assert_eq!(input.current_point(), Point::new(9.0, 1.0));
        assert_eq!(input.press_point(), Point::new(0.0, 0.0));
        assert!(!input.is_primary_down());
    }
}
