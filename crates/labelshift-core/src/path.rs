//! Fraction-parameterised link paths.
//!
//! A link that exposes a continuous path lets labels be attached at a
//! fraction of the whole route instead of a specific segment. The
//! [`LinkPath`] trait is the contract hosts implement for their own path
//! representation; [`Polyline`] is a ready-made implementation that
//! parameterises a route of straight segments by arc length.

use crate::geometry::{Angle, Point};

/// A continuous path that can be sampled by fraction of its length.
///
/// Fractions are expected in `[0, 1]`, where `0` is the start of the path
/// and `1` is its end. Implementations clamp values outside that range.
pub trait LinkPath {
    /// Document point at `fraction` along the path
    fn point_at_fraction(&self, fraction: f32) -> Point;

    /// Tangent direction of the path at `fraction`
    fn angle_at_fraction(&self, fraction: f32) -> Angle;
}

/// A route of straight segments, sampled by arc length.
///
/// # Examples
///
/// ```
/// # use labelshift_core::geometry::{Angle, Point};
/// # use labelshift_core::path::{LinkPath, Polyline};
/// let route = Polyline::new(vec![
///     Point::new(0.0, 0.0),
///     Point::new(100.0, 0.0),
///     Point::new(100.0, 100.0),
/// ]);
///
/// assert_eq!(route.length(), 200.0);
/// assert_eq!(route.point_at_fraction(0.75), Point::new(100.0, 50.0));
/// assert_eq!(route.angle_at_fraction(0.75), Angle::from_degrees(90.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Creates a polyline through the given points
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the route points
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Total arc length of the route
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// Locates the segment containing `fraction` of the total length.
    ///
    /// Returns the segment's start index and the fraction within that
    /// segment. Zero-length segments are never selected.
    fn locate(&self, fraction: f32) -> Option<(usize, f32)> {
        let total = self.length();
        if total <= 0.0 {
            return None;
        }

        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut remaining = total * fraction;
        let mut last_non_empty = None;

        for (idx, pair) in self.points.windows(2).enumerate() {
            let seg_len = pair[0].distance(pair[1]);
            if seg_len <= 0.0 {
                continue;
            }
            if remaining <= seg_len {
                return Some((idx, (remaining / seg_len).clamp(0.0, 1.0)));
            }
            remaining -= seg_len;
            last_non_empty = Some(idx);
        }

        // Rounding can leave a sliver past the final segment
        last_non_empty.map(|idx| (idx, 1.0))
    }
}

impl LinkPath for Polyline {
    fn point_at_fraction(&self, fraction: f32) -> Point {
        match self.locate(fraction) {
            Some((idx, t)) => self.points[idx].lerp(self.points[idx + 1], t),
            None => self.points.first().copied().unwrap_or_default(),
        }
    }

    fn angle_at_fraction(&self, fraction: f32) -> Angle {
        match self.locate(fraction) {
            Some((idx, _)) => self.points[idx].direction_to(self.points[idx + 1]),
            None => Angle::ZERO,
        }
    }
}
