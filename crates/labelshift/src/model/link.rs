//! Route geometry of an in-memory link.

use crate::{
    diagram::LinkGeometry,
    geometry::{Angle, Point},
    path::{LinkPath, Polyline},
};

/// The route of a link: ordered points, optionally sampled as a continuous path.
///
/// The midpoint and mid-angle are measured by arc length along the route,
/// whether or not the continuous path is exposed to labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkShape {
    route: Polyline,
    has_path: bool,
}

impl LinkShape {
    /// Creates a link through `points` without a continuous path
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            route: Polyline::new(points),
            has_path: false,
        }
    }

    /// Exposes the route as a continuous path (builder style)
    pub fn with_path(mut self) -> Self {
        self.has_path = true;
        self
    }

    /// Whether labels may attach to a fraction of the whole route
    pub fn has_path(&self) -> bool {
        self.has_path
    }

    /// Replaces the route points, keeping the path setting
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.route = Polyline::new(points);
    }
}

impl LinkGeometry for LinkShape {
    fn points(&self) -> &[Point] {
        self.route.points()
    }

    fn mid_point(&self) -> Point {
        self.route.point_at_fraction(0.5)
    }

    fn mid_angle(&self) -> Angle {
        self.route.angle_at_fraction(0.5)
    }

    fn path(&self) -> Option<&dyn LinkPath> {
        if self.has_path {
            Some(&self.route)
        } else {
            None
        }
    }
}
