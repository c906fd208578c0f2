//! Geometric primitives for link label positioning.
//!
//! This module provides the geometric types used throughout Labelshift for
//! pointer arithmetic, rotation into a link's local frame, and hit-testing.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (or vector) in document space
//! - [`Angle`] - A rotation angle measured in degrees
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Labelshift uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! Because Y grows downward, a positive [`Angle`] rotates clockwise on screen.
//! An angle of `0` points along `+X` and `90` points along `+Y`.

use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// A 2D point representing a position (or displacement) in document space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
///
/// # Examples
///
/// ```
/// # use labelshift_core::geometry::{Angle, Point};
/// let pointer = Point::new(60.0, 10.0);
/// let anchor = Point::new(50.0, 0.0);
///
/// let offset = pointer.sub_point(anchor);
/// assert_eq!(offset, Point::new(10.0, 10.0));
///
/// // Rotating by a quarter turn maps +X onto +Y
/// let turned = Point::new(1.0, 0.0).rotate(Angle::from_degrees(90.0));
/// assert_eq!(turned, Point::new(0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks if both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        self.lerp(other, 0.5)
    }

    /// Linearly interpolates towards `other`.
    ///
    /// A `fraction` of `0.0` yields `self`, `1.0` yields `other`. Values
    /// outside that range extrapolate along the same line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use labelshift_core::geometry::Point;
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(100.0, 40.0);
    /// assert_eq!(a.lerp(b, 0.25), Point::new(25.0, 10.0));
    /// ```
    pub fn lerp(self, other: Point, fraction: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * fraction,
            y: self.y + (other.y - self.y) * fraction,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Rotates this vector about the origin by `angle`.
    ///
    /// Quarter turns are computed exactly so that axis-aligned links do not
    /// accumulate rounding noise in stored offsets.
    ///
    /// # Examples
    ///
    /// ```
    /// # use labelshift_core::geometry::{Angle, Point};
    /// let v = Point::new(10.0, 10.0);
    /// assert_eq!(v.rotate(Angle::from_degrees(0.0)), v);
    /// assert_eq!(v.rotate(Angle::from_degrees(180.0)), Point::new(-10.0, -10.0));
    /// assert_eq!(v.rotate(Angle::from_degrees(-90.0)), Point::new(10.0, -10.0));
    /// ```
    pub fn rotate(self, angle: Angle) -> Self {
        let degrees = angle.normalized().degrees();
        if degrees == 0.0 {
            self
        } else if degrees == 90.0 {
            Self::new(-self.y, self.x)
        } else if degrees == 180.0 {
            Self::new(-self.x, -self.y)
        } else if degrees == 270.0 {
            Self::new(self.y, -self.x)
        } else {
            let (sin, cos) = angle.radians().sin_cos();
            Self::new(
                self.x * cos - self.y * sin,
                self.x * sin + self.y * cos,
            )
        }
    }

    /// Direction of travel from this point towards `other`.
    ///
    /// The result is normalized to `[0, 360)`. Coincident points have no
    /// direction; [`Angle::ZERO`] is returned for them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use labelshift_core::geometry::{Angle, Point};
    /// let origin = Point::new(0.0, 0.0);
    /// assert_eq!(origin.direction_to(Point::new(0.0, 5.0)), Angle::from_degrees(90.0));
    /// assert_eq!(origin.direction_to(origin), Angle::ZERO);
    /// ```
    pub fn direction_to(self, other: Point) -> Angle {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return Angle::ZERO;
        }
        if dy == 0.0 {
            return if dx > 0.0 {
                Angle::ZERO
            } else {
                Angle::from_degrees(180.0)
            };
        }
        if dx == 0.0 {
            return if dy > 0.0 {
                Angle::from_degrees(90.0)
            } else {
                Angle::from_degrees(270.0)
            };
        }
        Angle::from_radians(dy.atan2(dx)).normalized()
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// A rotation angle in degrees.
///
/// Angles follow the screen convention of the document space: positive
/// values turn clockwise because the Y axis points down.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f32);

impl Angle {
    /// The zero angle, pointing along `+X`
    pub const ZERO: Angle = Angle(0.0);

    /// Creates an angle from degrees
    pub fn from_degrees(degrees: f32) -> Self {
        Self(degrees)
    }

    /// Creates an angle from radians
    pub fn from_radians(radians: f32) -> Self {
        Self(radians.to_degrees())
    }

    /// Returns the angle in degrees
    pub fn degrees(self) -> f32 {
        self.0
    }

    /// Returns the angle in radians
    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Returns the equivalent angle within `[0, 360)`
    pub fn normalized(self) -> Self {
        let degrees = self.0.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if degrees >= 360.0 {
            Self(0.0)
        } else {
            Self(degrees)
        }
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Checks whether `point` lies inside the bounds, edges included.
    ///
    /// # Examples
    ///
    /// ```
    /// # use labelshift_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_center(Point::new(50.0, 0.0), Size::new(20.0, 10.0));
    /// assert!(bounds.contains(Point::new(60.0, 5.0)));
    /// assert!(!bounds.contains(Point::new(61.0, 0.0)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}
