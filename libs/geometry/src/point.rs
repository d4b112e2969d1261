//! 2-D points.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;

/// A point in two-dimensional space.
#[derive(
    Debug, Copy, Clone, Default, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Point {
    /// The x-coordinate of the point.
    pub x: i64,
    /// The y-coordinate of the point.
    pub y: i64,
}

impl Point {
    /// Creates a new [`Point`] from (x,y) coordinates.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, `(0, 0)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let origin = Point::zero();
    /// assert_eq!(origin, Point::new(0, 0));
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Returns the axis along which `self` and `other` are aligned, if any.
    ///
    /// Points sharing an x-coordinate lie on a vertical line. Identical
    /// points report [`Dir::Vert`].
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let a = Point::new(0, 0);
    /// assert_eq!(a.aligned_with(Point::new(0, 5)), Some(Dir::Vert));
    /// assert_eq!(a.aligned_with(Point::new(5, 0)), Some(Dir::Horiz));
    /// assert_eq!(a.aligned_with(Point::new(5, 5)), None);
    /// ```
    pub const fn aligned_with(&self, other: Point) -> Option<Dir> {
        if self.x == other.x {
            Some(Dir::Vert)
        } else if self.y == other.y {
            Some(Dir::Horiz)
        } else {
            None
        }
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from(value: (i64, i64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

impl std::fmt::Display for Point {
    /// Displays the point as `( x y )`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Point::new(-4, 10).to_string(), "( -4 10 )");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "( {} {} )", self.x, self.y)
    }
}
