//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;
use crate::point::Point;

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
///
/// Rectangles order by lower-left corner first, then by upper-right corner.
#[derive(
    Debug, Default, Copy, Clone, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Rect {
    /// The lower-left corner.
    p0: Point,
    /// The upper-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a new rectangle from the given opposite corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::new(Point::new(30, 20), Point::new(15, 40));
    /// assert_eq!(rect.left(), 15);
    /// assert_eq!(rect.bot(), 20);
    /// assert_eq!(rect.right(), 30);
    /// assert_eq!(rect.top(), 40);
    /// ```
    #[inline]
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a rectangle from all 4 sides (left, bottom, right, top).
    ///
    /// Sides are sorted, so `from_sides(30, 40, 10, 20)` describes the
    /// same rectangle as `from_sides(10, 20, 30, 40)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(15, 20, 30, 40);
    /// assert_eq!(rect.left(), 15);
    /// assert_eq!(rect.top(), 40);
    /// ```
    #[inline]
    pub fn from_sides(left: i64, bot: i64, right: i64, top: i64) -> Self {
        Self::new(Point::new(left, bot), Point::new(right, top))
    }

    /// Returns the bottom y-coordinate of the rectangle.
    #[inline]
    pub const fn bot(&self) -> i64 {
        self.p0.y
    }

    /// Returns the top y-coordinate of the rectangle.
    #[inline]
    pub const fn top(&self) -> i64 {
        self.p1.y
    }

    /// Returns the left x-coordinate of the rectangle.
    #[inline]
    pub const fn left(&self) -> i64 {
        self.p0.x
    }

    /// Returns the right x-coordinate of the rectangle.
    #[inline]
    pub const fn right(&self) -> i64 {
        self.p1.x
    }

    /// Returns the horizontal width of the rectangle.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(10, 20, 30, 50);
    /// assert_eq!(rect.width(), 20);
    /// ```
    #[inline]
    pub const fn width(&self) -> i64 {
        self.p1.x - self.p0.x
    }

    /// Returns the vertical height of the rectangle.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(10, 20, 30, 50);
    /// assert_eq!(rect.height(), 30);
    /// ```
    #[inline]
    pub const fn height(&self) -> i64 {
        self.p1.y - self.p0.y
    }

    /// Returns the extent of the rectangle along `dir`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(0, 0, 100, 20);
    /// assert_eq!(rect.length(Dir::Horiz), 100);
    /// assert_eq!(rect.length(Dir::Vert), 20);
    /// ```
    pub const fn length(&self, dir: Dir) -> i64 {
        match dir {
            Dir::Horiz => self.width(),
            Dir::Vert => self.height(),
        }
    }

    /// Returns the lower-left corner of the rectangle.
    #[inline]
    pub const fn lower_left(&self) -> Point {
        self.p0
    }

    /// Returns the upper-right corner of the rectangle.
    #[inline]
    pub const fn upper_right(&self) -> Point {
        self.p1
    }

    /// Returns `true` if every coordinate of the rectangle is zero.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert!(Rect::default().is_origin());
    /// assert!(!Rect::from_sides(0, 0, 0, 10).is_origin());
    /// ```
    pub const fn is_origin(&self) -> bool {
        self.p0.x == 0 && self.p0.y == 0 && self.p1.x == 0 && self.p1.y == 0
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let a = Rect::from_sides(0, 0, 10, 10);
    /// let b = Rect::from_sides(5, -5, 20, 5);
    /// assert_eq!(a.union(b), Rect::from_sides(0, -5, 20, 10));
    /// ```
    pub fn union(self, other: Self) -> Self {
        Self::from_sides(
            self.left().min(other.left()),
            self.bot().min(other.bot()),
            self.right().max(other.right()),
            self.top().max(other.top()),
        )
    }
}

impl std::fmt::Display for Rect {
    /// Displays the rectangle as its two corner points.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(1, 2, 3, 4);
    /// assert_eq!(rect.to_string(), "( 1 2 ) ( 3 4 )");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.p0, self.p1)
    }
}
