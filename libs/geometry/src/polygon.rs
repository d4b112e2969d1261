//! Integer coordinate polygons.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::rect::Rect;

/// A polygon, with vertex coordinates given in order.
///
/// The last vertex is implicitly connected to the first. A trailing copy of
/// the first vertex is tolerated and ignored by [`Polygon::vertices`].
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Polygon {
    /// Vector of points that make up the polygon.
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon with given vertices.
    pub fn from_verts(vec: Vec<Point>) -> Self {
        Self { points: vec }
    }

    /// Creates a rectangular polygon, listing corners counter-clockwise
    /// from the lower left.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let poly = Polygon::from_rect(Rect::from_sides(0, 0, 10, 20));
    /// assert_eq!(poly.points().len(), 4);
    /// assert!(poly.is_rect());
    /// ```
    pub fn from_rect(rect: Rect) -> Self {
        Self::from_verts(vec![
            Point::new(rect.left(), rect.bot()),
            Point::new(rect.right(), rect.bot()),
            Point::new(rect.right(), rect.top()),
            Point::new(rect.left(), rect.top()),
        ])
    }

    /// Returns a the vector of points representing the polygon.
    pub fn points(&self) -> &Vec<Point> {
        &self.points
    }

    /// Returns the distinct vertices of the polygon, without a closing
    /// duplicate of the first vertex.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let poly = Polygon::from_verts(vec![
    ///     Point::new(0, 0),
    ///     Point::new(10, 0),
    ///     Point::new(0, 10),
    ///     Point::new(0, 0),
    /// ]);
    /// assert_eq!(poly.vertices().len(), 3);
    /// ```
    pub fn vertices(&self) -> &[Point] {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 && first == last => {
                &self.points[..self.points.len() - 1]
            }
            _ => &self.points,
        }
    }

    /// Returns the smallest rectangle enclosing every vertex, or `None`
    /// if the polygon has no vertices.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let points = vec![
    ///     Point { x: 0, y: 0 },
    ///     Point { x: 1, y: 2 },
    ///     Point { x: -4, y: 5 },
    /// ];
    /// let polygon = Polygon::from_verts(points);
    /// assert_eq!(polygon.bbox(), Some(Rect::from_sides(-4, 0, 1, 5)));
    /// ```
    pub fn bbox(&self) -> Option<Rect> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        Some(iter.fold(Rect::new(*first, *first), |acc, p| {
            acc.union(Rect::new(*p, *p))
        }))
    }

    /// Returns `true` if the polygon is an axis-aligned rectangle.
    ///
    /// An empty polygon is treated as the degenerate rectangle at the origin.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let l_shape = Polygon::from_verts(vec![
    ///     Point::new(0, 0),
    ///     Point::new(20, 0),
    ///     Point::new(20, 10),
    ///     Point::new(10, 10),
    ///     Point::new(10, 20),
    ///     Point::new(0, 20),
    /// ]);
    /// assert!(!l_shape.is_rect());
    /// assert!(Polygon::default().is_rect());
    /// ```
    pub fn is_rect(&self) -> bool {
        let verts = self.vertices();
        if verts.is_empty() {
            return true;
        }
        if verts.len() != 4 {
            return false;
        }
        let Some(bbox) = self.bbox() else {
            return false;
        };
        let on_corner = |p: &Point| {
            (p.x == bbox.left() || p.x == bbox.right()) && (p.y == bbox.bot() || p.y == bbox.top())
        };
        (0..4).all(|i| verts[i].aligned_with(verts[(i + 1) % 4]).is_some())
            && verts.iter().all(on_corner)
    }
}

impl From<Rect> for Polygon {
    fn from(value: Rect) -> Self {
        Self::from_rect(value)
    }
}
