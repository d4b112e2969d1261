//! Conversion from database units to DEF distance units.

use geometry::point::Point;
use geometry::rect::Rect;

/// Scales database distances into the units declared by `UNITS DISTANCE MICRONS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    factor: f64,
}

impl Units {
    /// Creates a converter from `def_units` DEF units per micron and
    /// `db_units_per_micron` database units per micron.
    ///
    /// A non-positive unit count leaves distances unscaled.
    pub fn new(def_units: i32, db_units_per_micron: i32) -> Self {
        let factor = if def_units > 0 && db_units_per_micron > 0 {
            def_units as f64 / db_units_per_micron as f64
        } else {
            1.0
        };
        Self { factor }
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Converts a distance, rounding half away from zero.
    #[inline]
    pub fn dist(&self, v: i64) -> i64 {
        (v as f64 * self.factor).round() as i64
    }

    #[inline]
    pub fn point(&self, p: Point) -> Point {
        Point::new(self.dist(p.x), self.dist(p.y))
    }

    #[inline]
    pub fn rect(&self, r: Rect) -> Rect {
        Rect::new(self.point(r.lower_left()), self.point(r.upper_right()))
    }
}
