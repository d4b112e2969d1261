//! Reduction of special wire boxes to a centerline and a width.

use arcstr::ArcStr;
use geometry::dir::Dir;
use geometry::oct::Oct;
use geometry::point::Point;
use geometry::rect::Rect;

use crate::error::{Error, Result};
use crate::model::SBoxDir;
use crate::units::Units;

/// A wire segment given by its centerline endpoints and its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centerline {
    pub start: Point,
    pub end: Point,
    pub width: i64,
}

impl Centerline {
    /// Converts the segment to DEF distance units.
    pub fn to_def(self, units: &Units) -> Self {
        Self {
            start: units.point(self.start),
            end: units.point(self.end),
            width: units.dist(self.width),
        }
    }
}

/// Splits `rect` along its run direction.
///
/// A box of undefined direction runs along its longer side when both sides
/// are even, or across its even side when exactly one is. A box with two odd
/// sides has no exact centerline.
pub fn decompose_rect(net: &ArcStr, rect: Rect, dir: SBoxDir) -> Result<Centerline> {
    let dx = rect.length(Dir::Horiz);
    let dy = rect.length(Dir::Vert);

    let run = match dir {
        SBoxDir::Horizontal => Dir::Horiz,
        SBoxDir::Vertical => Dir::Vert,
        SBoxDir::Undefined => match (dx % 2 == 0, dy % 2 == 0) {
            (true, true) if dy < dx => Dir::Horiz,
            (true, true) => Dir::Vert,
            (true, false) => Dir::Vert,
            (false, true) => Dir::Horiz,
            (false, false) => {
                return Err(Error::OddDimensions {
                    net: net.clone(),
                    rect,
                })
            }
        },
    };

    let width = rect.length(run.other());
    let (mut start, mut end) = (rect.lower_left(), rect.upper_right());
    match run {
        Dir::Horiz => {
            start.y += width / 2;
            end.y -= width / 2;
        }
        Dir::Vert => {
            start.x += width / 2;
            end.x -= width / 2;
        }
    }
    Ok(Centerline { start, end, width })
}

pub fn decompose_oct(oct: &Oct) -> Centerline {
    Centerline {
        start: oct.center_low,
        end: oct.center_high,
        width: oct.width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net() -> ArcStr {
        arcstr::literal!("VDD")
    }

    #[test]
    fn horizontal_box() {
        let c = decompose_rect(&net(), Rect::from_sides(0, 0, 1000, 20), SBoxDir::Horizontal)
            .unwrap();
        assert_eq!(c.width, 20);
        assert_eq!(c.start, Point::new(0, 10));
        assert_eq!(c.end, Point::new(1000, 10));
    }

    #[test]
    fn vertical_box() {
        let c =
            decompose_rect(&net(), Rect::from_sides(100, 0, 140, 500), SBoxDir::Vertical).unwrap();
        assert_eq!(c.width, 40);
        assert_eq!(c.start, Point::new(120, 0));
        assert_eq!(c.end, Point::new(120, 500));
    }

    #[test]
    fn undefined_box_runs_along_longer_side() {
        let c = decompose_rect(&net(), Rect::from_sides(0, 0, 100, 10), SBoxDir::Undefined)
            .unwrap();
        assert_eq!(c.width, 10);
        assert_eq!((c.start.y, c.end.y), (5, 5));

        let c = decompose_rect(&net(), Rect::from_sides(0, 0, 10, 10), SBoxDir::Undefined)
            .unwrap();
        assert_eq!(c.width, 10);
        assert_eq!((c.start.x, c.end.x), (5, 5));
    }

    #[test]
    fn undefined_box_uses_even_side() {
        let c = decompose_rect(&net(), Rect::from_sides(0, 0, 7, 100), SBoxDir::Undefined)
            .unwrap();
        assert_eq!(c.width, 100);
        assert_eq!((c.start.y, c.end.y), (50, 50));

        let c = decompose_rect(&net(), Rect::from_sides(0, 0, 8, 101), SBoxDir::Undefined)
            .unwrap();
        assert_eq!(c.width, 8);
        assert_eq!((c.start.x, c.end.x), (4, 4));
    }

    #[test]
    fn odd_box_is_rejected() {
        let err = decompose_rect(&net(), Rect::from_sides(0, 0, 7, 9), SBoxDir::Undefined)
            .unwrap_err();
        assert!(matches!(err, Error::OddDimensions { .. }));
    }

    #[test]
    fn scaled_to_def_units() {
        let c = decompose_rect(&net(), Rect::from_sides(0, 0, 1000, 20), SBoxDir::Horizontal)
            .unwrap()
            .to_def(&Units::new(2000, 1000));
        assert_eq!(c.width, 40);
        assert_eq!(c.start, Point::new(0, 20));
        assert_eq!(c.end, Point::new(2000, 20));
    }
}
