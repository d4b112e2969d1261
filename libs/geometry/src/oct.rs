//! Octilinear wire segments.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// An octagonal segment described by its centerline and width.
///
/// The segment runs from `center_low` to `center_high`, which may be joined
/// by a 45-degree diagonal.
#[derive(Debug, Default, Copy, Clone, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub struct Oct {
    /// The lower centerline endpoint.
    pub center_low: Point,
    /// The upper centerline endpoint.
    pub center_high: Point,
    /// The full width of the segment.
    pub width: i64,
}

impl Oct {
    /// Creates a new octagon from its centerline endpoints and width.
    pub fn new(center_low: Point, center_high: Point, width: i64) -> Self {
        Self {
            center_low,
            center_high,
            width,
        }
    }
}
