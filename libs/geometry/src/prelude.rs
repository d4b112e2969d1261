//! An import prelude that re-exports commonly used items.

pub use crate::dir::Dir;
pub use crate::oct::Oct;
pub use crate::orientation::Orientation;
pub use crate::point::Point;
pub use crate::polygon::Polygon;
pub use crate::rect::Rect;
