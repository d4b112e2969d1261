//! 2-D geometric primitives for describing integrated circuit layout.
//!
//! # Examples
//!
//! Create a [rectangle](crate::rect::Rect):
//!
//! ```
//! # use geometry::prelude::*;
//! let rect = Rect::from_sides(10, 20, 30, 40);
//! assert_eq!(rect.to_string(), "( 10 20 ) ( 30 40 )");
//! ```
#![warn(missing_docs)]

extern crate self as geometry;

pub mod dir;
pub mod oct;
pub mod orientation;
pub mod point;
pub mod polygon;
pub mod prelude;
pub mod rect;
