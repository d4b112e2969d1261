//! A DEF writer for placed and routed designs.
//!
//! Build a [`Design`](model::Design), choose [`WriterOptions`], and write it
//! with a [`DefOut`]:
//!
//! ```
//! use defout::model::Design;
//! use defout::{DefOut, WriterOptions};
//!
//! let design = Design::new("top");
//! let mut buf = Vec::new();
//! let issues = DefOut::new(WriterOptions::default())
//!     .write_block_to(&design, &mut buf)
//!     .unwrap();
//! assert!(issues.is_empty());
//!
//! let def = String::from_utf8(buf).unwrap();
//! assert!(def.starts_with("VERSION 5.8 ;"));
//! assert!(def.ends_with("END DESIGN\n"));
//! ```
//!
//! Non-fatal problems, such as a pin without a net, are logged through
//! [`tracing`] and returned as an [`IssueSet`]. Fatal problems abort the
//! write with an [`Error`].

pub mod centerline;
pub mod error;
pub mod issues;
pub mod model;
pub mod options;
pub mod props;
pub mod sections;
pub mod select;
pub mod swire;
pub mod units;
pub mod wire;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use issues::{Cause, IssueSet, Severity, WriteIssue};
pub use options::{DefVersion, WriterOptions};
pub use writer::DefOut;
