//! Utilities and types for orienting layout objects.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One of the 8 rectangular orientations of a placed object.
///
/// Variants are named by their rotation (counter-clockwise) and mirroring.
/// `MY` mirrors about the y-axis; `MX` mirrors about the x-axis.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// No rotations or reflections.
    #[default]
    R0,
    /// Rotate 90 degrees counter-clockwise.
    R90,
    /// Rotate 180 degrees.
    R180,
    /// Rotate 270 degrees counter-clockwise.
    R270,
    /// Mirror about the y-axis.
    MY,
    /// Mirror about the y-axis, then rotate 90 degrees.
    MYR90,
    /// Mirror about the x-axis.
    MX,
    /// Mirror about the x-axis, then rotate 90 degrees.
    MXR90,
}

impl Orientation {
    /// All 8 orientations.
    pub const ALL: [Self; 8] = [
        Self::R0,
        Self::R90,
        Self::R180,
        Self::R270,
        Self::MY,
        Self::MYR90,
        Self::MX,
        Self::MXR90,
    ];

    /// The compass mnemonic used by DEF placement statements.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Orientation::R90.def_mnemonic(), "W");
    /// assert_eq!(Orientation::MX.def_mnemonic(), "FS");
    /// ```
    pub const fn def_mnemonic(&self) -> &'static str {
        match *self {
            Self::R0 => "N",
            Self::R90 => "W",
            Self::R180 => "S",
            Self::R270 => "E",
            Self::MY => "FN",
            Self::MYR90 => "FE",
            Self::MX => "FS",
            Self::MXR90 => "FW",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.def_mnemonic())
    }
}
