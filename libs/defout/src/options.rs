//! Writer configuration.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A DEF language revision.
///
/// Revisions are ordered, so version gates read as comparisons:
/// `version >= DefVersion::V5_6`.
#[derive(
    Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum DefVersion {
    #[serde(rename = "5.3")]
    V5_3,
    #[serde(rename = "5.4")]
    V5_4,
    #[serde(rename = "5.5")]
    V5_5,
    #[serde(rename = "5.6")]
    V5_6,
    #[serde(rename = "5.7")]
    V5_7,
    #[default]
    #[serde(rename = "5.8")]
    V5_8,
}

impl DefVersion {
    pub const ALL: [Self; 6] = [
        Self::V5_3,
        Self::V5_4,
        Self::V5_5,
        Self::V5_6,
        Self::V5_7,
        Self::V5_8,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::V5_3 => "5.3",
            Self::V5_4 => "5.4",
            Self::V5_5 => "5.5",
            Self::V5_6 => "5.6",
            Self::V5_7 => "5.7",
            Self::V5_8 => "5.8",
        }
    }
}

impl Display for DefVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DefVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| Error::UnsupportedVersion(s.to_string()))
    }
}

/// Options controlling how a design is written.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// The DEF revision to target.
    pub version: DefVersion,
    /// Write a layer's alias instead of its name when it has one.
    pub use_layer_alias: bool,
    /// Refer to nets as `N<id>` and instances as `I<id>`.
    pub use_net_inst_ids: bool,
    /// Refer to masters as `M<id>`.
    pub use_master_ids: bool,
}

impl WriterOptions {
    /// Parses options from a TOML document.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads options from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
