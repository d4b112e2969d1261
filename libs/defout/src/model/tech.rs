use std::fmt::{Display, Formatter};

use arcstr::ArcStr;
use geometry::orientation::Orientation;
use geometry::point::Point;
use geometry::rect::Rect;
use serde::{Deserialize, Serialize};

use super::{LayerId, Property, TechViaId, ViaId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub name: ArcStr,
    pub alias: Option<ArcStr>,
    /// Position in the technology layer stack, bottom first.
    #[serde(default)]
    pub number: u32,
}

impl Layer {
    pub fn new(name: impl Into<ArcStr>, number: u32) -> Self {
        Self {
            name: name.into(),
            alias: None,
            number,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<ArcStr>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Master {
    pub name: ArcStr,
}

/// A via defined by the technology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechVia {
    pub name: ArcStr,
    pub bottom_layer: LayerId,
}

/// A via defined in the design's `VIAS` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Via {
    pub name: ArcStr,
    pub bottom_layer: LayerId,
    /// The name of the via generate rule that produced [`Via::params`].
    pub generate_rule: Option<ArcStr>,
    pub params: Option<ViaParams>,
    pub pattern: Option<ArcStr>,
    #[serde(default)]
    pub boxes: Vec<ViaBox>,
    /// Set when this via is a rotated copy of another via.
    pub rotation: Option<ViaRotation>,
}

impl Via {
    pub fn new(name: impl Into<ArcStr>, bottom_layer: LayerId) -> Self {
        Self {
            name: name.into(),
            bottom_layer,
            generate_rule: None,
            params: None,
            pattern: None,
            boxes: Vec::new(),
            rotation: None,
        }
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotation.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViaBox {
    pub layer: LayerId,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViaRotation {
    pub base: ViaRef,
    pub orient: Orientation,
}

/// Parameters of a generated via.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViaParams {
    pub cut_size: Point,
    pub bottom_layer: LayerId,
    pub cut_layer: LayerId,
    pub top_layer: LayerId,
    pub cut_spacing: Point,
    pub bottom_enclosure: Point,
    pub top_enclosure: Point,
    #[serde(default = "one")]
    pub rows: u32,
    #[serde(default = "one")]
    pub cols: u32,
    #[serde(default)]
    pub origin: Point,
    #[serde(default)]
    pub bottom_offset: Point,
    #[serde(default)]
    pub top_offset: Point,
}

fn one() -> u32 {
    1
}

/// A reference to either kind of via.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViaRef {
    Block(ViaId),
    Tech(TechViaId),
}

/// Per-layer mask colors of a via: top, cut, bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaColor {
    pub top: u8,
    pub cut: u8,
    pub bottom: u8,
}

impl Display for ViaColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.top, self.cut, self.bottom)
    }
}

/// A named override of the default routing rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonDefaultRule {
    pub name: ArcStr,
    #[serde(default)]
    pub hard_spacing: bool,
    #[serde(default)]
    pub layer_rules: Vec<LayerRule>,
    #[serde(default)]
    pub use_vias: Vec<TechViaId>,
    #[serde(default)]
    pub use_via_rules: Vec<ArcStr>,
    #[serde(default)]
    pub min_cuts: Vec<MinCuts>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl NonDefaultRule {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            hard_spacing: false,
            layer_rules: Vec::new(),
            use_vias: Vec::new(),
            use_via_rules: Vec::new(),
            min_cuts: Vec::new(),
            properties: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRule {
    pub layer: LayerId,
    pub width: i64,
    #[serde(default)]
    pub spacing: i64,
    #[serde(default)]
    pub wire_extension: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinCuts {
    pub layer: LayerId,
    pub count: u32,
}
