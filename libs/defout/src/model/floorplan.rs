use arcstr::ArcStr;
use geometry::orientation::Orientation;
use geometry::point::Point;
use geometry::rect::Rect;
use serde::{Deserialize, Serialize};

use super::{InstId, LayerId, Property, RegionId, ShapeRule};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub name: ArcStr,
    pub site: ArcStr,
    pub origin: Point,
    #[serde(default)]
    pub orient: Orientation,
    #[serde(default)]
    pub dir: RowDir,
    pub site_count: u32,
    /// Distance between adjacent sites.
    pub spacing: i64,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RowDir {
    #[default]
    Horizontal,
    Vertical,
}

/// Routing tracks of one layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackGrid {
    pub layer: LayerId,
    #[serde(default)]
    pub x: Vec<TrackPattern>,
    #[serde(default)]
    pub y: Vec<TrackPattern>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackPattern {
    pub origin: i64,
    pub count: u32,
    pub step: i64,
    /// Mask of the first track. Zero means uncolored.
    #[serde(default)]
    pub first_mask: u8,
    #[serde(default)]
    pub same_mask: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GCellGrid {
    #[serde(default)]
    pub x: Vec<GridPattern>,
    #[serde(default)]
    pub y: Vec<GridPattern>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridPattern {
    pub origin: i64,
    pub count: u32,
    pub step: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub name: ArcStr,
    #[serde(default)]
    pub boundaries: Vec<Rect>,
    #[serde(default)]
    pub kind: RegionType,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RegionType {
    #[default]
    Inclusive,
    Exclusive,
    Suggested,
}

impl RegionType {
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            RegionType::Inclusive => None,
            RegionType::Exclusive => Some("FENCE"),
            RegionType::Suggested => Some("GUIDE"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: ArcStr,
    #[serde(default)]
    pub insts: Vec<InstId>,
    pub region: Option<RegionId>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A routing obstruction on one layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstruction {
    pub layer: LayerId,
    pub rect: Rect,
    pub inst: Option<InstId>,
    #[serde(default)]
    pub slots: bool,
    #[serde(default)]
    pub fills: bool,
    #[serde(default)]
    pub pushed_down: bool,
    pub rule: Option<ShapeRule>,
    #[serde(default)]
    pub system_reserved: bool,
}

impl Obstruction {
    pub fn new(layer: LayerId, rect: Rect) -> Self {
        Self {
            layer,
            rect,
            inst: None,
            slots: false,
            fills: false,
            pushed_down: false,
            rule: None,
            system_reserved: false,
        }
    }
}

/// A placement blockage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blockage {
    pub rect: Rect,
    pub inst: Option<InstId>,
    #[serde(default)]
    pub soft: bool,
    /// Maximum placement density, in percent. Zero means fully blocked.
    #[serde(default)]
    pub max_density: f64,
    #[serde(default)]
    pub pushed_down: bool,
    #[serde(default)]
    pub system_reserved: bool,
}

impl Blockage {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            inst: None,
            soft: false,
            max_density: 0.0,
            pushed_down: false,
            system_reserved: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    pub layer: LayerId,
    pub rect: Rect,
    #[serde(default)]
    pub mask: u8,
    #[serde(default)]
    pub opc: bool,
}
