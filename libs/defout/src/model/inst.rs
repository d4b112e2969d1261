use std::fmt::{Display, Formatter};

use arcstr::ArcStr;
use geometry::orientation::Orientation;
use geometry::point::Point;
use geometry::rect::Rect;
use serde::{Deserialize, Serialize};

use super::{BTermId, InstId, LayerId, MasterId, NetId, Property, RegionId};

/// A placed copy of a master cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inst {
    pub name: ArcStr,
    pub master: MasterId,
    #[serde(default)]
    pub location: Point,
    #[serde(default)]
    pub orient: Orientation,
    #[serde(default)]
    pub status: PlacementStatus,
    #[serde(default)]
    pub source: SourceType,
    #[serde(default)]
    pub weight: i32,
    pub region: Option<RegionId>,
    /// Halo offsets as `( left bottom ) ( right top )`.
    pub halo: Option<Rect>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Inst {
    pub fn new(name: impl Into<ArcStr>, master: MasterId) -> Self {
        Self {
            name: name.into(),
            master,
            location: Point::zero(),
            orient: Orientation::R0,
            status: PlacementStatus::None,
            source: SourceType::None,
            weight: 0,
            region: None,
            halo: None,
            properties: Vec::new(),
        }
    }

    pub fn placed(mut self, location: Point, orient: Orientation, status: PlacementStatus) -> Self {
        self.location = location;
        self.orient = orient;
        self.status = status;
        self
    }
}

/// A terminal of an instance, named after the master terminal it instantiates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ITerm {
    pub inst: InstId,
    pub mterm: ArcStr,
    pub net: Option<NetId>,
    #[serde(default)]
    pub special: bool,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A terminal on the boundary of the design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BTerm {
    pub name: ArcStr,
    pub net: Option<NetId>,
    #[serde(default)]
    pub special: bool,
    #[serde(default)]
    pub io: IoType,
    #[serde(default)]
    pub sig: SigType,
    pub supply_pin: Option<BTermId>,
    pub ground_pin: Option<BTermId>,
    #[serde(default)]
    pub bpins: Vec<BPin>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl BTerm {
    pub fn new(name: impl Into<ArcStr>, io: IoType) -> Self {
        Self {
            name: name.into(),
            net: None,
            special: false,
            io,
            sig: SigType::Signal,
            supply_pin: None,
            ground_pin: None,
            bpins: Vec::new(),
            properties: Vec::new(),
        }
    }
}

/// The physical geometry of one port of a block terminal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BPin {
    #[serde(default)]
    pub status: PlacementStatus,
    #[serde(default)]
    pub boxes: Vec<PinShape>,
    pub rule: Option<ShapeRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinShape {
    pub layer: LayerId,
    pub rect: Rect,
    #[serde(default)]
    pub mask: u8,
}

/// A per-shape override of the default design rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeRule {
    DesignRuleWidth(i64),
    Spacing(i64),
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlacementStatus {
    #[default]
    None,
    Unplaced,
    Suggested,
    Placed,
    Locked,
    Firm,
    Cover,
}

impl PlacementStatus {
    /// The DEF keyword for a status that carries a location.
    ///
    /// Returns `None` for [`PlacementStatus::None`] and [`PlacementStatus::Unplaced`].
    pub fn placed_keyword(&self) -> Option<&'static str> {
        match *self {
            Self::None | Self::Unplaced => None,
            Self::Suggested | Self::Placed => Some("PLACED"),
            Self::Locked | Self::Firm => Some("FIXED"),
            Self::Cover => Some("COVER"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[default]
    None,
    Netlist,
    Dist,
    User,
    Timing,
    Test,
}

impl SourceType {
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            SourceType::None => None,
            SourceType::Netlist => Some("NETLIST"),
            SourceType::Dist => Some("DIST"),
            SourceType::User => Some("USER"),
            SourceType::Timing => Some("TIMING"),
            SourceType::Test => Some("TEST"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum IoType {
    Input,
    Output,
    #[default]
    Inout,
    Feedthru,
}

impl IoType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            IoType::Input => "INPUT",
            IoType::Output => "OUTPUT",
            IoType::Inout => "INOUT",
            IoType::Feedthru => "FEEDTHRU",
        }
    }
}

impl Display for IoType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SigType {
    #[default]
    Signal,
    Power,
    Ground,
    Clock,
    Analog,
    Reset,
    Scan,
    Tieoff,
}

impl SigType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            SigType::Signal => "SIGNAL",
            SigType::Power => "POWER",
            SigType::Ground => "GROUND",
            SigType::Clock => "CLOCK",
            SigType::Analog => "ANALOG",
            SigType::Reset => "RESET",
            SigType::Scan => "SCAN",
            SigType::Tieoff => "TIEOFF",
        }
    }
}

impl Display for SigType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
