use std::fmt::{Display, Formatter};

use arcstr::ArcStr;
use geometry::oct::Oct;
use geometry::point::Point;
use geometry::rect::Rect;
use serde::{Deserialize, Serialize};

use super::{BTermId, ITermId, LayerId, NetId, Property, RuleId, SigType, SourceType, ViaColor, ViaRef};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    pub name: ArcStr,
    /// Power and ground nets are special.
    #[serde(default)]
    pub special: bool,
    #[serde(default)]
    pub sig: SigType,
    #[serde(default)]
    pub source: SourceType,
    #[serde(default = "unit_weight")]
    pub weight: i32,
    #[serde(default)]
    pub xtalk: i32,
    pub non_default_rule: Option<RuleId>,
    /// Net-wide routing state. [`WireType::Fixed`] overrides every path of the wire.
    #[serde(default)]
    pub wire_type: WireType,
    #[serde(default)]
    pub fixed_bump: bool,
    /// Special terminals are written once per master terminal name as `( * <mterm> )`.
    #[serde(default)]
    pub wild_connected: bool,
    pub wire: Option<Wire>,
    #[serde(default)]
    pub swires: Vec<SWire>,
    #[serde(default)]
    pub iterms: Vec<ITermId>,
    #[serde(default)]
    pub bterms: Vec<BTermId>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

fn unit_weight() -> i32 {
    1
}

impl Net {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            special: false,
            sig: SigType::Signal,
            source: SourceType::None,
            weight: 1,
            xtalk: 0,
            non_default_rule: None,
            wire_type: WireType::None,
            fixed_bump: false,
            wild_connected: false,
            wire: None,
            swires: Vec::new(),
            iterms: Vec::new(),
            bterms: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn special(name: impl Into<ArcStr>, sig: SigType) -> Self {
        Self {
            special: true,
            sig,
            ..Self::new(name)
        }
    }
}

/// A routing state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WireType {
    #[default]
    None,
    Cover,
    Fixed,
    Routed,
    Shield,
    NoShield,
}

impl WireType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            WireType::None => "NONE",
            WireType::Cover => "COVER",
            WireType::Fixed => "FIXED",
            WireType::Routed => "ROUTED",
            WireType::Shield => "SHIELD",
            WireType::NoShield => "NOSHIELD",
        }
    }
}

impl Display for WireType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The routing of a regular net, encoded as a stream of opcodes.
///
/// The stream ends at the end of the vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wire {
    pub ops: Vec<WireOp>,
}

impl Wire {
    pub fn new(ops: Vec<WireOp>) -> Self {
        Self { ops }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum WireOp {
    /// Starts a new path on `layer`.
    Path {
        layer: LayerId,
        wire_type: WireType,
        #[serde(default)]
        kind: PathKind,
    },
    Point {
        x: i64,
        y: i64,
        color: Option<u8>,
    },
    /// A point with an end-of-wire extension.
    PointExt { x: i64, y: i64, ext: i64 },
    Via {
        via: ViaRef,
        color: Option<ViaColor>,
    },
    /// Tags the current path with a non-default rule.
    Rule { rule: RuleId },
    /// A rectangle given by offsets from the current point.
    Rect {
        dx1: i64,
        dy1: i64,
        dx2: i64,
        dy2: i64,
        color: Option<u8>,
    },
    ITerm { iterm: ITermId },
    BTerm { bterm: BTermId },
}

impl WireOp {
    pub fn path(layer: LayerId, wire_type: WireType) -> Self {
        Self::Path {
            layer,
            wire_type,
            kind: PathKind::Path,
        }
    }

    pub fn point(x: i64, y: i64) -> Self {
        Self::Point { x, y, color: None }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    #[default]
    Path,
    Short,
    VWire,
    Junction,
}

/// A run of special wiring sharing one routing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SWire {
    pub wire_type: WireType,
    pub shield: Option<NetId>,
    #[serde(default)]
    pub boxes: Vec<SBox>,
}

impl SWire {
    pub fn new(wire_type: WireType, boxes: Vec<SBox>) -> Self {
        Self {
            wire_type,
            shield: None,
            boxes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SBox {
    pub shape: SBoxShape,
    #[serde(default)]
    pub wire_shape: WireShapeType,
    /// Multi-patterning mask of a path box. Zero means uncolored.
    #[serde(default)]
    pub mask: u8,
}

impl SBox {
    pub fn path(layer: LayerId, rect: Rect, dir: SBoxDir) -> Self {
        Self {
            shape: SBoxShape::Path { layer, rect, dir },
            wire_shape: WireShapeType::None,
            mask: 0,
        }
    }

    pub fn via(via: ViaRef, at: Point) -> Self {
        Self {
            shape: SBoxShape::Via {
                via,
                at,
                masks: None,
            },
            wire_shape: WireShapeType::None,
            mask: 0,
        }
    }

    pub fn with_shape(mut self, wire_shape: WireShapeType) -> Self {
        self.wire_shape = wire_shape;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SBoxShape {
    Path {
        layer: LayerId,
        rect: Rect,
        #[serde(default)]
        dir: SBoxDir,
    },
    Oct {
        layer: LayerId,
        oct: Oct,
    },
    Via {
        via: ViaRef,
        at: Point,
        masks: Option<ViaColor>,
    },
}

/// The run direction of a rectangular special wire box.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SBoxDir {
    #[default]
    Undefined,
    Horizontal,
    Vertical,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WireShapeType {
    #[default]
    None,
    Ring,
    PadRing,
    BlockRing,
    Stripe,
    FollowPin,
    IoWire,
    CoreWire,
    BlockWire,
    BlockageWire,
    FillWire,
    FillWireOpc,
    DrcFill,
}

impl WireShapeType {
    pub fn as_str(&self) -> Option<&'static str> {
        match *self {
            WireShapeType::None => None,
            WireShapeType::Ring => Some("RING"),
            WireShapeType::PadRing => Some("PADRING"),
            WireShapeType::BlockRing => Some("BLOCKRING"),
            WireShapeType::Stripe => Some("STRIPE"),
            WireShapeType::FollowPin => Some("FOLLOWPIN"),
            WireShapeType::IoWire => Some("IOWIRE"),
            WireShapeType::CoreWire => Some("COREWIRE"),
            WireShapeType::BlockWire => Some("BLOCKWIRE"),
            WireShapeType::BlockageWire => Some("BLOCKAGEWIRE"),
            WireShapeType::FillWire => Some("FILLWIRE"),
            WireShapeType::FillWireOpc => Some("FILLWIREOPC"),
            WireShapeType::DrcFill => Some("DRCFILL"),
        }
    }
}
