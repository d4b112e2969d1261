//! Scan chain topology.

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use super::{BTermId, Design, ITermId, InstId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanChain {
    pub name: ArcStr,
    pub scan_in: ScanPin,
    pub scan_out: ScanPin,
    #[serde(default)]
    pub partitions: Vec<ScanPartition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanPartition {
    pub name: ArcStr,
    #[serde(default)]
    pub lists: Vec<ScanList>,
}

/// Scan instances that are stitched in order, or a single floating one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanList {
    pub insts: Vec<ScanInst>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInst {
    pub inst: InstId,
    pub scan_in: ScanPin,
    pub scan_out: ScanPin,
}

/// A scan connection point, either on the design boundary or on an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanPin {
    BTerm(BTermId),
    ITerm(ITermId),
}

impl ScanPin {
    /// The hierarchical name of the pin.
    ///
    /// Instance terminals are named `<inst>/<mterm>`.
    pub fn name(&self, design: &Design) -> String {
        match *self {
            ScanPin::BTerm(id) => design[id].name.to_string(),
            ScanPin::ITerm(id) => {
                let iterm = &design[id];
                format!("{}/{}", design[iterm.inst].name, iterm.mterm)
            }
        }
    }

    /// The name of the pin local to its owner.
    pub fn pin_name<'a>(&self, design: &'a Design) -> &'a str {
        match *self {
            ScanPin::BTerm(id) => &design[id].name,
            ScanPin::ITerm(id) => &design[id].mterm,
        }
    }
}
