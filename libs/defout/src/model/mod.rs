//! A read-only physical design database.
//!
//! Entities live in per-kind tables owned by a [`Design`] and refer to one
//! another through typed [`Id`]s. Index a design with an id to look up the
//! entity: `design[net_id]`.

use arcstr::ArcStr;
use geometry::polygon::Polygon;
use serde::{Deserialize, Serialize};

mod floorplan;
mod id;
mod inst;
mod net;
mod property;
mod scan;
mod tech;
mod validate;

pub use floorplan::*;
pub use id::Id;
pub use inst::*;
pub use net::*;
pub use property::*;
pub use scan::*;
pub use tech::*;

pub type LayerId = Id<Layer>;
pub type MasterId = Id<Master>;
pub type InstId = Id<Inst>;
pub type ITermId = Id<ITerm>;
pub type BTermId = Id<BTerm>;
pub type NetId = Id<Net>;
pub type ViaId = Id<Via>;
pub type TechViaId = Id<TechVia>;
pub type RuleId = Id<NonDefaultRule>;
pub type RegionId = Id<Region>;
pub type GroupId = Id<Group>;

/// A placed and routed design block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    pub name: ArcStr,
    /// DEF distance units per micron.
    #[serde(default = "default_units")]
    pub def_units: i32,
    /// Database distance units per micron.
    #[serde(default = "default_units")]
    pub db_units_per_micron: i32,
    pub hier_delimiter: Option<char>,
    pub bus_delimiters: Option<(char, char)>,
    #[serde(default)]
    pub die_area: Polygon,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub masters: Vec<Master>,
    #[serde(default)]
    pub insts: Vec<Inst>,
    #[serde(default)]
    pub iterms: Vec<ITerm>,
    #[serde(default)]
    pub bterms: Vec<BTerm>,
    #[serde(default)]
    pub nets: Vec<Net>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub track_grids: Vec<TrackGrid>,
    pub gcell_grid: Option<GCellGrid>,
    #[serde(default)]
    pub vias: Vec<Via>,
    #[serde(default)]
    pub tech_vias: Vec<TechVia>,
    #[serde(default)]
    pub non_default_rules: Vec<NonDefaultRule>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub obstructions: Vec<Obstruction>,
    #[serde(default)]
    pub blockages: Vec<Blockage>,
    #[serde(default)]
    pub fills: Vec<Fill>,
    #[serde(default)]
    pub scan_chains: Vec<ScanChain>,
    /// Layers whose masks may be shifted per component.
    #[serde(default)]
    pub component_mask_shift: Vec<LayerId>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

fn default_units() -> i32 {
    1000
}

impl Design {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            def_units: default_units(),
            db_units_per_micron: default_units(),
            hier_delimiter: None,
            bus_delimiters: None,
            die_area: Polygon::default(),
            layers: Vec::new(),
            masters: Vec::new(),
            insts: Vec::new(),
            iterms: Vec::new(),
            bterms: Vec::new(),
            nets: Vec::new(),
            rows: Vec::new(),
            track_grids: Vec::new(),
            gcell_grid: None,
            vias: Vec::new(),
            tech_vias: Vec::new(),
            non_default_rules: Vec::new(),
            regions: Vec::new(),
            groups: Vec::new(),
            obstructions: Vec::new(),
            blockages: Vec::new(),
            fills: Vec::new(),
            scan_chains: Vec::new(),
            component_mask_shift: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn add_master(&mut self, name: impl Into<ArcStr>) -> MasterId {
        push(&mut self.masters, Master { name: name.into() })
    }

    /// Adds a block terminal, registering it with its net.
    pub fn add_bterm(&mut self, bterm: BTerm) -> BTermId {
        let net = bterm.net;
        let id = push(&mut self.bterms, bterm);
        if let Some(net) = net {
            self.nets[net.index()].bterms.push(id);
        }
        id
    }

    /// Creates the terminal `mterm` on `inst`, optionally connected to `net`.
    pub fn connect(
        &mut self,
        inst: InstId,
        mterm: impl Into<ArcStr>,
        net: Option<NetId>,
        special: bool,
    ) -> ITermId {
        let id = push(
            &mut self.iterms,
            ITerm {
                inst,
                mterm: mterm.into(),
                net,
                special,
                properties: Vec::new(),
            },
        );
        if let Some(net) = net {
            self.nets[net.index()].iterms.push(id);
        }
        id
    }

    /// Returns the property named `name` attached to the design itself.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

fn push<T>(table: &mut Vec<T>, item: T) -> Id<T> {
    table.push(item);
    Id::new(table.len() - 1)
}

macro_rules! tables {
    ($($ty:ty => $field:ident, $add:ident;)*) => {
        $(
            impl std::ops::Index<Id<$ty>> for Design {
                type Output = $ty;
                fn index(&self, id: Id<$ty>) -> &Self::Output {
                    &self.$field[id.index()]
                }
            }
        )*

        impl Design {
            $(
                pub fn $add(&mut self, item: $ty) -> Id<$ty> {
                    push(&mut self.$field, item)
                }
            )*
        }
    };
}

tables! {
    Layer => layers, add_layer;
    Inst => insts, add_inst;
    Net => nets, add_net;
    Via => vias, add_via;
    TechVia => tech_vias, add_tech_via;
    NonDefaultRule => non_default_rules, add_non_default_rule;
    Region => regions, add_region;
    Group => groups, add_group;
}

impl std::ops::Index<MasterId> for Design {
    type Output = Master;
    fn index(&self, id: MasterId) -> &Self::Output {
        &self.masters[id.index()]
    }
}

impl std::ops::Index<ITermId> for Design {
    type Output = ITerm;
    fn index(&self, id: ITermId) -> &Self::Output {
        &self.iterms[id.index()]
    }
}

impl std::ops::Index<BTermId> for Design {
    type Output = BTerm;
    fn index(&self, id: BTermId) -> &Self::Output {
        &self.bterms[id.index()]
    }
}

/// Returns ids of the entries of `table`, sorted by the key `name` extracts.
pub(crate) fn sorted_by_name<T>(table: &[T], name: impl Fn(&T) -> &str) -> Vec<Id<T>> {
    let mut ids: Vec<Id<T>> = (0..table.len()).map(Id::new).collect();
    ids.sort_by(|a, b| name(&table[a.index()]).cmp(name(&table[b.index()])));
    ids
}
