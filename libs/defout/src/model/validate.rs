//! Referential integrity of a design.

use super::*;
use crate::error::{Error, Result};

/// An entity stored in one of the tables of a [`Design`].
pub(crate) trait Entity: Sized {
    const KIND: &'static str;
    fn table(design: &Design) -> &[Self];
}

macro_rules! entities {
    ($($ty:ty => $field:ident, $kind:literal;)*) => {
        $(
            impl Entity for $ty {
                const KIND: &'static str = $kind;
                fn table(design: &Design) -> &[Self] {
                    &design.$field
                }
            }
        )*
    };
}

entities! {
    Layer => layers, "layer";
    Master => masters, "master";
    Inst => insts, "instance";
    ITerm => iterms, "instance terminal";
    BTerm => bterms, "block terminal";
    Net => nets, "net";
    Via => vias, "via";
    TechVia => tech_vias, "technology via";
    NonDefaultRule => non_default_rules, "non-default rule";
    Region => regions, "region";
    Group => groups, "group";
}

impl Design {
    /// Returns an error if `id` does not refer to an entity of this design.
    ///
    /// `owner` names the object holding the reference.
    pub(crate) fn check_id<T: Entity>(&self, id: Id<T>, owner: &str) -> Result<()> {
        if id.index() < T::table(self).len() {
            Ok(())
        } else {
            Err(Error::UnknownId {
                kind: T::KIND,
                index: id.index(),
                owner: owner.to_string(),
            })
        }
    }

    fn check_via(&self, via: ViaRef, owner: &str) -> Result<()> {
        match via {
            ViaRef::Block(id) => self.check_id(id, owner),
            ViaRef::Tech(id) => self.check_id(id, owner),
        }
    }

    fn check_scan_pin(&self, pin: ScanPin, owner: &str) -> Result<()> {
        match pin {
            ScanPin::BTerm(id) => self.check_id(id, owner),
            ScanPin::ITerm(id) => self.check_id(id, owner),
        }
    }

    /// Checks that every id stored in the design refers to an existing entity.
    ///
    /// Designs assembled with the `add_*` methods are valid by construction.
    /// Deserialized designs are not, and must be validated before they are
    /// written.
    pub fn validate(&self) -> Result<()> {
        for via in self.tech_vias.iter() {
            self.check_id(via.bottom_layer, &via.name)?;
        }
        for via in self.vias.iter() {
            self.check_id(via.bottom_layer, &via.name)?;
            if let Some(ref params) = via.params {
                self.check_id(params.bottom_layer, &via.name)?;
                self.check_id(params.cut_layer, &via.name)?;
                self.check_id(params.top_layer, &via.name)?;
            }
            for b in via.boxes.iter() {
                self.check_id(b.layer, &via.name)?;
            }
            if let Some(ref rotation) = via.rotation {
                self.check_via(rotation.base, &via.name)?;
            }
        }
        for rule in self.non_default_rules.iter() {
            for layer_rule in rule.layer_rules.iter() {
                self.check_id(layer_rule.layer, &rule.name)?;
            }
            for &via in rule.use_vias.iter() {
                self.check_id(via, &rule.name)?;
            }
            for min_cuts in rule.min_cuts.iter() {
                self.check_id(min_cuts.layer, &rule.name)?;
            }
        }

        for inst in self.insts.iter() {
            self.check_id(inst.master, &inst.name)?;
            if let Some(region) = inst.region {
                self.check_id(region, &inst.name)?;
            }
        }
        for iterm in self.iterms.iter() {
            self.check_id(iterm.inst, &iterm.mterm)?;
            if let Some(net) = iterm.net {
                self.check_id(net, &iterm.mterm)?;
            }
        }
        for bterm in self.bterms.iter() {
            let owner = &bterm.name;
            for id in [bterm.supply_pin, bterm.ground_pin].into_iter().flatten() {
                self.check_id(id, owner)?;
            }
            if let Some(net) = bterm.net {
                self.check_id(net, owner)?;
            }
            for shape in bterm.bpins.iter().flat_map(|pin| pin.boxes.iter()) {
                self.check_id(shape.layer, owner)?;
            }
        }

        for net in self.nets.iter() {
            self.validate_net(net)?;
        }

        for grid in self.track_grids.iter() {
            self.check_id(grid.layer, "TRACKS")?;
        }
        for group in self.groups.iter() {
            for &inst in group.insts.iter() {
                self.check_id(inst, &group.name)?;
            }
            if let Some(region) = group.region {
                self.check_id(region, &group.name)?;
            }
        }
        for obs in self.obstructions.iter() {
            self.check_id(obs.layer, "BLOCKAGES")?;
            if let Some(inst) = obs.inst {
                self.check_id(inst, "BLOCKAGES")?;
            }
        }
        for inst in self.blockages.iter().filter_map(|b| b.inst) {
            self.check_id(inst, "BLOCKAGES")?;
        }
        for fill in self.fills.iter() {
            self.check_id(fill.layer, "FILLS")?;
        }
        for chain in self.scan_chains.iter() {
            self.check_scan_pin(chain.scan_in, &chain.name)?;
            self.check_scan_pin(chain.scan_out, &chain.name)?;
            let scan_insts = chain
                .partitions
                .iter()
                .flat_map(|p| p.lists.iter())
                .flat_map(|l| l.insts.iter());
            for scan_inst in scan_insts {
                self.check_id(scan_inst.inst, &chain.name)?;
                self.check_scan_pin(scan_inst.scan_in, &chain.name)?;
                self.check_scan_pin(scan_inst.scan_out, &chain.name)?;
            }
        }
        for &layer in self.component_mask_shift.iter() {
            self.check_id(layer, "COMPONENTMASKSHIFT")?;
        }

        Ok(())
    }

    fn validate_net(&self, net: &Net) -> Result<()> {
        let owner = &net.name;
        for &iterm in net.iterms.iter() {
            self.check_id(iterm, owner)?;
        }
        for &bterm in net.bterms.iter() {
            self.check_id(bterm, owner)?;
        }
        if let Some(rule) = net.non_default_rule {
            self.check_id(rule, owner)?;
        }
        for op in net.wire.iter().flat_map(|w| w.ops.iter()) {
            match *op {
                WireOp::Path { layer, .. } => self.check_id(layer, owner)?,
                WireOp::Via { via, .. } => self.check_via(via, owner)?,
                WireOp::Rule { rule } => self.check_id(rule, owner)?,
                WireOp::ITerm { iterm } => self.check_id(iterm, owner)?,
                WireOp::BTerm { bterm } => self.check_id(bterm, owner)?,
                WireOp::Point { .. } | WireOp::PointExt { .. } | WireOp::Rect { .. } => {}
            }
        }
        for swire in net.swires.iter() {
            if let Some(shield) = swire.shield {
                self.check_id(shield, owner)?;
            }
            for sbox in swire.boxes.iter() {
                match sbox.shape {
                    SBoxShape::Path { layer, .. } | SBoxShape::Oct { layer, .. } => {
                        self.check_id(layer, owner)?
                    }
                    SBoxShape::Via { via, .. } => self.check_via(via, owner)?,
                }
            }
        }
        Ok(())
    }
}
