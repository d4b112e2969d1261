//! The placement-only output format.
//!
//! ```text
//! <pin> <x> <y> : N
//! CELLS
//! <inst> <x> <y> : <orient>
//! ```

use std::io::Write;

use crate::error::Result;
use crate::model::sorted_by_name;

use super::pins::bpin_origin;
use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    /// Writes the location of every placed pin, at the center of the first
    /// shape of its first physical pin.
    pub(super) fn write_placed_pins(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        let design = ctx.design;
        for id in sorted_by_name(&design.bterms, |b| b.name.as_str()) {
            let bterm = &design[id];
            if bterm.net.is_none() || !ctx.selection.pin(bterm) {
                continue;
            }
            let Some(bpin) = bterm.bpins.first() else {
                continue;
            };
            if bpin.status.placed_keyword().is_none() {
                continue;
            }
            let origin = bpin_origin(bpin, |v| ctx.dist(v));
            writeln!(self.out, "{} {} {} : N", bterm.name, origin.x, origin.y)?;
        }
        Ok(())
    }

    pub(super) fn write_placed_components(&mut self) -> Result<()> {
        writeln!(self.out, "CELLS")?;
        let ids = self.selected_insts();
        let ctx = &self.ctx;
        for id in ids {
            let inst = &ctx.design[id];
            if inst.status.placed_keyword().is_none() {
                continue;
            }
            let loc = ctx.units.point(inst.location);
            writeln!(
                self.out,
                "{} {} {} : {}",
                ctx.inst_ref(id),
                loc.x,
                loc.y,
                inst.orient.def_mnemonic()
            )?;
        }
        Ok(())
    }
}
