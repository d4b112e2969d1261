use std::io::Write;

use crate::error::Result;
use crate::model::{sorted_by_name, Inst, InstId, PlacementStatus, SourceType};
use crate::options::DefVersion;
use crate::props::ObjKind;

use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    /// Writes the selected instances, sorted by name.
    ///
    /// The section is written even when it is empty.
    pub(super) fn write_components(&mut self) -> Result<()> {
        let ids = self.selected_insts();
        tracing::debug!(count = ids.len(), "writing components");
        writeln!(self.out, "COMPONENTS {} ;", ids.len())?;
        for id in ids {
            self.write_component(id)?;
        }
        writeln!(self.out, "END COMPONENTS")?;
        Ok(())
    }

    pub(super) fn selected_insts(&self) -> Vec<InstId> {
        let mut ids = sorted_by_name(&self.ctx.design.insts, |inst| inst.name.as_str());
        ids.retain(|&id| self.ctx.selection.inst(id));
        ids
    }

    fn write_component(&mut self, id: InstId) -> Result<()> {
        let ctx = &self.ctx;
        let inst: &Inst = &ctx.design[id];

        write!(
            self.out,
            "    - {} {}",
            ctx.inst_ref(id),
            ctx.master_ref(inst.master)
        )?;

        // Test-inserted components carry no source.
        if let Some(source) = inst.source.as_str().filter(|_| inst.source != SourceType::Test) {
            write!(self.out, " + SOURCE {source}")?;
        }

        let loc = ctx.units.point(inst.location);
        let orient = inst.orient.def_mnemonic();
        match inst.status {
            PlacementStatus::None => {}
            PlacementStatus::Unplaced => write!(self.out, " + UNPLACED")?,
            status => {
                if let Some(keyword) = status.placed_keyword() {
                    write!(self.out, " + {keyword} {loc} {orient}")?;
                }
            }
        }

        if inst.weight != 0 {
            write!(self.out, " + WEIGHT {}", inst.weight)?;
        }
        if let Some(region) = ctx.region_with_boundaries(inst.region) {
            write!(self.out, " + REGION {region}")?;
        }
        ctx.props
            .write_clause(ObjKind::Component, &inst.properties, self.out)?;
        if let Some(halo) = inst.halo.filter(|_| ctx.version() >= DefVersion::V5_6) {
            write!(
                self.out,
                " + HALO {} {} {} {}",
                ctx.dist(halo.left()),
                ctx.dist(halo.bot()),
                ctx.dist(halo.right()),
                ctx.dist(halo.top())
            )?;
        }
        writeln!(self.out, " ;")?;
        Ok(())
    }
}
