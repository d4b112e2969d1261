use std::io::Write;

use itertools::Itertools;

use crate::error::Result;
use crate::model::{Blockage, Obstruction, ShapeRule};
use crate::options::DefVersion;

use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    /// Writes routing obstructions and placement blockages.
    ///
    /// Objects reserved by the system, and objects tied to an instance outside
    /// the selection, are left out.
    pub(super) fn write_blockages(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        let design = ctx.design;

        let obstructions: Vec<&Obstruction> = design
            .obstructions
            .iter()
            .filter(|o| !o.system_reserved && ctx.selection.tied_inst(o.inst))
            .sorted_by_key(|o| (design[o.layer].number, o.rect))
            .collect();
        let blockages: Vec<&Blockage> = design
            .blockages
            .iter()
            .filter(|b| !b.system_reserved && ctx.selection.tied_inst(b.inst))
            .sorted_by_key(|b| b.rect)
            .collect();

        let count = obstructions.len() + blockages.len();
        if count == 0 {
            return Ok(());
        }
        tracing::debug!(count, "writing blockages");

        writeln!(self.out, "BLOCKAGES {count} ;")?;
        for obs in obstructions {
            write!(self.out, "    - LAYER {}", ctx.layer_name(obs.layer))?;
            if let Some(inst) = obs.inst {
                write!(self.out, " + COMPONENT {}", ctx.inst_ref(inst))?;
            }
            if obs.slots {
                write!(self.out, " + SLOTS")?;
            }
            if obs.fills {
                write!(self.out, " + FILLS")?;
            }
            if obs.pushed_down {
                write!(self.out, " + PUSHDOWN")?;
            }
            if ctx.version() >= DefVersion::V5_6 {
                match obs.rule {
                    Some(ShapeRule::DesignRuleWidth(w)) => {
                        write!(self.out, " + DESIGNRULEWIDTH {}", ctx.dist(w))?
                    }
                    Some(ShapeRule::Spacing(s)) => write!(self.out, " + SPACING {}", ctx.dist(s))?,
                    None => {}
                }
            }
            writeln!(self.out, " RECT {} ;", ctx.units.rect(obs.rect))?;
        }

        for blk in blockages {
            write!(self.out, "    - PLACEMENT")?;
            if blk.soft {
                write!(self.out, " + SOFT")?;
            }
            if blk.max_density > 0.0 {
                write!(self.out, " + PARTIAL {:.6}", blk.max_density)?;
            }
            if let Some(inst) = blk.inst {
                write!(self.out, " + COMPONENT {}", ctx.inst_ref(inst))?;
            }
            if blk.pushed_down {
                write!(self.out, " + PUSHDOWN")?;
            }
            writeln!(self.out, " RECT {} ;", ctx.units.rect(blk.rect))?;
        }
        writeln!(self.out, "END BLOCKAGES")?;
        Ok(())
    }

    pub(super) fn write_fills(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        let fills = &ctx.design.fills;
        if fills.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "FILLS {} ;", fills.len())?;
        for fill in fills.iter() {
            write!(self.out, "    - LAYER {}", ctx.design[fill.layer].name)?;
            if fill.mask != 0 {
                write!(self.out, " + MASK {}", fill.mask)?;
            }
            if fill.opc {
                write!(self.out, " + OPC")?;
            }
            writeln!(self.out, " RECT {} ;", ctx.units.rect(fill.rect))?;
        }
        writeln!(self.out, "END FILLS")?;
        Ok(())
    }
}
