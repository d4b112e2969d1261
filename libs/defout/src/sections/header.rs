use std::io::Write;

use crate::error::Result;
use crate::options::DefVersion;
use crate::props::PropertyRegistry;

use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    pub(super) fn write_header(&mut self) -> Result<()> {
        let design = self.ctx.design;
        writeln!(self.out, "VERSION {} ;", self.ctx.version())?;
        if self.ctx.version() < DefVersion::V5_6 {
            writeln!(self.out, "NAMESCASESENSITIVE ON ;")?;
        }
        writeln!(
            self.out,
            "DIVIDERCHAR \"{}\" ;",
            design.hier_delimiter.unwrap_or('|')
        )?;
        let (open, close) = design.bus_delimiters.unwrap_or(('[', ']'));
        writeln!(self.out, "BUSBITCHARS \"{open}{close}\" ;")?;
        writeln!(self.out, "DESIGN {} ;", design.name)?;
        writeln!(self.out, "UNITS DISTANCE MICRONS {} ;", design.def_units)?;
        PropertyRegistry::write_definitions(design, self.out)?;
        Ok(())
    }

    /// Writes the die area, as a rectangle when possible.
    ///
    /// A rectangular die area with all-zero coordinates is omitted.
    pub(super) fn write_die_area(&mut self) -> Result<()> {
        let die = &self.ctx.design.die_area;
        if die.is_rect() {
            let Some(bbox) = die.bbox() else {
                return Ok(());
            };
            let bbox = self.ctx.units.rect(bbox);
            if !bbox.is_origin() {
                writeln!(self.out, "DIEAREA {bbox} ;")?;
            }
        } else {
            write!(self.out, "DIEAREA ")?;
            for &p in die.vertices() {
                write!(self.out, "{} ", self.ctx.units.point(p))?;
            }
            writeln!(self.out, ";")?;
        }
        Ok(())
    }
}
