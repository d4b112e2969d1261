use std::io::Write;

use geometry::point::Point;

use crate::error::Result;
use crate::issues::Cause;
use crate::model::{sorted_by_name, BPin, BTerm, BTermId, NetId, ShapeRule};
use crate::options::DefVersion;
use crate::props::ObjKind;

use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    /// Writes the block terminals, sorted by name.
    ///
    /// Terminals without a net are reported and left out.
    pub(super) fn write_pins(&mut self) -> Result<()> {
        let design = self.ctx.design;
        if design.bterms.is_empty() {
            return Ok(());
        }

        let mut pins = Vec::new();
        for id in sorted_by_name(&design.bterms, |b| b.name.as_str()) {
            let bterm = &design[id];
            if !self.ctx.selection.pin(bterm) {
                continue;
            }
            match bterm.net {
                Some(net) => pins.push((id, net)),
                None => self.warn(Cause::PinWithoutNet {
                    pin: bterm.name.clone(),
                }),
            }
        }

        tracing::debug!(count = pins.len(), "writing pins");
        writeln!(self.out, "PINS {} ;", pins.len())?;
        for (id, net) in pins {
            self.write_pin(id, net)?;
        }
        writeln!(self.out, "END PINS")?;
        Ok(())
    }

    fn write_pin(&mut self, id: BTermId, net: NetId) -> Result<()> {
        let design = self.ctx.design;
        let bterm = &design[id];
        let version = self.ctx.version();

        if bterm.bpins.is_empty() {
            self.write_pin_header(bterm, net, 0)?;
            writeln!(self.out, " ;")?;
            return Ok(());
        }

        for (i, bpin) in bterm.bpins.iter().enumerate() {
            // Before PORT existed, every extra pin shape was its own pin.
            if i == 0 || version <= DefVersion::V5_6 {
                if i > 0 {
                    writeln!(self.out, " ;")?;
                }
                self.write_pin_header(bterm, net, i)?;
            }
            write!(self.out, "\n      ")?;
            if version > DefVersion::V5_6 {
                write!(self.out, "+ PORT")?;
            }
            self.write_bpin(bpin)?;
        }
        writeln!(self.out, " ;")?;
        Ok(())
    }

    fn write_pin_header(&mut self, bterm: &BTerm, net: NetId, extra: usize) -> Result<()> {
        let ctx = &self.ctx;
        write!(self.out, "    - {}", bterm.name)?;
        if extra > 0 {
            write!(self.out, ".extra{extra}")?;
        }
        write!(self.out, " + NET {}", ctx.net_ref(net))?;
        if bterm.special {
            write!(self.out, " + SPECIAL")?;
        }
        write!(self.out, " + DIRECTION {}", bterm.io)?;
        if ctx.version() >= DefVersion::V5_6 {
            if let Some(supply) = bterm.supply_pin {
                write!(self.out, " + SUPPLYSENSITIVITY {}", ctx.design[supply].name)?;
            }
            if let Some(ground) = bterm.ground_pin {
                write!(self.out, " + GROUNDSENSITIVITY {}", ctx.design[ground].name)?;
            }
        }
        write!(self.out, " + USE {}", bterm.sig)?;
        Ok(())
    }

    /// Writes the shapes of a pin relative to the center of its first shape,
    /// followed by its placement at that center.
    fn write_bpin(&mut self, bpin: &BPin) -> Result<()> {
        let ctx = &self.ctx;
        let version = ctx.version();
        let origin = bpin_origin(bpin, |v| ctx.dist(v));

        for shape in bpin.boxes.iter() {
            let ll = ctx.units.point(shape.rect.lower_left()) - origin;
            let ur = ctx.units.point(shape.rect.upper_right()) - origin;
            write!(self.out, "\n        + LAYER {}", ctx.layer_name(shape.layer))?;
            if version != DefVersion::V5_5 {
                if version == DefVersion::V5_8 && shape.mask != 0 {
                    write!(self.out, " MASK {}", shape.mask)?;
                }
                match bpin.rule {
                    Some(ShapeRule::DesignRuleWidth(w)) => {
                        write!(self.out, " DESIGNRULEWIDTH {}", ctx.dist(w))?
                    }
                    Some(ShapeRule::Spacing(s)) => write!(self.out, " SPACING {}", ctx.dist(s))?,
                    None => {}
                }
            }
            write!(self.out, " {ll} {ur}")?;
        }

        if let Some(keyword) = bpin.status.placed_keyword() {
            write!(self.out, "\n        + {keyword} {origin} N")?;
        }
        Ok(())
    }

    /// Writes properties of block and instance terminals.
    pub(super) fn write_pin_properties(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        let design = ctx.design;
        let props = &ctx.props;

        let bterms: Vec<_> = design
            .bterms
            .iter()
            .filter(|b| props.has_properties(ObjKind::ComponentPin, &b.properties))
            .collect();
        let iterms: Vec<_> = design
            .iterms
            .iter()
            .filter(|i| props.has_properties(ObjKind::ComponentPin, &i.properties))
            .collect();
        if bterms.is_empty() && iterms.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "PINPROPERTIES {} ;", bterms.len() + iterms.len())?;
        for bterm in bterms {
            write!(self.out, "  - PIN {}", bterm.name)?;
            props.write_clause(ObjKind::ComponentPin, &bterm.properties, self.out)?;
            writeln!(self.out, " ;")?;
        }
        for iterm in iterms {
            write!(self.out, "  - {} {}", design[iterm.inst].name, iterm.mterm)?;
            props.write_clause(ObjKind::ComponentPin, &iterm.properties, self.out)?;
            writeln!(self.out, " ;")?;
        }
        writeln!(self.out, "END PINPROPERTIES")?;
        Ok(())
    }
}

/// The center of the first shape of `bpin`, in DEF units.
///
/// Each coordinate is the converted lower edge plus the converted half extent.
pub(super) fn bpin_origin(bpin: &BPin, dist: impl Fn(i64) -> i64) -> Point {
    match bpin.boxes.first() {
        Some(first) => {
            let r = first.rect;
            Point::new(
                dist(r.left()) + dist(r.width() / 2),
                dist(r.bot()) + dist(r.height() / 2),
            )
        }
        None => Point::zero(),
    }
}
