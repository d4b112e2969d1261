use std::io::Write;

use crate::error::Result;
use crate::model::{NonDefaultRule, Via, ViaParams};
use crate::options::DefVersion;
use crate::props::ObjKind;

use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    /// Writes the design's vias.
    ///
    /// From 5.6 on, rotated vias are referenced by base name and orientation
    /// instead of being defined.
    pub(super) fn write_vias(&mut self) -> Result<()> {
        let version = self.ctx.version();
        let design = self.ctx.design;
        let vias: Vec<&Via> = design
            .vias
            .iter()
            .filter(|via| version < DefVersion::V5_6 || !via.is_rotated())
            .collect();
        if vias.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "VIAS {} ;", vias.len())?;
        for via in vias {
            self.write_via(via)?;
        }
        writeln!(self.out, "END VIAS")?;
        Ok(())
    }

    fn write_via(&mut self, via: &Via) -> Result<()> {
        write!(self.out, "    - {}", via.name)?;
        match (&via.generate_rule, &via.params) {
            (Some(rule), Some(params)) if self.ctx.version() >= DefVersion::V5_6 => {
                self.write_via_params(rule, params)?;
                if let Some(ref pattern) = via.pattern {
                    write!(self.out, " + PATTERNNAME {pattern}")?;
                }
            }
            _ => {
                if let Some(ref pattern) = via.pattern {
                    write!(self.out, " + PATTERNNAME {pattern}")?;
                }
                for (i, shape) in via.boxes.iter().enumerate() {
                    if (i + 1) % 8 == 0 {
                        write!(self.out, "\n      ")?;
                    }
                    write!(
                        self.out,
                        " + RECT {} {}",
                        self.ctx.layer_name(shape.layer),
                        self.ctx.units.rect(shape.rect)
                    )?;
                }
            }
        }
        writeln!(self.out, " ;")?;
        Ok(())
    }

    fn write_via_params(&mut self, rule: &str, p: &ViaParams) -> Result<()> {
        let design = self.ctx.design;
        let units = self.ctx.units;
        let d = |v: i64| units.dist(v);

        write!(self.out, " + VIARULE {rule}")?;
        write!(self.out, " + CUTSIZE {} {} ", d(p.cut_size.x), d(p.cut_size.y))?;
        write!(
            self.out,
            " + LAYERS {} {} {} ",
            design[p.bottom_layer].name,
            design[p.cut_layer].name,
            design[p.top_layer].name
        )?;
        write!(
            self.out,
            " + CUTSPACING {} {} ",
            d(p.cut_spacing.x),
            d(p.cut_spacing.y)
        )?;
        write!(
            self.out,
            " + ENCLOSURE {} {} {} {} ",
            d(p.bottom_enclosure.x),
            d(p.bottom_enclosure.y),
            d(p.top_enclosure.x),
            d(p.top_enclosure.y)
        )?;
        if p.rows != 1 || p.cols != 1 {
            write!(self.out, " + ROWCOL {} {} ", p.rows, p.cols)?;
        }
        if p.origin.x != 0 || p.origin.y != 0 {
            write!(self.out, " + ORIGIN {} {} ", d(p.origin.x), d(p.origin.y))?;
        }
        let offsets = [p.bottom_offset, p.top_offset];
        if offsets.iter().any(|o| o.x != 0 || o.y != 0) {
            write!(
                self.out,
                " + OFFSET {} {} {} {} ",
                d(p.bottom_offset.x),
                d(p.bottom_offset.y),
                d(p.top_offset.x),
                d(p.top_offset.y)
            )?;
        }
        Ok(())
    }

    pub(super) fn write_non_default_rules(&mut self) -> Result<()> {
        let design = self.ctx.design;
        let rules = &design.non_default_rules;
        if rules.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "NONDEFAULTRULES {} ;", rules.len())?;
        for rule in rules.iter() {
            self.write_non_default_rule(rule)?;
        }
        writeln!(self.out, "END NONDEFAULTRULES")?;
        Ok(())
    }

    fn write_non_default_rule(&mut self, rule: &NonDefaultRule) -> Result<()> {
        let ctx = &self.ctx;
        let design = ctx.design;

        writeln!(self.out, "    - {}", rule.name)?;
        if rule.hard_spacing {
            writeln!(self.out, "      + HARDSPACING")?;
        }
        for layer_rule in rule.layer_rules.iter() {
            write!(
                self.out,
                "      + LAYER {} WIDTH {}",
                design[layer_rule.layer].name,
                ctx.dist(layer_rule.width)
            )?;
            if layer_rule.spacing != 0 {
                write!(self.out, " SPACING {}", ctx.dist(layer_rule.spacing))?;
            }
            if layer_rule.wire_extension != 0 {
                write!(
                    self.out,
                    " WIREEXTENSION {}",
                    ctx.dist(layer_rule.wire_extension)
                )?;
            }
            writeln!(self.out)?;
        }
        for &via in rule.use_vias.iter() {
            writeln!(self.out, "      + VIA {}", design[via].name)?;
        }
        for via_rule in rule.use_via_rules.iter() {
            writeln!(self.out, "      + VIARULE {via_rule}")?;
        }
        for min_cuts in rule.min_cuts.iter() {
            writeln!(
                self.out,
                "      + MINCUTS {} {}",
                design[min_cuts.layer].name,
                min_cuts.count
            )?;
        }
        if ctx.props.has_properties(ObjKind::NonDefaultRule, &rule.properties) {
            write!(self.out, "   ")?;
            ctx.props
                .write_clause(ObjKind::NonDefaultRule, &rule.properties, self.out)?;
        }
        writeln!(self.out, "    ;")?;
        Ok(())
    }
}
