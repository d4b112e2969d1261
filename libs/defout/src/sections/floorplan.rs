use std::io::Write;

use geometry::dir::Dir;

use crate::error::Result;
use crate::model::{GridPattern, RowDir, TrackPattern};
use crate::options::DefVersion;
use crate::props::ObjKind;

use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    pub(super) fn write_rows(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        for row in ctx.design.rows.iter() {
            let origin = ctx.units.point(row.origin);
            write!(
                self.out,
                "ROW {} {} {} {} {} ",
                row.name,
                row.site,
                origin.x,
                origin.y,
                row.orient.def_mnemonic()
            )?;
            let step = ctx.dist(row.spacing);
            match row.dir {
                RowDir::Horizontal => write!(self.out, "DO {} BY 1 STEP {step} 0", row.site_count)?,
                RowDir::Vertical => write!(self.out, "DO 1 BY {} STEP 0 {step}", row.site_count)?,
            }
            ctx.props.write_clause(ObjKind::Row, &row.properties, self.out)?;
            writeln!(self.out, " ;")?;
        }
        Ok(())
    }

    pub(super) fn write_tracks(&mut self) -> Result<()> {
        let design = self.ctx.design;
        for grid in design.track_grids.iter() {
            let layer = self.ctx.layer_name(grid.layer);
            for pattern in grid.x.iter() {
                self.write_track_pattern(Dir::Horiz, pattern, layer)?;
            }
            for pattern in grid.y.iter() {
                self.write_track_pattern(Dir::Vert, pattern, layer)?;
            }
        }
        Ok(())
    }

    fn write_track_pattern(&mut self, axis: Dir, pattern: &TrackPattern, layer: &str) -> Result<()> {
        write!(
            self.out,
            "TRACKS {} {} DO {} STEP {}",
            axis.axis_name(),
            self.ctx.dist(pattern.origin),
            pattern.count,
            self.ctx.dist(pattern.step)
        )?;
        if pattern.first_mask != 0 {
            write!(self.out, " MASK {}", pattern.first_mask)?;
            if pattern.same_mask {
                write!(self.out, " SAMEMASK")?;
            }
        }
        writeln!(self.out, " LAYER {layer} ;")?;
        Ok(())
    }

    pub(super) fn write_gcell_grid(&mut self) -> Result<()> {
        let Some(ref grid) = self.ctx.design.gcell_grid else {
            return Ok(());
        };
        let patterns = grid
            .x
            .iter()
            .map(|p| (Dir::Horiz, p))
            .chain(grid.y.iter().map(|p| (Dir::Vert, p)));
        for (axis, &GridPattern { origin, count, step }) in patterns {
            writeln!(
                self.out,
                "GCELLGRID {} {} DO {count} STEP {} ;",
                axis.axis_name(),
                self.ctx.dist(origin),
                self.ctx.dist(step)
            )?;
        }
        Ok(())
    }

    /// Writes regions that have at least one boundary.
    pub(super) fn write_regions(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        let regions: Vec<_> = ctx
            .design
            .regions
            .iter()
            .filter(|r| !r.boundaries.is_empty())
            .collect();
        if regions.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "REGIONS {} ;", regions.len())?;
        for region in regions {
            write!(self.out, "    - {}", region.name)?;
            for (i, &rect) in region.boundaries.iter().enumerate() {
                if i % 4 == 3 {
                    write!(self.out, "\n        ")?;
                }
                write!(self.out, " {}", ctx.units.rect(rect))?;
            }
            if let Some(kind) = region.kind.as_str() {
                write!(self.out, " + TYPE {kind}")?;
            }
            ctx.props
                .write_clause(ObjKind::Region, &region.properties, self.out)?;
            writeln!(self.out, " ;")?;
        }
        writeln!(self.out, "END REGIONS")?;
        Ok(())
    }

    /// Writes non-empty groups.
    pub(super) fn write_groups(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        let groups: Vec<_> = ctx
            .design
            .groups
            .iter()
            .filter(|g| !g.insts.is_empty())
            .collect();
        if groups.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "GROUPS {} ;", groups.len())?;
        for group in groups {
            write!(self.out, "    - {}", group.name)?;
            for (i, &inst) in group.insts.iter().enumerate() {
                if i % 4 == 3 {
                    write!(self.out, "\n        ")?;
                }
                write!(self.out, " {}", ctx.design[inst].name)?;
            }
            if let Some(region) = ctx.region_with_boundaries(group.region) {
                write!(self.out, " + REGION {region}")?;
            }
            ctx.props
                .write_clause(ObjKind::Group, &group.properties, self.out)?;
            writeln!(self.out, " ;")?;
        }
        writeln!(self.out, "END GROUPS")?;
        Ok(())
    }

    pub(super) fn write_component_mask_shift(&mut self) -> Result<()> {
        let layers = &self.ctx.design.component_mask_shift;
        if self.ctx.version() != DefVersion::V5_8 || layers.is_empty() {
            return Ok(());
        }
        write!(self.out, "COMPONENTMASKSHIFT ")?;
        for &layer in layers.iter() {
            write!(self.out, "{} ", self.ctx.design[layer].name)?;
        }
        writeln!(self.out, ";")?;
        Ok(())
    }
}
