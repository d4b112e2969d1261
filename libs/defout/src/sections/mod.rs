//! DEF section writers.
//!
//! A [`DefWriter`] writes one design to one output stream. Each section of the
//! DEF file is written by its own method, in the order the language requires.

use std::fmt::{Display, Formatter};
use std::io::Write;

use crate::error::Result;
use crate::issues::{Cause, IssueSet, Severity, WriteIssue};
use crate::model::{Design, InstId, LayerId, MasterId, NetId, RegionId, ViaRef};
use crate::options::{DefVersion, WriterOptions};
use crate::props::PropertyRegistry;
use crate::select::Selection;
use crate::units::Units;

mod blockages;
mod components;
mod floorplan;
mod header;
mod nets;
mod pins;
mod placement;
mod scan;
mod vias;

/// Everything derived from a design and the writer options for one write.
#[derive(Debug)]
pub struct EmitContext<'a> {
    pub design: &'a Design,
    pub options: WriterOptions,
    pub units: Units,
    pub selection: Selection,
    pub props: PropertyRegistry,
}

impl<'a> EmitContext<'a> {
    pub fn new(design: &'a Design, options: WriterOptions, selection: Selection) -> Self {
        Self {
            design,
            options,
            units: Units::new(design.def_units, design.db_units_per_micron),
            selection,
            props: PropertyRegistry::from_design(design),
        }
    }

    #[inline]
    pub fn version(&self) -> DefVersion {
        self.options.version
    }

    #[inline]
    pub fn dist(&self, v: i64) -> i64 {
        self.units.dist(v)
    }

    pub fn layer_name(&self, id: LayerId) -> &'a str {
        let layer = &self.design[id];
        match layer.alias {
            Some(ref alias) if self.options.use_layer_alias => alias,
            _ => &layer.name,
        }
    }

    pub fn net_ref(&self, id: NetId) -> Ref<'a> {
        if self.options.use_net_inst_ids {
            Ref::Id('N', id.index())
        } else {
            Ref::Name(&self.design[id].name)
        }
    }

    pub fn inst_ref(&self, id: InstId) -> Ref<'a> {
        if self.options.use_net_inst_ids {
            Ref::Id('I', id.index())
        } else {
            Ref::Name(&self.design[id].name)
        }
    }

    pub fn master_ref(&self, id: MasterId) -> Ref<'a> {
        if self.options.use_master_ids {
            Ref::Id('M', id.index())
        } else {
            Ref::Name(&self.design[id].name)
        }
    }

    /// Returns the name of `region` if it is a DEF region, i.e. has boundaries.
    pub fn region_with_boundaries(&self, region: Option<RegionId>) -> Option<&'a str> {
        let region = &self.design[region?];
        (!region.boundaries.is_empty()).then_some(&*region.name)
    }

    pub fn via_name(&self, via: ViaRef) -> &'a str {
        match via {
            ViaRef::Block(id) => &self.design[id].name,
            ViaRef::Tech(id) => &self.design[id].name,
        }
    }

    pub fn via_bottom_layer(&self, via: ViaRef) -> LayerId {
        match via {
            ViaRef::Block(id) => self.design[id].bottom_layer,
            ViaRef::Tech(id) => self.design[id].bottom_layer,
        }
    }
}

/// A reference to a design object, by name or by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ref<'a> {
    Name(&'a str),
    Id(char, usize),
}

impl Display for Ref<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Ref::Name(name) => write!(f, "{name}"),
            Ref::Id(prefix, id) => write!(f, "{prefix}{id}"),
        }
    }
}

/// Writes a design to an output stream.
pub struct DefWriter<'a, W> {
    ctx: EmitContext<'a>,
    out: &'a mut W,
    issues: IssueSet,
}

impl<'a, W: Write> DefWriter<'a, W> {
    pub fn new(ctx: EmitContext<'a>, out: &'a mut W) -> Self {
        Self {
            ctx,
            out,
            issues: IssueSet::new(),
        }
    }

    /// Writes a complete DEF file.
    pub fn write_def(mut self) -> Result<IssueSet> {
        tracing::debug!(
            design = %self.ctx.design.name,
            version = %self.ctx.version(),
            "writing DEF"
        );
        self.write_header()?;
        self.write_die_area()?;
        self.write_rows()?;
        self.write_tracks()?;
        self.write_gcell_grid()?;
        self.write_vias()?;
        self.write_non_default_rules()?;
        self.write_regions()?;
        self.write_component_mask_shift()?;
        self.write_components()?;
        self.write_pins()?;
        self.write_pin_properties()?;
        self.write_blockages()?;
        self.write_fills()?;
        self.write_nets()?;
        self.write_groups()?;
        self.write_scan_chains()?;
        writeln!(self.out, "END DESIGN")?;
        self.out.flush()?;
        Ok(self.issues)
    }

    /// Writes pin and component locations only.
    pub fn write_placement(mut self) -> Result<IssueSet> {
        tracing::debug!(design = %self.ctx.design.name, "writing placement");
        self.write_placed_pins()?;
        self.write_placed_components()?;
        self.out.flush()?;
        Ok(self.issues)
    }

    fn warn(&mut self, cause: Cause) {
        self.issues
            .add(WriteIssue::new_and_log(cause, Severity::Warning));
    }
}
