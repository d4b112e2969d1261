use std::collections::HashSet;
use std::io::Write;

use crate::error::Result;
use crate::model::{sorted_by_name, Design, Net, NetId, SourceType};
use crate::props::ObjKind;
use crate::swire::write_swire;
use crate::wire::PathDecoder;

use super::DefWriter;

/// Number of connections after which a net record starts a new line.
const CONNECTIONS_PER_LINE: usize = 8;

/// A net belongs to the regular section if it is not special, or if any of
/// its instance terminals is not special.
fn is_regular(net: &Net, design: &Design) -> bool {
    !net.special || net.iterms.iter().any(|&iterm| !design[iterm].special)
}

impl<W: Write> DefWriter<'_, W> {
    /// Writes `SPECIALNETS` followed by `NETS`.
    ///
    /// A special net with regular instance terminals appears in both sections.
    pub(super) fn write_nets(&mut self) -> Result<()> {
        let design = self.ctx.design;
        let mut nets = sorted_by_name(&design.nets, |net| net.name.as_str());
        nets.retain(|&id| self.ctx.selection.net(id));

        let special: Vec<NetId> = nets
            .iter()
            .copied()
            .filter(|&id| design[id].special)
            .collect();
        let regular: Vec<NetId> = nets
            .into_iter()
            .filter(|&id| is_regular(&design[id], design))
            .collect();

        tracing::debug!(
            special = special.len(),
            regular = regular.len(),
            "writing nets"
        );

        if !special.is_empty() {
            writeln!(self.out, "SPECIALNETS {} ;", special.len())?;
            for id in special {
                self.write_special_net(id)?;
            }
            writeln!(self.out, "END SPECIALNETS")?;
        }

        writeln!(self.out, "NETS {} ;", regular.len())?;
        for id in regular {
            self.write_net(id)?;
        }
        writeln!(self.out, "END NETS")?;
        Ok(())
    }

    fn write_special_net(&mut self, id: NetId) -> Result<()> {
        let design = self.ctx.design;
        let net = &design[id];
        write!(self.out, "    - {}", self.ctx.net_ref(id))?;

        let mut i = 0;
        for &bterm in net.bterms.iter() {
            i += 1;
            if i % CONNECTIONS_PER_LINE == 0 {
                write!(self.out, "\n    ")?;
            }
            write!(self.out, " ( PIN {} )", design[bterm].name)?;
        }

        let mut wild_names = HashSet::new();
        for &iterm in net.iterms.iter() {
            let iterm = &design[iterm];
            if !iterm.special {
                continue;
            }
            if net.wild_connected {
                if wild_names.insert(iterm.mterm.as_str()) {
                    write!(self.out, " ( * {} )", iterm.mterm)?;
                    i += 1;
                }
            } else {
                i += 1;
                let sep = if i % CONNECTIONS_PER_LINE == 0 {
                    "\n      "
                } else {
                    " "
                };
                write!(
                    self.out,
                    "{sep}( {} {} )",
                    self.ctx.inst_ref(iterm.inst),
                    iterm.mterm
                )?;
            }
        }

        write!(self.out, " + USE {}", net.sig)?;
        for swire in net.swires.iter() {
            write_swire(&self.ctx, net, swire, &mut self.issues, self.out)?;
        }

        // Test-inserted special nets carry no source.
        if let Some(source) = net.source.as_str().filter(|_| net.source != SourceType::Test) {
            write!(self.out, " + SOURCE {source}")?;
        }
        self.write_net_tail(net, ObjKind::SpecialNet)
    }

    fn write_net(&mut self, id: NetId) -> Result<()> {
        let ctx = &self.ctx;
        let design = ctx.design;
        let net = &design[id];
        write!(self.out, "    - {}", ctx.net_ref(id))?;

        let mut i = 0;
        for &bterm in net.bterms.iter() {
            i += 1;
            if i % CONNECTIONS_PER_LINE == 0 {
                write!(self.out, "\n     ")?;
            }
            write!(self.out, " ( PIN {} )", design[bterm].name)?;
        }

        for &iterm in net.iterms.iter() {
            let iterm = &design[iterm];
            // Tie cells of power nets may be outside the selection.
            if iterm.special || !ctx.selection.inst(iterm.inst) {
                continue;
            }
            i += 1;
            if i % CONNECTIONS_PER_LINE == 0 {
                write!(self.out, "\n     ")?;
            }
            write!(self.out, " ( {} {} )", ctx.inst_ref(iterm.inst), iterm.mterm)?;
        }

        if net.xtalk != 0 {
            write!(self.out, " + XTALK {}", net.xtalk)?;
        }
        write!(self.out, " + USE {}", net.sig)?;
        if let Some(rule) = net.non_default_rule {
            write!(self.out, " + NONDEFAULTRULE {}", design[rule].name)?;
        }
        if let Some(ref wire) = net.wire {
            PathDecoder::new(ctx, net).decode(wire, self.out)?;
        }
        if let Some(source) = net.source.as_str() {
            write!(self.out, " + SOURCE {source}")?;
        }
        self.write_net_tail(net, ObjKind::Net)
    }

    fn write_net_tail(&mut self, net: &Net, kind: ObjKind) -> Result<()> {
        if net.fixed_bump {
            write!(self.out, " + FIXEDBUMP")?;
        }
        if net.weight != 1 {
            write!(self.out, " + WEIGHT {}", net.weight)?;
        }
        self.ctx.props.write_clause(kind, &net.properties, self.out)?;
        writeln!(self.out, " ;")?;
        Ok(())
    }
}
