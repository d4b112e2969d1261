//! Restricting output to a subset of a design.

use crate::model::{BTerm, Design, InstId, NetId};

/// Which nets and instances of a design are written.
///
/// Without a net list every net is written. Without an instance map every
/// instance is written. Selecting a regular net also selects every instance
/// it reaches through a regular terminal.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    nets: Option<Vec<bool>>,
    insts: Option<Vec<bool>>,
}

impl Selection {
    /// Selects everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn build(design: &Design, nets: &[NetId], insts: &[InstId]) -> Self {
        let mut selection = Self::all();

        if !nets.is_empty() {
            let mut net_map = vec![false; design.nets.len()];
            for &id in nets {
                if std::mem::replace(&mut net_map[id.index()], true) {
                    continue;
                }
                let net = &design[id];
                if net.special {
                    continue;
                }
                let inst_map = selection
                    .insts
                    .get_or_insert_with(|| vec![false; design.insts.len()]);
                for &iterm in net.iterms.iter() {
                    let iterm = &design[iterm];
                    if !iterm.special {
                        inst_map[iterm.inst.index()] = true;
                    }
                }
            }
            selection.nets = Some(net_map);
        }

        if !insts.is_empty() {
            let inst_map = selection
                .insts
                .get_or_insert_with(|| vec![false; design.insts.len()]);
            for &id in insts {
                inst_map[id.index()] = true;
            }
        }

        tracing::debug!(
            nets = selection.nets.as_ref().map(|m| m.iter().filter(|s| **s).count()),
            insts = selection.insts.as_ref().map(|m| m.iter().filter(|s| **s).count()),
            "built selection"
        );

        selection
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        self.nets.is_none() && self.insts.is_none()
    }

    #[inline]
    pub fn net(&self, id: NetId) -> bool {
        self.nets.as_ref().is_none_or(|m| m[id.index()])
    }

    #[inline]
    pub fn inst(&self, id: InstId) -> bool {
        self.insts.as_ref().is_none_or(|m| m[id.index()])
    }

    /// Returns `true` if an object optionally tied to `inst` is written.
    #[inline]
    pub fn tied_inst(&self, inst: Option<InstId>) -> bool {
        inst.is_none_or(|id| self.inst(id))
    }

    /// A pin is written unless its net was filtered out.
    #[inline]
    pub fn pin(&self, bterm: &BTerm) -> bool {
        bterm.net.is_none_or(|net| self.net(net))
    }
}
