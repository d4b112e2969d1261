use std::io::Write;

use crate::error::Result;
use crate::model::{ScanChain, ScanPartition};

use super::DefWriter;

impl<W: Write> DefWriter<'_, W> {
    /// Writes one scan chain record per partition.
    ///
    /// A chain with several partitions is written as `<name>_<index>`. Chains
    /// without partitions are skipped.
    pub(super) fn write_scan_chains(&mut self) -> Result<()> {
        let design = self.ctx.design;
        let chains = &design.scan_chains;
        let count: usize = chains.iter().map(|c| c.partitions.len()).sum();
        if count == 0 {
            return Ok(());
        }

        write!(self.out, "\nSCANCHAINS {count} ;\n\n")?;
        for chain in chains.iter() {
            for (i, partition) in chain.partitions.iter().enumerate() {
                if chain.partitions.len() == 1 {
                    writeln!(self.out, "- {}", chain.name)?;
                } else {
                    writeln!(self.out, "- {}_{i}", chain.name)?;
                }
                self.write_scan_partition(chain, partition)?;
            }
        }
        write!(self.out, "END SCANCHAINS\n\n")?;
        Ok(())
    }

    fn write_scan_partition(&mut self, chain: &ScanChain, partition: &ScanPartition) -> Result<()> {
        let design = self.ctx.design;
        writeln!(self.out, "+ START PIN {}", chain.scan_in.name(design))?;

        // Consecutive lists of the same kind share one keyword.
        let mut floating = false;
        let mut ordered = false;
        for list in partition.lists.iter() {
            let len = list.insts.len();
            if len == 1 && !floating {
                writeln!(self.out, "+ FLOATING")?;
                floating = true;
                ordered = false;
            } else if len > 1 && !ordered {
                writeln!(self.out, "+ ORDERED")?;
                floating = false;
                ordered = true;
            }
            for scan_inst in list.insts.iter() {
                writeln!(
                    self.out,
                    "  {} ( IN {} ) ( OUT {} )",
                    design[scan_inst.inst].name,
                    scan_inst.scan_in.pin_name(design),
                    scan_inst.scan_out.pin_name(design)
                )?;
            }
        }

        writeln!(self.out, "+ PARTITION {}", partition.name)?;
        write!(self.out, "+ STOP PIN {} ;\n\n", chain.scan_out.name(design))?;
        Ok(())
    }
}
