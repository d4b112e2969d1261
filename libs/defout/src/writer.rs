//! The entry point for writing a design.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::issues::{Cause, IssueSet, Severity, WriteIssue};
use crate::model::{Design, InstId, NetId};
use crate::options::WriterOptions;
use crate::sections::{DefWriter, EmitContext};
use crate::select::Selection;

const DEFAULT_BUF_CAPACITY: usize = 8 * 1024;

/// Writes designs as DEF.
///
/// Nets and instances may be selected to restrict the output. Selecting
/// nothing writes the whole design.
#[derive(Debug, Clone, Default)]
pub struct DefOut {
    options: WriterOptions,
    nets: Vec<NetId>,
    insts: Vec<InstId>,
}

impl DefOut {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    #[inline]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Restricts output to the given net, and to the instances it connects
    /// to if it is not special.
    pub fn select_net(&mut self, net: NetId) -> &mut Self {
        self.nets.push(net);
        self
    }

    /// Adds an instance to the output.
    pub fn select_inst(&mut self, inst: InstId) -> &mut Self {
        self.insts.push(inst);
        self
    }

    fn context<'a>(&self, design: &'a Design) -> Result<EmitContext<'a>> {
        design.validate()?;
        for &net in self.nets.iter() {
            design.check_id(net, "selection")?;
        }
        for &inst in self.insts.iter() {
            design.check_id(inst, "selection")?;
        }
        let selection = Selection::build(design, &self.nets, &self.insts);
        Ok(EmitContext::new(design, self.options, selection))
    }

    /// Writes `design` as a DEF file at `path`.
    ///
    /// The file and any parent directories are created if necessary.
    pub fn write_block(&self, design: &Design, path: impl AsRef<Path>) -> Result<IssueSet> {
        let mut out = open(path.as_ref())?;
        self.write_block_to(design, &mut out)
    }

    /// Writes `design` as DEF to the provided output stream.
    ///
    /// Fails with [`Error::UnknownId`] before writing anything if the design
    /// or the selection holds a dangling id.
    pub fn write_block_to<W: Write>(&self, design: &Design, out: &mut W) -> Result<IssueSet> {
        DefWriter::new(self.context(design)?, out).write_def()
    }

    /// Writes the pin and component locations of `design` to a file at `path`.
    pub fn write_placement(&self, design: &Design, path: impl AsRef<Path>) -> Result<IssueSet> {
        let mut out = open(path.as_ref())?;
        self.write_placement_to(design, &mut out)
    }

    pub fn write_placement_to<W: Write>(&self, design: &Design, out: &mut W) -> Result<IssueSet> {
        DefWriter::new(self.context(design)?, out).write_placement()
    }
}

/// Opens `path` for writing, buffered by the block size of its filesystem.
fn open(path: &Path) -> Result<BufWriter<File>> {
    let create = || -> std::io::Result<File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        File::create(path)
    };
    let file = create().map_err(|source| {
        WriteIssue::new_and_log(
            Cause::CannotOpen {
                path: path.to_path_buf(),
            },
            Severity::Error,
        );
        Error::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let capacity = block_size(&file).unwrap_or(DEFAULT_BUF_CAPACITY);
    tracing::trace!(?path, capacity, "opened output file");
    Ok(BufWriter::with_capacity(capacity, file))
}

#[cfg(unix)]
fn block_size(file: &File) -> Option<usize> {
    use std::os::unix::fs::MetadataExt;
    let size = file.metadata().ok()?.blksize();
    usize::try_from(size).ok().filter(|&s| s > 0)
}

#[cfg(not(unix))]
fn block_size(_file: &File) -> Option<usize> {
    None
}
