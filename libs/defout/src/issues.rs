//! Recoverable problems found while writing DEF.
//!
//! Each issue is logged through [`tracing`] when it is created and
//! collected into an [`IssueSet`] that is handed back to the caller.

use std::fmt::Display;
use std::path::PathBuf;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};
use tracing::Level;

/// An enumeration of possible severity levels.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Severity {
    /// A problem the write recovered from.
    #[default]
    Warning,
    /// A problem that aborted the write.
    Error,
}

impl Severity {
    /// Returns log level corresponding to this severity.
    #[inline]
    pub const fn as_tracing_level(&self) -> Level {
        match *self {
            Self::Warning => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The reason an issue was raised.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cause {
    /// A block pin is not connected to any net and was left out of `PINS`.
    PinWithoutNet { pin: ArcStr },
    /// A shielded special wire names a shield net that does not exist.
    MissingShieldNet { net: ArcStr },
    /// The output destination could not be opened.
    CannotOpen { path: PathBuf },
}

impl Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PinWithoutNet { pin } => {
                write!(f, "pin {pin} skipped because it has no net")
            }
            Self::MissingShieldNet { net } => {
                write!(f, "missing shield net on special net {net}; writing ROUTED")
            }
            Self::CannotOpen { path } => {
                write!(f, "Cannot open DEF file ({}) for writing", path.display())
            }
        }
    }
}

/// An issue identified while writing a design.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct WriteIssue {
    cause: Cause,
    severity: Severity,
}

impl WriteIssue {
    pub(crate) fn new_and_log(cause: Cause, severity: Severity) -> Self {
        let result = Self { cause, severity };
        match severity {
            Severity::Warning => tracing::event!(Level::WARN, issue = ?result.cause, "{}", result),
            Severity::Error => tracing::event!(Level::ERROR, issue = ?result.cause, "{}", result),
        }
        result
    }

    /// The reason this issue was raised.
    #[inline]
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// The severity of this issue.
    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl Display for WriteIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.cause)
    }
}

/// A collection of issues.
#[derive(Debug, Clone, Default)]
pub struct IssueSet {
    issues: Vec<WriteIssue>,
    num_warnings: usize,
}

impl IssueSet {
    /// Creates a new, empty issue set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given issue to the issue set.
    pub fn add(&mut self, issue: WriteIssue) {
        if issue.severity == Severity::Warning {
            self.num_warnings += 1;
        }
        self.issues.push(issue);
    }

    /// Returns an iterator over all issues in the set.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &WriteIssue> {
        self.issues.iter()
    }

    /// The number of issues in this issue set.
    #[inline]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns `true` if this issue set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if this issue set contains a warning.
    pub fn has_warning(&self) -> bool {
        self.num_warnings > 0
    }

    /// The number of warnings in this issue set.
    #[inline]
    pub fn num_warnings(&self) -> usize {
        self.num_warnings
    }
}

impl IntoIterator for IssueSet {
    type Item = WriteIssue;
    type IntoIter = std::vec::IntoIter<WriteIssue>;
    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl Display for IssueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for issue in self.issues.iter() {
            writeln!(f, "{}", issue)?;
        }
        Ok(())
    }
}
