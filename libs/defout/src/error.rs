//! DEF writer error types.

use std::path::PathBuf;

use arcstr::ArcStr;
use geometry::point::Point;
use geometry::rect::Rect;

pub type Result<T> = std::result::Result<T, Error>;

/// A condition that aborts an entire write.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot open DEF file ({path:?}) for writing")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("unsupported DEF version `{0}`")]
    UnsupportedVersion(String),
    /// A special wire box of undefined direction cannot be bisected along either axis.
    #[error("odd dimension in both directions for special wire box {rect} on net `{net}`")]
    OddDimensions { net: ArcStr, rect: Rect },
    /// Two consecutive wire points are not axis-aligned.
    #[error("diagonal wire step from {from} to {to} on net `{net}`")]
    DiagonalStep { net: ArcStr, from: Point, to: Point },
    /// A stored id does not refer to an entity of the design.
    #[error("{kind} {index} referenced by `{owner}` does not exist")]
    UnknownId {
        kind: &'static str,
        index: usize,
        owner: String,
    },
}
