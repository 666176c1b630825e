//! Planar linkage solver and seven-point partition search.
//!
//! Two independent engines share one geometry kernel:
//! - `linkage`: closed 4- or 7-joint chains of rigid bars. Dragging a bar about
//!   a joint re-solves the chain so no bar length changes.
//! - `partition`: for 7 points in general position, enumerate triples of
//!   directed lines that put every point in its own cell.
//!
//! API Policy
//! - The crate does no I/O. Presentation layers (the CLI, an editor) consume
//!   plain data: positions, `BarSegment`s, `AngleRange`s, `Triple`s.
//! - Expected geometric non-solutions are `Option`s or outcome enums; the
//!   error enums only cover bad configuration and unknown ids.

pub mod geom2;
pub mod guard;
pub mod linkage;
pub mod partition;
pub mod visibility;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::GeomCfg;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::rand::{
        draw_closed_chain, draw_points_general_position, ChainCfg, PointsCfg, ReplayToken,
    };
    pub use crate::geom2::GeomCfg;
    pub use crate::linkage::{
        AngleRange, AngleRanges, DragOutcome, HalfBarId, Hover, JointId, Linkage, LinkageCfg,
    };
    pub use crate::partition::{
        DirectedLine, PartitionCfg, PartitionSearch, SearchOutcome, Triple,
    };
    pub use nalgebra::Vector2 as Vec2;
}
