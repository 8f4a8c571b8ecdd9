//! CodeScape execution engine -- accepts normalized calls from
//! `codescape-core`, places objects on a masked grid, and reports a
//! per-call outcome.
//!
//! The engine never aborts a batch: a failing handler becomes an `Err`
//! result and execution moves on to the next call. Occupancy lives in an
//! explicit [`World`] owned by a [`Session`], not in process globals.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod handlers;
pub mod placement;
pub mod registry;
pub mod session;
pub mod world;

pub use config::{SessionConfig, DEFAULT_GRID_SIZE};
pub use engine::{execute, ExecutionOutcome, ExecutionResult};
pub use error::{MaskError, PlacementError};
pub use grid::{GridAllocator, GridCell, ValidityMask};
pub use placement::{ObjectKind, Outcome, PlacedObject, Placement, RoadDirection};
pub use registry::{Handler, Registry};
pub use session::{RunReport, Session};
pub use world::{Details, World};

/// Run a script once on a fresh all-land session.
///
/// Convenience for one-shot callers; use [`Session`] directly to keep
/// occupancy across runs or to supply a mask.
pub fn run_script(source: &str, config: &SessionConfig) -> RunReport {
    Session::with_config(config).run(source)
}
