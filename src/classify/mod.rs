//! # Classification Logic
//!
//! Pure decision functions of the dashboard core: staleness detection,
//! workload zone computation, and the gateway health verdict. Nothing in
//! this module performs I/O; every function is deterministic given its
//! inputs so the decision rules can be tested exhaustively.

pub mod gateway;
pub mod staleness;
pub mod workload;

pub use gateway::classify_gateway;
pub use staleness::{any_stale, stale_jobs};
pub use workload::classify_workload;
