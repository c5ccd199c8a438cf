//! Incremental build core.
//!
//! - [`inventory`] - discovers units and artifacts with their timestamps
//! - [`stale`] - decides fresh vs. incremental and which units are stale
//! - [`plan`] - turns that decision into an ordered build plan
//! - [`command`] - assembles compile and link argument lists
//! - [`invoke`] - runs them through an [`Invoker`]

pub mod command;
mod driver;
mod feedback;
pub mod inventory;
pub mod invoke;
pub mod plan;
pub mod stale;
pub mod utils;

pub use driver::{BuildOptions, BuildReport, Outcome, UnitReport, build_project};
pub use feedback::FeedbackAnalyzer;
pub use inventory::{Inventory, Unit, build_inventory};
pub use invoke::{Invoker, ProcessInvoker, StepOutcome};
pub use plan::{BuildPlan, plan};
pub use stale::{BuildMode, StaleReason, Staleness, classify};
