//! # incbuild - Incremental C++ Build Driver
//!
//! incbuild reads a `build.toml`, works out which translation units changed
//! since their object files were written, recompiles only those and relinks
//! the binary when anything was rebuilt.
//!
//! ## Quick Start
//!
//! ```bash
//! # Debug build (the default profile)
//! incbuild
//!
//! # Release build, showing every decision and command
//! incbuild release --verbose
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Staleness detection, build planning and command assembly
//! - [`config`] - Configuration parsing (`build.toml`)
//! - [`timestamp`] - File modification times
//! - [`error`] - Error types

/// Incremental build core.
pub mod build;

/// Configuration file parsing (`build.toml`).
pub mod config;

/// Error types shared across the crate.
pub mod error;

/// File modification time lookup.
pub mod timestamp;

/// Terminal UI utilities (tables, colors).
pub mod ui;

pub use error::{BuildError, Result};
