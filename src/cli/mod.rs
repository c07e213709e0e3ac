//! Command Line Interface (CLI) layer for framefit.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the single-file, batch,
//! locate and inventory commands. It wires user-provided options to the
//! library functionality exposed via `framefit::api`.
//!
//! If you are embedding framefit into another application, prefer using
//! the high-level `framefit::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
