//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod generate;
mod output;
mod revert;
mod tables;

pub use generate::GenerateReport;
pub use output::{Report, TerminalOutput};
pub use revert::RevertSummary;
pub use tables::TablesReport;
