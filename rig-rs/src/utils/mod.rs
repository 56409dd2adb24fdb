//! Shared utilities for the rig-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
