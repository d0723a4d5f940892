//! Shared utilities for the namepick workspace.

pub mod logger;
pub mod time;
