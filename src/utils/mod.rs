//! Utility functions module
//!
//! This module contains output formatting, HTTP client construction and the
//! user interaction surface.

pub mod format;
pub mod network;
pub mod ui;

pub use format::*;
pub use network::*;
pub use ui::*;
