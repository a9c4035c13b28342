//! The tools module provides helper functions for huffpack.
//!
//! The tools are:
//! - cli: Command line interface for huffpack.
//! - freq_count: Frequency count of a symbol sequence, in first-seen order.
//!
pub mod cli;
pub mod freq_count;
