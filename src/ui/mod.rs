//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive confirmations
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All operator-facing output and prompts go through this module so quiet
//! mode and stream handling stay consistent.

pub mod output;
pub mod prompts;
