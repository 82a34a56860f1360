//! core
//!
//! Core domain types and the environment safety checks.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Environment, ResolvedEnvironment, WorkingContextId
//! - [`marker`] - Reading the declared-environment marker file
//! - [`resolver`] - Cross-checking the marker against the working directory
//! - [`artifact`] - The single local plan file
//! - [`config`] - Configuration schema, loading, and merged settings
//!
//! # Design Principles
//!
//! - An unresolved environment cannot be represented
//! - Resolution is pure and deterministic
//! - Configuration is passed explicitly, never read from globals

pub mod artifact;
pub mod config;
pub mod marker;
pub mod resolver;
pub mod types;
