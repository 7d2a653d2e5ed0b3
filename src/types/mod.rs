//! Core domain types for the GitHub API core.
//!
//! This module contains the fundamental types used throughout the crate,
//! designed to encode invariants via the type system.

pub mod ids;
pub mod pr;
pub mod token;

// Re-export commonly used types at the module level
pub use ids::{InstallationId, PrNumber, RepoId, Sha};
pub use pr::{MergeableState, PrSnapshot};
pub use token::InstallationToken;
