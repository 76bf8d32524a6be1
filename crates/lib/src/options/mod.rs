//! Build options: raw overrides and the resolved, sparse option set.
//!
//! # Submodules
//!
//! - [`resolve`] - overlay raw overrides on a recipe's defaults and apply
//!   platform rules

pub mod resolve;
mod types;

pub use resolve::{ResolveError, resolve};
pub use types::*;
