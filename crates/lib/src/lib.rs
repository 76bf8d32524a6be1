//! scythe-recipe-lib: Packaging recipe logic for the scythe graphics framework
//!
//! This crate turns a set of boolean build options and a target platform into
//! build and install instructions:
//! - `options`: resolve raw overrides against a profile's defaults
//! - `derive`: compute requirements and preprocessor defines
//! - `descriptor`: emit the package contract seen by consumers
//! - `run`: sequence the lifecycle phases of a single recipe invocation
//!
//! The toolchain and the package index are external collaborators reached
//! through the [`toolchain::Toolchain`] and [`index::PackageIndex`] traits.

pub mod config;
pub mod consts;
pub mod derive;
pub mod descriptor;
pub mod index;
pub mod options;
pub mod platform;
pub mod profile;
pub mod requirements;
pub mod run;
pub mod toolchain;
pub mod util;
