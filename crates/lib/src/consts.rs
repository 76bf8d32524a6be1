//! Crate-wide constants.

/// Application name used for data directories.
pub const APP_NAME: &str = "scythe-recipe";

/// Environment variable overriding the package index root.
pub const INDEX_ENV_VAR: &str = "SCYTHE_RECIPE_INDEX";

/// Length of the truncated package id hash.
pub const PACKAGE_ID_LEN: usize = 20;

/// Option toggling position independent code.
pub const OPT_FPIC: &str = "fPIC";

/// Option selecting a shared library build.
pub const OPT_SHARED: &str = "shared";

/// Option enabling the OpenGL rendering backend (v1 only).
pub const OPT_OPENGL: &str = "OpenGL";
