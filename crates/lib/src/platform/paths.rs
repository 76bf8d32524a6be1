use std::path::PathBuf;

use crate::consts::{APP_NAME, INDEX_ENV_VAR};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var("USERPROFILE").ok().map(PathBuf::from)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var("HOME").ok().map(PathBuf::from)
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> Option<PathBuf> {
  std::env::var("APPDATA")
    .ok()
    .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> Option<PathBuf> {
  let data_home = match std::env::var("XDG_DATA_HOME") {
    Ok(dir) => PathBuf::from(dir),
    Err(_) => home_dir()?.join(".local").join("share"),
  };
  Some(data_home.join(APP_NAME))
}

/// Returns the root of the local package index.
///
/// `SCYTHE_RECIPE_INDEX` wins over the data directory.
pub fn index_dir() -> Option<PathBuf> {
  if let Ok(dir) = std::env::var(INDEX_ENV_VAR) {
    return Some(PathBuf::from(dir));
  }
  data_dir().map(|dir| dir.join("index"))
}

#[cfg(test)]
#[cfg(not(windows))]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn index_env_var_takes_precedence() {
    temp_env::with_vars(
      [
        (INDEX_ENV_VAR, Some("/custom/index")),
        ("XDG_DATA_HOME", Some("/custom/data")),
      ],
      || {
        assert_eq!(index_dir(), Some(PathBuf::from("/custom/index")));
      },
    );
  }

  #[test]
  #[serial]
  fn index_falls_back_to_xdg_data_home() {
    temp_env::with_vars(
      [(INDEX_ENV_VAR, None::<&str>), ("XDG_DATA_HOME", Some("/custom/data"))],
      || {
        assert_eq!(
          index_dir(),
          Some(PathBuf::from("/custom/data").join(APP_NAME).join("index"))
        );
      },
    );
  }

  #[test]
  #[serial]
  fn xdg_fallback_to_home_directories() {
    temp_env::with_vars(
      [
        (INDEX_ENV_VAR, None::<&str>),
        ("XDG_DATA_HOME", None::<&str>),
        ("HOME", Some("/home/user")),
      ],
      || {
        assert_eq!(data_dir(), Some(PathBuf::from("/home/user/.local/share").join(APP_NAME)));
      },
    );
  }
}
