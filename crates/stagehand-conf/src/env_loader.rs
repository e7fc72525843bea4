//! Optional `.env` file loading
//!
//! Loads dotenv files into the process environment before settings
//! resolution. Variables already present in the environment win: the file
//! layer sits between live environment variables and the baked-in defaults.
//! A missing file is not an error.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::EnvError;
use crate::profile::Profile;

/// Loader for `.env` / `.env.<profile>` files
///
/// # Examples
///
/// ```
/// use stagehand_conf::{EnvLoader, Profile};
///
/// let loaded = EnvLoader::new()
///     .for_profile(Profile::Staging)
///     .load_optional()
///     .unwrap();
/// // No .env.staging in the working directory: nothing was loaded
/// assert!(!loaded);
/// ```
#[derive(Debug, Clone)]
pub struct EnvLoader {
	path: PathBuf,
}

impl EnvLoader {
	/// Create a loader targeting `.env` in the working directory
	pub fn new() -> Self {
		Self {
			path: PathBuf::from(".env"),
		}
	}
	/// Target a specific dotenv file
	pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = path.into();
		self
	}
	/// Target the dotenv file conventionally paired with `profile`
	pub fn for_profile(mut self, profile: Profile) -> Self {
		self.path = PathBuf::from(profile.env_file_name());
		self
	}
	/// Load the file if it exists; returns whether anything was loaded
	///
	/// Variables already set in the process environment are left untouched.
	pub fn load_optional(&self) -> Result<bool, EnvError> {
		if !self.path.exists() {
			return Ok(false);
		}

		dotenv::from_path(&self.path).map_err(|e| match e {
			dotenv::Error::Io(io) => EnvError::IoError(io),
			other => EnvError::InvalidFormat(format!(
				"failed to parse {}: {}",
				self.path.display(),
				other
			)),
		})?;

		debug!(path = %self.path.display(), "loaded dotenv file");
		Ok(true)
	}
	/// The file this loader targets
	pub fn target(&self) -> &Path {
		&self.path
	}
}

impl Default for EnvLoader {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;
	use std::fs;
	use std::io::Write;
	use tempfile::TempDir;

	#[test]
	fn test_missing_file_is_not_an_error() {
		let loader = EnvLoader::new().path("/nonexistent/.env.absent");
		assert!(!loader.load_optional().unwrap());
	}

	#[test]
	#[serial]
	fn test_load_does_not_overwrite_existing_vars() {
		let temp_dir = TempDir::new().unwrap();
		let dotenv_path = temp_dir.path().join(".env");
		let mut file = fs::File::create(&dotenv_path).unwrap();
		writeln!(file, "TEST_LOADER_KEPT=from_file").unwrap();
		writeln!(file, "TEST_LOADER_NEW=from_file").unwrap();

		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::set_var("TEST_LOADER_KEPT", "from_env");
		}

		let loaded = EnvLoader::new().path(&dotenv_path).load_optional().unwrap();
		assert!(loaded);
		assert_eq!(std::env::var("TEST_LOADER_KEPT").unwrap(), "from_env");
		assert_eq!(std::env::var("TEST_LOADER_NEW").unwrap(), "from_file");

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::remove_var("TEST_LOADER_KEPT");
			std::env::remove_var("TEST_LOADER_NEW");
		}
	}

	#[test]
	fn test_profile_file_names() {
		assert_eq!(
			EnvLoader::new().for_profile(Profile::Local).target(),
			Path::new(".env.local")
		);
		assert_eq!(
			EnvLoader::new().for_profile(Profile::Staging).target(),
			Path::new(".env.staging")
		);
	}
}
