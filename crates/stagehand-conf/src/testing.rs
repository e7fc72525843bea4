//! Testing utilities for settings
//!
//! Helpers for tests that manipulate the process environment. Combine with
//! `#[serial]` from the `serial_test` crate: the environment is process-wide,
//! so concurrent tests would race.

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tempfile::TempDir;

/// Scoped environment for a single test
///
/// Records the original value of every variable it touches and restores the
/// environment on drop, so one test's overrides cannot leak into the next.
///
/// # Examples
///
/// ```
/// use stagehand_conf::testing::TestEnv;
///
/// let mut test_env = TestEnv::new().unwrap();
/// test_env.set_var("TESTENV_DOC_KEY", "value");
/// assert_eq!(std::env::var("TESTENV_DOC_KEY").unwrap(), "value");
/// drop(test_env);
/// assert!(std::env::var("TESTENV_DOC_KEY").is_err());
/// ```
pub struct TestEnv {
	temp_dir: TempDir,
	original_env: HashMap<String, Option<String>>,
}

impl TestEnv {
	/// Create a new test environment with a private temporary directory
	pub fn new() -> std::io::Result<Self> {
		Ok(Self {
			temp_dir: TempDir::new()?,
			original_env: HashMap::new(),
		})
	}
	/// Path of the temporary directory, removed on drop
	pub fn path(&self) -> &Path {
		self.temp_dir.path()
	}
	/// Set an environment variable, remembering its original value
	pub fn set_var(&mut self, key: &str, value: &str) {
		self.remember(key);
		// SAFETY: Mutating the environment is unsafe in multi-threaded programs.
		// Callers serialize access via #[serial].
		unsafe {
			env::set_var(key, value);
		}
	}
	/// Remove an environment variable, remembering its original value
	pub fn remove_var(&mut self, key: &str) {
		self.remember(key);
		// SAFETY: Mutating the environment is unsafe in multi-threaded programs.
		// Callers serialize access via #[serial].
		unsafe {
			env::remove_var(key);
		}
	}

	fn remember(&mut self, key: &str) {
		self.original_env
			.entry(key.to_string())
			.or_insert_with(|| env::var(key).ok());
	}
}

impl Drop for TestEnv {
	fn drop(&mut self) {
		for (key, original) in self.original_env.drain() {
			match original {
				// SAFETY: Mutating the environment is unsafe in multi-threaded programs.
				// Callers serialize access via #[serial].
				Some(value) => unsafe { env::set_var(&key, value) },
				// SAFETY: As above; restoration happens under the same #[serial] guard.
				None => unsafe { env::remove_var(&key) },
			}
		}
	}
}
