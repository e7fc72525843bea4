//! # Stagehand
//!
//! Deployment-profile settings for web services.
//!
//! Stagehand packages the configuration layer of a web project: a shared
//! baseline record specialized per deployment target (local or staging) with
//! environment-variable overrides, plus the startup wiring that makes the
//! project's task-queue application available as soon as the process
//! initializes.
//!
//! ## Feature Flags
//!
//! - `tasks` (default) - task-queue startup wiring via `stagehand-tasks`
//!
//! ## Quick Example
//!
//! ```
//! use stagehand::{Profile, Settings};
//!
//! let settings = Settings::for_profile(Profile::from_env(), "/srv/app");
//! assert!(settings.databases.contains_key("default"));
//! ```
//!
//! The full startup path layers an optional dotenv file underneath the live
//! environment and touches the task application so it is registered before
//! any request or worker code runs:
//!
//! ```no_run
//! use stagehand::Profile;
//!
//! let settings = stagehand::init(Profile::Staging, "/srv/app").unwrap();
//! assert_eq!(settings.profile, Profile::Staging);
//! ```

use std::path::PathBuf;

pub use stagehand_conf as conf;
pub use stagehand_conf::{
	DatabaseConfig, Env, EnvError, EnvLoader, LoggingSettings, Profile, Settings, SettingsError,
};

#[cfg(feature = "tasks")]
pub use stagehand_tasks as tasks;
#[cfg(feature = "tasks")]
pub use stagehand_tasks::TaskApp;

/// Name under which the project's task application registers
#[cfg(feature = "tasks")]
pub const TASK_APP_NAME: &str = "stagehand";

/// The process-wide task application
///
/// Initialized from the environment on first access and registered for the
/// life of the process, so task producers can rely on it existing whenever
/// the crate has been initialized.
#[cfg(feature = "tasks")]
pub fn task_app() -> &'static TaskApp {
	stagehand_tasks::get_or_register_with(|| TaskApp::from_env(TASK_APP_NAME))
}

/// Initialize the project for `profile`
///
/// Loads the profile's dotenv file if present (never overwriting live
/// environment variables), resolves the settings record, and touches the
/// task application. Returns the settings; the only error source is a
/// malformed dotenv file.
pub fn init(profile: Profile, base_dir: impl Into<PathBuf>) -> Result<Settings, EnvError> {
	EnvLoader::new().for_profile(profile).load_optional()?;
	let settings = Settings::for_profile(profile, base_dir);

	#[cfg(feature = "tasks")]
	{
		let app = task_app();
		tracing::debug!(app = %app.name(), broker = %app.broker_url(), "task application ready");
	}

	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_init_produces_populated_record() {
		let settings = init(Profile::Local, "/srv/app").unwrap();
		assert_eq!(settings.profile, Profile::Local);
		assert!(settings.databases.contains_key("default"));
		assert!(!settings.middleware.is_empty());
	}

	#[cfg(feature = "tasks")]
	#[test]
	#[serial]
	fn test_task_app_is_stable_across_calls() {
		let first = task_app();
		let second = task_app();
		assert_eq!(first.name(), TASK_APP_NAME);
		assert!(std::ptr::eq(first, second));
	}
}
