//! # Stagehand Tasks
//!
//! Task-queue application handle for stagehand projects.
//!
//! This crate provides the project-facing end of a task queue: a named
//! [`TaskApp`] carrying the broker and result-backend endpoints, and a
//! process-wide registry with populate-once semantics so the handle is
//! created during startup and shared read-only afterwards. Message
//! transport and worker execution live behind the broker endpoint and are
//! out of scope here.
//!
//! ## Quick Start
//!
//! ```
//! use stagehand_tasks::TaskApp;
//!
//! let app = TaskApp::from_env("myproject");
//! assert_eq!(app.name(), "myproject");
//! ```

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use stagehand_conf::Env;
use tracing::debug;

/// Broker endpoint used when `BROKER_URL` is unset
pub const DEFAULT_BROKER_URL: &str = "redis://localhost:6379/0";

/// Task-queue application handle
///
/// Carries the endpoints the queue client needs; no connection is attempted
/// at construction time. Missing environment variables fall back to defaults
/// the same way settings resolution does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskApp {
	name: String,
	broker_url: String,
	result_backend: String,
}

impl TaskApp {
	/// Create a handle with default endpoints
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_tasks::{DEFAULT_BROKER_URL, TaskApp};
	///
	/// let app = TaskApp::new("myproject");
	/// assert_eq!(app.broker_url(), DEFAULT_BROKER_URL);
	/// assert_eq!(app.result_backend(), DEFAULT_BROKER_URL);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			broker_url: DEFAULT_BROKER_URL.to_string(),
			result_backend: DEFAULT_BROKER_URL.to_string(),
		}
	}
	/// Create a handle with endpoints resolved from the environment
	///
	/// Reads `BROKER_URL` (default [`DEFAULT_BROKER_URL`]) and
	/// `RESULT_BACKEND` (default: the resolved broker endpoint).
	pub fn from_env(name: impl Into<String>) -> Self {
		let env = Env::new();
		let broker_url = env.str_or("BROKER_URL", DEFAULT_BROKER_URL);
		let result_backend = env.str_or("RESULT_BACKEND", &broker_url);
		Self {
			name: name.into(),
			broker_url,
			result_backend,
		}
	}
	/// Application name
	pub fn name(&self) -> &str {
		&self.name
	}
	/// Broker endpoint
	pub fn broker_url(&self) -> &str {
		&self.broker_url
	}
	/// Result-backend endpoint
	pub fn result_backend(&self) -> &str {
		&self.result_backend
	}
}

static REGISTERED: OnceLock<TaskApp> = OnceLock::new();

/// Register the process-wide task application
///
/// The registry is populate-once: a second registration is an error, and the
/// stored handle stays valid for the life of the process.
pub fn register(app: TaskApp) -> Result<(), TaskAppError> {
	let name = app.name().to_string();
	REGISTERED
		.set(app)
		.map_err(|_| TaskAppError::AlreadyRegistered)?;
	debug!(app = %name, "registered task application");
	Ok(())
}

/// The registered task application, if any
pub fn registered() -> Option<&'static TaskApp> {
	REGISTERED.get()
}

/// Return the registered application, creating it with `init` on first use
///
/// This is the startup path: the first caller populates the registry, every
/// later caller gets the same handle.
pub fn get_or_register_with(init: impl FnOnce() -> TaskApp) -> &'static TaskApp {
	REGISTERED.get_or_init(init)
}

/// Task application errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TaskAppError {
	#[error("A task application is already registered for this process")]
	AlreadyRegistered,
}
