//! # Stagehand Settings
//!
//! Environment-profile settings for web services.
//!
//! A settings record starts from a shared baseline and is specialized for a
//! deployment profile (local or staging) by overriding specific fields from
//! the process environment, falling back to literal defaults when a variable
//! is absent. Resolution is a single linear pass at startup: the record is
//! built once and treated as read-only for the life of the process.
//!
//! Loading never fails. Missing variables fall back to defaults, flags are
//! resolved by strict string comparison, and structured values such as the
//! database port stay raw strings so that malformed input surfaces in the
//! component that consumes it, not here.
//!
//! ## Quick Start
//!
//! ```
//! use stagehand_conf::{Profile, Settings};
//!
//! let settings = Settings::for_profile(Profile::Local, "/srv/app");
//! assert_eq!(settings.profile, Profile::Local);
//! assert!(settings.databases.contains_key("default"));
//! ```
//!
//! ## Module Organization
//!
//! - [`env`]: typed environment variable reads with fallback defaults
//! - [`env_loader`]: optional `.env` file layering
//! - [`parse`]: raw-value parsers (strict flags, comma lists)
//! - [`profile`]: deployment profile selection
//! - [`testing`]: scoped-environment helpers for tests

pub mod env;
pub mod env_loader;
pub mod parse;
pub mod prelude;
pub mod profile;
pub mod testing;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use env::{Env, EnvError};
pub use env_loader::EnvLoader;
pub use profile::Profile;

/// Database engine selector for PostgreSQL backends
pub const POSTGRES_ENGINE: &str = "stagehand.db.backends.postgresql";

/// Secret keys that ship as placeholders and must not reach production
const INSECURE_SECRET_KEYS: &[&str] = &[
	"insecure-development-key",
	"staging-secret-key-change-this",
];

/// Settings record for one deployment profile
///
/// Every field has a well-defined default, so the record is fully populated
/// even when the environment supplies nothing. Construct it through
/// [`Settings::for_profile`] (or [`Settings::local`] / [`Settings::staging`])
/// once during startup and pass it by reference to consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	/// Base directory of the project; filesystem roots are derived from it
	pub base_dir: PathBuf,

	/// Deployment profile that produced this record
	pub profile: Profile,

	/// Secret key for cryptographic signing (keep secret outside development!)
	pub secret_key: String,

	/// Debug mode; resolved by strict comparison against the literal `"True"`
	pub debug: bool,

	/// Host/domain names this deployment serves, order preserved
	pub allowed_hosts: Vec<String>,

	/// Installed application selectors
	pub installed_apps: Vec<String>,

	/// Middleware chain, order-significant
	pub middleware: Vec<String>,

	/// Database configurations keyed by alias; loaders populate `"default"`
	pub databases: HashMap<String, DatabaseConfig>,

	/// Static files URL prefix
	pub static_url: String,

	/// Static files collection root
	pub static_root: Option<PathBuf>,

	/// Media files URL prefix
	pub media_url: String,

	/// Media files storage root
	pub media_root: Option<PathBuf>,

	/// Only send session cookies over HTTPS
	pub session_cookie_secure: bool,

	/// Only send the CSRF cookie over HTTPS
	pub csrf_cookie_secure: bool,

	/// Ask browsers to enable their reflective XSS filter
	pub secure_browser_xss_filter: bool,

	/// Value of the `X-Frame-Options` response header
	pub x_frame_options: String,

	/// Static file storage backend selector
	pub staticfiles_storage: String,

	/// Outbound email backend selector (`"smtp"`, `"console"`, ...)
	pub email_backend: String,

	/// Language code
	pub language_code: String,

	/// Time zone
	pub time_zone: String,

	/// Use timezone-aware datetimes
	pub use_tz: bool,

	/// Logging configuration for consumers that set up a subscriber
	pub logging: LoggingSettings,
}

impl Settings {
	/// Shared baseline every profile layers on
	///
	/// Holds the defaults common to all deployments: the middleware chain,
	/// installed apps, URL prefixes, and conservative security flags. The
	/// profile loaders override fields on top of this; `databases` starts
	/// empty and is populated by the loaders.
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::Settings;
	///
	/// let settings = Settings::base("/srv/app");
	/// assert!(!settings.debug);
	/// assert_eq!(settings.static_url, "/static/");
	/// assert_eq!(settings.middleware[0], "stagehand.middleware.security.SecurityMiddleware");
	/// ```
	pub fn base(base_dir: impl Into<PathBuf>) -> Self {
		Self {
			base_dir: base_dir.into(),
			profile: Profile::Local,
			secret_key: "insecure-development-key".to_string(),
			debug: false,
			allowed_hosts: vec![],
			installed_apps: vec![
				"stagehand.contrib.admin".to_string(),
				"stagehand.contrib.auth".to_string(),
				"stagehand.contrib.contenttypes".to_string(),
				"stagehand.contrib.sessions".to_string(),
				"stagehand.contrib.messages".to_string(),
				"stagehand.contrib.staticfiles".to_string(),
			],
			middleware: vec![
				"stagehand.middleware.security.SecurityMiddleware".to_string(),
				"stagehand.middleware.sessions.SessionMiddleware".to_string(),
				"stagehand.middleware.common.CommonMiddleware".to_string(),
				"stagehand.middleware.csrf.CsrfViewMiddleware".to_string(),
				"stagehand.middleware.auth.AuthenticationMiddleware".to_string(),
				"stagehand.middleware.messages.MessageMiddleware".to_string(),
				"stagehand.middleware.clickjacking.XFrameOptionsMiddleware".to_string(),
			],
			databases: HashMap::new(),
			static_url: "/static/".to_string(),
			static_root: None,
			media_url: "/media/".to_string(),
			media_root: None,
			session_cookie_secure: false,
			csrf_cookie_secure: false,
			secure_browser_xss_filter: false,
			x_frame_options: "SAMEORIGIN".to_string(),
			staticfiles_storage: "stagehand.staticfiles.storage.StaticFilesStorage".to_string(),
			email_backend: "smtp".to_string(),
			language_code: "en-us".to_string(),
			time_zone: "UTC".to_string(),
			use_tz: true,
			logging: LoggingSettings::default(),
		}
	}
	/// Settings for a developer workstation
	///
	/// Layered on [`Settings::base`]:
	///
	/// - `SECRET_KEY`, default `"insecure-development-key"`
	/// - `DEBUG`, strict `== "True"`, default off
	/// - fixed host list: `localhost`, `127.0.0.1`, `0.0.0.0`
	/// - `default` database from `POSTGRES_*`, defaults `db_local` /
	///   `postgres_user` / `postgres_password` / `db` / `5432`
	/// - console email backend
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::{Profile, Settings};
	///
	/// let settings = Settings::local("/srv/app");
	/// assert_eq!(settings.profile, Profile::Local);
	/// assert_eq!(settings.allowed_hosts, vec!["localhost", "127.0.0.1", "0.0.0.0"]);
	/// assert_eq!(settings.email_backend, "console");
	/// ```
	pub fn local(base_dir: impl Into<PathBuf>) -> Self {
		let env = Env::new();
		let mut settings = Self::base(base_dir);
		settings.profile = Profile::Local;

		settings.secret_key = env.str_or("SECRET_KEY", "insecure-development-key");
		settings.debug = env.bool_strict_or("DEBUG", "False");

		settings.allowed_hosts = vec![
			"localhost".to_string(),
			"127.0.0.1".to_string(),
			"0.0.0.0".to_string(),
		];

		settings.databases.insert(
			"default".to_string(),
			DatabaseConfig::postgres(
				env.str_or("POSTGRES_DB", "db_local"),
				env.str_or("POSTGRES_USER", "postgres_user"),
				env.str_or("POSTGRES_PASSWORD", "postgres_password"),
				env.str_or("POSTGRES_HOST", "db"),
				env.str_or("POSTGRES_PORT", "5432"),
			),
		);

		settings.email_backend = "console".to_string();

		debug!(profile = %settings.profile, debug = settings.debug, "resolved settings");
		settings
	}
	/// Settings for the staging deployment
	///
	/// Layered on [`Settings::base`], in order: secret/debug resolution, host
	/// list, database parameters, static/media roots under `base_dir`,
	/// moderate security flags, the static-file serving middleware inserted
	/// immediately after the security middleware, the compressed-manifest
	/// storage backend, and the console email backend.
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::{Profile, Settings};
	///
	/// let settings = Settings::staging("/srv/app");
	/// assert_eq!(settings.profile, Profile::Staging);
	/// assert_eq!(settings.middleware[1], "whitenoise.middleware.WhiteNoiseMiddleware");
	/// assert_eq!(
	///     settings.staticfiles_storage,
	///     "whitenoise.storage.CompressedManifestStaticFilesStorage"
	/// );
	/// ```
	pub fn staging(base_dir: impl Into<PathBuf>) -> Self {
		let env = Env::new();
		let mut settings = Self::base(base_dir);
		settings.profile = Profile::Staging;

		settings.secret_key = env.str_or("SECRET_KEY", "staging-secret-key-change-this");
		settings.debug = env.bool_strict_or("DEBUG", "False");

		settings.allowed_hosts =
			env.list_or("ALLOWED_HOSTS", "staging.mydomain.com,localhost,127.0.0.1");

		settings.databases.insert(
			"default".to_string(),
			DatabaseConfig::postgres(
				env.str_or("POSTGRES_DB", "db_staging"),
				env.str_or("POSTGRES_USER", "postgres_user"),
				env.str_or("POSTGRES_PASSWORD", "postgres_password_staging"),
				env.str_or("POSTGRES_HOST", "db"),
				env.str_or("POSTGRES_PORT", "5432"),
			),
		);

		settings.static_url = "/static/".to_string();
		settings.static_root = Some(settings.base_dir.join("static"));
		settings.media_url = "/media/".to_string();
		settings.media_root = Some(settings.base_dir.join("media"));

		// Moderate security tier: cookies stay usable over plain HTTP
		settings.session_cookie_secure = false;
		settings.csrf_cookie_secure = false;
		settings.secure_browser_xss_filter = true;
		settings.x_frame_options = "DENY".to_string();

		settings.middleware.insert(
			1,
			"whitenoise.middleware.WhiteNoiseMiddleware".to_string(),
		);
		settings.staticfiles_storage =
			"whitenoise.storage.CompressedManifestStaticFilesStorage".to_string();

		settings.email_backend = "console".to_string();

		debug!(profile = %settings.profile, debug = settings.debug, "resolved settings");
		settings
	}
	/// Build the settings record for `profile`
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::{Profile, Settings};
	///
	/// let settings = Settings::for_profile(Profile::Staging, "/srv/app");
	/// assert_eq!(settings, Settings::staging("/srv/app"));
	/// ```
	pub fn for_profile(profile: Profile, base_dir: impl Into<PathBuf>) -> Self {
		match profile {
			Profile::Local => Self::local(base_dir),
			Profile::Staging => Self::staging(base_dir),
		}
	}
	/// Load a complete settings record from a TOML or JSON file
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		let settings: Settings = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => toml::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?,
			Some("json") => serde_json::from_str(&contents)
				.map_err(|e| SettingsError::ParseError(format!("JSON parse error: {}", e)))?,
			_ => {
				return Err(SettingsError::UnsupportedFormat(
					"Supported formats: .toml, .json".to_string(),
				));
			}
		};

		Ok(settings)
	}
	/// Opt-in sanity checks for records headed to shared deployments
	///
	/// Never invoked by the loaders: loading always succeeds, and whether an
	/// insecure record may start the process is the caller's decision.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if INSECURE_SECRET_KEYS.contains(&self.secret_key.as_str()) && !self.debug {
			return Err(SettingsError::ValidationError(
				"SECRET_KEY is a placeholder and must be changed".to_string(),
			));
		}

		if self.allowed_hosts.is_empty() && !self.debug {
			return Err(SettingsError::ValidationError(
				"ALLOWED_HOSTS must not be empty outside debug mode".to_string(),
			));
		}

		Ok(())
	}
}

/// Database connection parameters
///
/// All fields are raw strings, the port included: the loader's contract is to
/// carry environment values through untouched and let the connecting
/// component report malformed input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
	/// Database engine selector
	pub engine: String,

	/// Database name
	pub name: String,

	/// Connection user
	pub user: String,

	/// Connection password
	pub password: String,

	/// Database host
	pub host: String,

	/// Database port, kept raw
	pub port: String,
}

impl DatabaseConfig {
	/// PostgreSQL connection parameters
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::{DatabaseConfig, POSTGRES_ENGINE};
	///
	/// let db = DatabaseConfig::postgres("mydb", "admin", "hunter2", "db", "5432");
	/// assert_eq!(db.engine, POSTGRES_ENGINE);
	/// assert_eq!(db.port, "5432");
	/// ```
	pub fn postgres(
		name: impl Into<String>,
		user: impl Into<String>,
		password: impl Into<String>,
		host: impl Into<String>,
		port: impl Into<String>,
	) -> Self {
		Self {
			engine: POSTGRES_ENGINE.to_string(),
			name: name.into(),
			user: user.into(),
			password: password.into(),
			host: host.into(),
			port: port.into(),
		}
	}
}

/// Logging configuration carried by the settings record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
	/// Log level filter ("trace" through "error")
	pub level: String,

	/// Output format ("text" or "json")
	pub format: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: "text".to_string(),
		}
	}
}

/// Settings errors for the file-backed and validation paths
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_base_is_fully_populated() {
		let settings = Settings::base("/srv/app");
		assert_eq!(settings.base_dir, PathBuf::from("/srv/app"));
		assert!(!settings.middleware.is_empty());
		assert!(!settings.installed_apps.is_empty());
		assert_eq!(settings.language_code, "en-us");
		assert_eq!(settings.time_zone, "UTC");
		assert_eq!(settings.logging, LoggingSettings::default());
	}

	#[test]
	fn test_database_config_postgres() {
		let db = DatabaseConfig::postgres("testdb", "user", "pass", "localhost", "5432");
		assert_eq!(db.engine, POSTGRES_ENGINE);
		assert_eq!(db.name, "testdb");
		assert_eq!(db.user, "user");
		assert_eq!(db.port, "5432");
	}

	#[test]
	fn test_database_port_stays_raw() {
		let db = DatabaseConfig::postgres("d", "u", "p", "h", "not-a-number");
		assert_eq!(db.port, "not-a-number");
	}

	#[test]
	fn test_settings_json_round_trip() {
		let settings = Settings::base("/srv/app");
		let json = serde_json::to_string(&settings).unwrap();
		let restored: Settings = serde_json::from_str(&json).unwrap();
		assert_eq!(restored, settings);
	}

	#[test]
	fn test_validate_rejects_placeholder_key() {
		let settings = Settings::base("/srv/app");
		assert!(settings.validate().is_err());
	}

	#[test]
	fn test_validate_accepts_configured_record() {
		let mut settings = Settings::base("/srv/app");
		settings.secret_key = "a".repeat(50);
		settings.allowed_hosts = vec!["example.com".to_string()];
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_validate_is_skipped_in_debug() {
		let mut settings = Settings::base("/srv/app");
		settings.debug = true;
		assert!(settings.validate().is_ok());
	}
}
