//! Environment variable access
//!
//! Provides typed reads from the process environment with literal fallback
//! defaults. Reads that carry a default are infallible: a missing variable
//! resolves to the default, and an invalid variable name resolves to the
//! default rather than panicking inside `std::env`. Reads without a default
//! surface [`EnvError::MissingVariable`].

use std::env;
use std::path::PathBuf;

use crate::parse::{parse_bool_strict, parse_list};

/// Environment variable reader with optional name prefix
#[derive(Debug, Clone, Default)]
pub struct Env {
	/// Optional prefix prepended to every lookup (e.g. `"STAGEHAND_"`)
	prefix: Option<String>,
}

impl Env {
	/// Create a new reader without a prefix
	pub fn new() -> Self {
		Self { prefix: None }
	}
	/// Set a prefix for all environment variable lookups
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::Env;
	///
	/// let env = Env::new().with_prefix("STAGEHAND_");
	/// // env.str("PROFILE") now reads STAGEHAND_PROFILE
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	fn full_key(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	fn raw(&self, key: &str) -> Result<Option<String>, EnvError> {
		let full_key = self.full_key(key);
		validate_env_var_name(&full_key)?;
		Ok(env::var(&full_key).ok())
	}
	/// Read a string value; missing variable is an error
	pub fn str(&self, key: &str) -> Result<String, EnvError> {
		self.raw(key)?
			.ok_or_else(|| EnvError::MissingVariable(self.full_key(key)))
	}
	/// Read a string value, falling back to `default` when unset
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::Env;
	///
	/// let env = Env::new();
	/// assert_eq!(env.str_or("STAGEHAND_ABSENT", "fallback"), "fallback");
	/// ```
	pub fn str_or(&self, key: &str, default: &str) -> String {
		self.raw(key)
			.unwrap_or(None)
			.unwrap_or_else(|| default.to_string())
	}
	/// Read a flag via strict comparison against the literal `"True"`
	///
	/// The default is supplied in raw form and goes through the same
	/// comparison, so `bool_strict_or("DEBUG", "False")` resolves to `false`
	/// when the variable is unset. See
	/// [`parse_bool_strict`](crate::parse::parse_bool_strict) for the exact
	/// contract.
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::Env;
	///
	/// let env = Env::new();
	/// assert!(!env.bool_strict_or("STAGEHAND_ABSENT_FLAG", "False"));
	/// assert!(env.bool_strict_or("STAGEHAND_ABSENT_FLAG", "True"));
	/// ```
	pub fn bool_strict_or(&self, key: &str, default_raw: &str) -> bool {
		let raw = self.str_or(key, default_raw);
		parse_bool_strict(&raw)
	}
	/// Read a comma-separated list, falling back to `default_raw` when unset
	///
	/// The default is supplied in raw comma-separated form and goes through
	/// the same split, so defaults and live values cannot diverge in shape.
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::Env;
	///
	/// let env = Env::new();
	/// let hosts = env.list_or("STAGEHAND_ABSENT_HOSTS", "localhost,127.0.0.1");
	/// assert_eq!(hosts, vec!["localhost", "127.0.0.1"]);
	/// ```
	pub fn list_or(&self, key: &str, default_raw: &str) -> Vec<String> {
		let raw = self.str_or(key, default_raw);
		parse_list(&raw)
	}
	/// Read a list value; missing variable is an error
	pub fn list(&self, key: &str) -> Result<Vec<String>, EnvError> {
		Ok(parse_list(&self.str(key)?))
	}
	/// Read a path value, falling back to `default` when unset
	pub fn path_or(&self, key: &str, default: impl Into<PathBuf>) -> PathBuf {
		match self.raw(key).unwrap_or(None) {
			Some(val) => PathBuf::from(val),
			None => default.into(),
		}
	}
}

/// Validates an environment variable name.
///
/// Rejects names that are empty, contain control characters, or contain the
/// `=` character (the key-value separator).
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	if name.is_empty() {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not be empty".to_string(),
		});
	}

	if let Some(pos) = name.find(|c: char| c.is_control()) {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: format!(
				"environment variable name contains control character at position {}",
				pos
			),
		});
	}

	if name.contains('=') {
		return Err(EnvError::InvalidVariableName {
			name: name.to_string(),
			reason: "environment variable name must not contain '='".to_string(),
		});
	}

	Ok(())
}

/// Environment variable errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	#[error("Invalid format: {0}")]
	InvalidFormat(String),

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}
