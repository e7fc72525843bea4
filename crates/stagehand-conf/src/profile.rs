//! Deployment profiles
//!
//! A profile names a deployment target. Each profile has its own settings
//! loader layering environment overrides on the shared baseline; see
//! [`Settings::for_profile`](crate::Settings::for_profile).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::env::Env;

/// Deployment target for a settings record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
	/// Developer workstation: fixed hosts, permissive defaults
	Local,
	/// Staging deployment: env-driven hosts, static file pipeline enabled
	Staging,
}

impl Profile {
	/// Canonical lowercase name
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::Profile;
	///
	/// assert_eq!(Profile::Local.as_str(), "local");
	/// assert_eq!(Profile::Staging.as_str(), "staging");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			Profile::Local => "local",
			Profile::Staging => "staging",
		}
	}
	/// Conventional dotenv file name for this profile
	///
	/// # Examples
	///
	/// ```
	/// use stagehand_conf::Profile;
	///
	/// assert_eq!(Profile::Staging.env_file_name(), ".env.staging");
	/// ```
	pub fn env_file_name(&self) -> String {
		format!(".env.{}", self.as_str())
	}
	/// Resolve the active profile from `STAGEHAND_PROFILE`
	///
	/// Unset or unrecognized values resolve to [`Profile::Local`]: profile
	/// selection follows the same silent-fallback contract as every other
	/// environment read in this crate.
	pub fn from_env() -> Self {
		let env = Env::new().with_prefix("STAGEHAND_");
		match env.str("PROFILE") {
			Ok(raw) => raw.parse().unwrap_or(Profile::Local),
			Err(_) => Profile::Local,
		}
	}
}

impl fmt::Display for Profile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Profile {
	type Err = UnknownProfileError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"local" => Ok(Profile::Local),
			"staging" => Ok(Profile::Staging),
			other => Err(UnknownProfileError {
				name: other.to_string(),
			}),
		}
	}
}

/// Error returned when parsing an unrecognized profile name
#[derive(Debug, thiserror::Error)]
#[error("Unknown profile '{name}', expected one of: local, staging")]
pub struct UnknownProfileError {
	/// The rejected profile name
	pub name: String,
}
