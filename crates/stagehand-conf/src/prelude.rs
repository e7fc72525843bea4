//! Convenience re-exports for settings consumers

pub use crate::env::{Env, EnvError};
pub use crate::env_loader::EnvLoader;
pub use crate::profile::Profile;
pub use crate::{DatabaseConfig, LoggingSettings, Settings, SettingsError};
