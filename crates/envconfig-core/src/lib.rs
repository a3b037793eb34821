//! Typed access to the `OLLAMA_*` process environment.
//!
//! Every setting has a compiled-in default and its own parsing rule. Two ways in:
//!
//! - [`EnvConfig`]: snapshot read once at startup, refreshed with [`EnvConfig::reload`].
//! - the setting constants in [`config`] (e.g. [`config::KEEP_ALIVE`]): re-read the
//!   live environment on every `get()`.
//!
//! [`EnvConfig::vars`] and [`EnvConfig::describe`] expose the registry for help text.

pub mod config;
pub mod env;
pub mod error;
pub mod platform;

#[cfg(any(test, feature = "test-support"))]
pub mod test_log;

pub use config::{
    describe, host, models, origins, var, vars, EnvConfig, HostUrl, ProxyVars, Setting,
    SettingValue,
};
#[cfg(any(test, feature = "test-support"))]
pub use env::InMemoryEnv;
pub use env::{ReadEnv, SystemEnv};
pub use error::{EnvConfigError, Result};
pub use platform::{lib_dir, lib_relative_to_exe, Platform, PlatformCapabilities};
