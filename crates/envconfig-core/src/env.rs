//! Where environment values come from.
//!
//! | Source | Backing | Use |
//! |--------|---------|-----|
//! | [`SystemEnv`] | `std::env` + `dirs` | production |
//! | [`InMemoryEnv`] | `HashMap` | tests (`cfg(test)` or `"test-support"`) |
//!
//! Both are `Send + Sync`; nothing here ever writes to the process environment.

use std::env;
use std::path::PathBuf;

#[cfg(any(test, feature = "test-support"))]
use std::collections::HashMap;

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;

    /// Home directory of the current user, used for default paths.
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// Zero-sized type, delegates to `std::env` and `dirs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnv {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.vars.remove(key);
        self
    }

    pub fn set_home(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.home = Some(path.into());
        self
    }

    pub fn clear_home(&mut self) -> &mut Self {
        self.home = None;
        self
    }
}

#[cfg(any(test, feature = "test-support"))]
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ReadEnv for InMemoryEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}
