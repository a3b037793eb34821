//! 按类型分组的 setting 定义
//!
//! 每个常量绑定一个 key、一种解析方式和一个默认值；`get()` 每次都重新读取进程环境，
//! `get_from()` 读取任意 [`ReadEnv`]。需要一次性快照时用 [`EnvConfig`](super::EnvConfig)。

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::duration::parse_duration;
use super::env_keys::{self, gpu};
use super::loader::{parse_bool, parse_uint, var_from};
use crate::env::{ReadEnv, SystemEnv};
use crate::error::{EnvConfigError, Result};

// ─── Duration ───────────────────────────────────────────────────────────────

/// Duration read as a literal (`5m`, `1h30m`) or as whole seconds (`300`).
///
/// Negative values, and zero when `zero_is_infinite`, resolve to [`Duration::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSetting {
    key: &'static str,
    default: Duration,
    zero_is_infinite: bool,
}

impl DurationSetting {
    pub const fn new(key: &'static str, default: Duration, zero_is_infinite: bool) -> Self {
        Self {
            key,
            default,
            zero_is_infinite,
        }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub const fn default_value(&self) -> Duration {
        self.default
    }

    pub fn get(&self) -> Duration {
        self.get_from(&SystemEnv)
    }

    pub fn get_from<E: ReadEnv + ?Sized>(&self, env: &E) -> Duration {
        let s = var_from(env, self.key);
        let nanos: Option<i128> = if s.is_empty() {
            None
        } else if let Ok(n) = parse_duration(&s) {
            Some(i128::from(n))
        } else if let Ok(secs) = s.parse::<i64>() {
            Some(i128::from(secs) * 1_000_000_000)
        } else {
            None
        };

        match nanos {
            None => self.resolve(self.default),
            Some(n) if n < 0 => Duration::MAX,
            Some(n) => match u64::try_from(n) {
                Ok(n) => self.resolve(Duration::from_nanos(n)),
                // whole seconds beyond the nanosecond range
                Err(_) => Duration::MAX,
            },
        }
    }

    fn resolve(&self, d: Duration) -> Duration {
        if d.is_zero() && self.zero_is_infinite {
            Duration::MAX
        } else {
            d
        }
    }
}

// ─── Bool ───────────────────────────────────────────────────────────────────

/// Flag that is off when unset. A set value that is not a boolean literal counts as on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolSetting {
    key: &'static str,
}

impl BoolSetting {
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub fn get(&self) -> bool {
        self.get_from(&SystemEnv)
    }

    pub fn get_from<E: ReadEnv + ?Sized>(&self, env: &E) -> bool {
        let s = var_from(env, self.key);
        if s.is_empty() {
            return false;
        }
        parse_bool(&s).unwrap_or(true)
    }
}

// ─── String ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringSetting {
    key: &'static str,
}

impl StringSetting {
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub fn get(&self) -> String {
        self.get_from(&SystemEnv)
    }

    pub fn get_from<E: ReadEnv + ?Sized>(&self, env: &E) -> String {
        var_from(env, self.key)
    }
}

// ─── Unsigned integer ───────────────────────────────────────────────────────

/// Unsigned widths a [`UintSetting`] can produce.
pub trait UintValue: Copy + fmt::Display + sealed::Sealed {
    fn from_u64(n: u64) -> Option<Self>;
    fn to_u64(self) -> u64;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_uint_value {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl UintValue for $t {
                fn from_u64(n: u64) -> Option<Self> {
                    Self::try_from(n).ok()
                }

                fn to_u64(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_uint_value!(u16, u32, u64, usize);

/// Base-10 unsigned integer. Invalid or out-of-range values log a warning and use the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UintSetting<T> {
    key: &'static str,
    default: T,
}

impl<T: UintValue> UintSetting<T> {
    pub const fn new(key: &'static str, default: T) -> Self {
        Self { key, default }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub fn default_value(&self) -> T {
        self.default
    }

    pub fn get(&self) -> T {
        self.get_from(&SystemEnv)
    }

    pub fn get_from<E: ReadEnv + ?Sized>(&self, env: &E) -> T {
        let s = var_from(env, self.key);
        if s.is_empty() {
            return self.default;
        }
        match parse_uint(&s).and_then(T::from_u64) {
            Some(n) => n,
            None => {
                tracing::warn!(
                    key = self.key,
                    value = %s,
                    default = %self.default,
                    "invalid environment variable, using default"
                );
                self.default
            }
        }
    }
}

// ─── Paths ──────────────────────────────────────────────────────────────────

/// Models directory: `OLLAMA_MODELS`, else `~/.ollama/models`.
///
/// Fails only when the variable is unset and there is no home directory to fall back on.
pub fn models() -> Result<PathBuf> {
    models_from(&SystemEnv)
}

pub fn models_from<E: ReadEnv + ?Sized>(env: &E) -> Result<PathBuf> {
    let s = var_from(env, env_keys::OLLAMA_MODELS);
    if !s.is_empty() {
        return Ok(PathBuf::from(s));
    }
    let home = env.home_dir().ok_or(EnvConfigError::HomeDirUnavailable)?;
    Ok(home.join(".ollama").join("models"))
}

// ─── Settings ───────────────────────────────────────────────────────────────

const FIVE_MINUTES: Duration = Duration::from_secs(5 * 60);

/// How long an idle model stays loaded. `0` unloads immediately; negative keeps it forever.
pub const KEEP_ALIVE: DurationSetting =
    DurationSetting::new(env_keys::OLLAMA_KEEP_ALIVE, FIVE_MINUTES, false);
/// Stall detection window for model loads. `0` or negative disables the timeout.
pub const LOAD_TIMEOUT: DurationSetting =
    DurationSetting::new(env_keys::OLLAMA_LOAD_TIMEOUT, FIVE_MINUTES, true);

pub const DEBUG: BoolSetting = BoolSetting::new(env_keys::OLLAMA_DEBUG);
pub const FLASH_ATTENTION: BoolSetting = BoolSetting::new(env_keys::OLLAMA_FLASH_ATTENTION);
/// Disables readline history.
pub const NO_HISTORY: BoolSetting = BoolSetting::new(env_keys::OLLAMA_NOHISTORY);
/// Disables pruning of unused model blobs on startup.
pub const NO_PRUNE: BoolSetting = BoolSetting::new(env_keys::OLLAMA_NOPRUNE);
/// Always schedule a model across all GPUs.
pub const SCHED_SPREAD: BoolSetting = BoolSetting::new(env_keys::OLLAMA_SCHED_SPREAD);
/// Experimental Intel GPU detection.
pub const INTEL_GPU: BoolSetting = BoolSetting::new(env_keys::OLLAMA_INTEL_GPU);

pub const LLM_LIBRARY: StringSetting = StringSetting::new(env_keys::OLLAMA_LLM_LIBRARY);
pub const TMP_DIR: StringSetting = StringSetting::new(env_keys::OLLAMA_TMPDIR);
pub const CUDA_VISIBLE_DEVICES: StringSetting = StringSetting::new(gpu::CUDA_VISIBLE_DEVICES);
pub const HIP_VISIBLE_DEVICES: StringSetting = StringSetting::new(gpu::HIP_VISIBLE_DEVICES);
pub const ROCR_VISIBLE_DEVICES: StringSetting = StringSetting::new(gpu::ROCR_VISIBLE_DEVICES);
pub const GPU_DEVICE_ORDINAL: StringSetting = StringSetting::new(gpu::GPU_DEVICE_ORDINAL);
pub const HSA_OVERRIDE_GFX_VERSION: StringSetting =
    StringSetting::new(gpu::HSA_OVERRIDE_GFX_VERSION);

/// Parallel requests per model; `0` lets the scheduler decide.
pub const NUM_PARALLEL: UintSetting<usize> = UintSetting::new(env_keys::OLLAMA_NUM_PARALLEL, 0);
/// Maximum loaded models; `0` lets the scheduler decide.
pub const MAX_LOADED_MODELS: UintSetting<usize> =
    UintSetting::new(env_keys::OLLAMA_MAX_LOADED_MODELS, 0);
/// Queued requests before new ones are rejected.
pub const MAX_QUEUE: UintSetting<usize> = UintSetting::new(env_keys::OLLAMA_MAX_QUEUE, 512);
/// VRAM override in bytes.
pub const MAX_VRAM: UintSetting<u64> = UintSetting::new(env_keys::OLLAMA_MAX_VRAM, 0);
/// VRAM reserved per GPU, in bytes.
pub const GPU_OVERHEAD: UintSetting<u64> = UintSetting::new(env_keys::OLLAMA_GPU_OVERHEAD, 0);
