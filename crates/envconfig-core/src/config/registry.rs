//! 自描述注册表：`vars` / `describe`
//!
//! 供 help 文本和诊断命令使用，不参与类型校验。

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::duration::format_duration;
use super::env_keys::{self, gpu, proxy};
use super::network::HostUrl;
use super::schema::{UintValue, KEEP_ALIVE, LOAD_TIMEOUT};
use super::snapshot::EnvConfig;
use crate::error::Result;
use crate::platform::Platform;

/// Current or default value of a setting, rendered the way users write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Uint(u64),
    Duration(Duration),
    String(String),
    List(Vec<String>),
    Host(HostUrl),
    Path(PathBuf),
}

impl SettingValue {
    fn uint<T: UintValue>(n: T) -> Self {
        Self::Uint(n.to_u64())
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Duration(d) => f.write_str(&format_duration(*d)),
            Self::String(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{}]", items.join(" ")),
            Self::Host(url) => write!(f, "{url}"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Uint(n) => serializer.serialize_u64(*n),
            Self::List(items) => items.serialize(serializer),
            other => serializer.collect_str(other),
        }
    }
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    pub name: &'static str,
    pub usage: &'static str,
    pub value: SettingValue,
    pub default: Option<SettingValue>,
}

impl Setting {
    fn new(name: &'static str, usage: &'static str, value: SettingValue) -> Self {
        Self {
            name,
            usage,
            value,
            default: None,
        }
    }

    fn with_default(mut self, default: SettingValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Usage text, plus ` (default: …)` when a default is registered.
    pub fn description(&self) -> String {
        match &self.default {
            Some(default) => format!("{} (default: {default})", self.usage),
            None => self.usage.to_string(),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}

impl EnvConfig {
    /// Registry for [`self.platform`](EnvConfig::platform).
    pub fn vars(&self) -> Vec<Setting> {
        self.vars_for(self.platform)
    }

    /// Registry as it would read on `platform`. Order is fixed.
    pub fn vars_for(&self, platform: Platform) -> Vec<Setting> {
        use SettingValue::{Bool, Duration as Dur, Host, List, Path, String as Str};

        let mut s = vec![
            Setting::new(env_keys::OLLAMA_DEBUG, "Enable debug", Bool(self.debug))
                .with_default(Bool(false)),
            Setting::new(
                env_keys::OLLAMA_FLASH_ATTENTION,
                "Enabled flash attention",
                Bool(self.flash_attention),
            )
            .with_default(Bool(false)),
            Setting::new(
                env_keys::OLLAMA_GPU_OVERHEAD,
                "Reserve a portion of VRAM per GPU",
                SettingValue::uint(self.gpu_overhead),
            )
            .with_default(SettingValue::Uint(0)),
            Setting::new(
                env_keys::OLLAMA_HOST,
                "Listen address and port",
                Host(self.host.clone()),
            )
            .with_default(Str("127.0.0.1:11434".to_string())),
            Setting::new(
                env_keys::OLLAMA_KEEP_ALIVE,
                "Duration of inactivity before models are unloaded",
                Dur(self.keep_alive),
            )
            .with_default(Dur(KEEP_ALIVE.default_value())),
            Setting::new(
                env_keys::OLLAMA_LLM_LIBRARY,
                "Set LLM library to bypass autodetection",
                Str(self.llm_library.clone()),
            ),
            Setting::new(
                env_keys::OLLAMA_LOAD_TIMEOUT,
                "Duration for stall detection during model loads",
                Dur(self.load_timeout),
            )
            .with_default(Dur(LOAD_TIMEOUT.default_value())),
            Setting::new(
                env_keys::OLLAMA_MAX_LOADED_MODELS,
                "Maximum number of loaded models per GPU",
                SettingValue::uint(self.max_loaded_models),
            ),
            Setting::new(
                env_keys::OLLAMA_MAX_QUEUE,
                "Maximum number of queued requests",
                SettingValue::uint(self.max_queue),
            ),
            Setting::new(
                env_keys::OLLAMA_MAX_VRAM,
                "Maximum VRAM to consider for model offloading",
                SettingValue::uint(self.max_vram),
            ),
            Setting::new(
                env_keys::OLLAMA_MODELS,
                "Path override for models directory",
                Path(self.models.clone()),
            ),
            Setting::new(
                env_keys::OLLAMA_NOHISTORY,
                "Disable readline history",
                Bool(self.no_history),
            )
            .with_default(Bool(false)),
            Setting::new(
                env_keys::OLLAMA_NOPRUNE,
                "Disable unused blob pruning",
                Bool(self.no_prune),
            )
            .with_default(Bool(false)),
            Setting::new(
                env_keys::OLLAMA_NUM_PARALLEL,
                "Maximum number of parallel requests before requests are queued",
                SettingValue::uint(self.num_parallel),
            ),
            Setting::new(
                env_keys::OLLAMA_ORIGINS,
                "Additional HTTP Origins to allow",
                List(self.origins.clone()),
            ),
            Setting::new(
                env_keys::OLLAMA_SCHED_SPREAD,
                "Always schedule model across all GPUs",
                Bool(self.sched_spread),
            )
            .with_default(Bool(false)),
            Setting::new(
                env_keys::OLLAMA_TMPDIR,
                "Path override for temporary directory",
                Str(self.tmp_dir.clone()),
            ),
            // informational
            Setting::new(
                proxy::HTTPS_PROXY,
                "Proxy for HTTPS requests",
                Str(self.proxies.https_proxy.clone()),
            ),
            Setting::new(
                proxy::HTTP_PROXY,
                "Proxy for HTTP requests",
                Str(self.proxies.http_proxy.clone()),
            ),
            Setting::new(
                proxy::NO_PROXY,
                "No proxy for these hosts",
                Str(self.proxies.no_proxy.clone()),
            ),
        ];

        let caps = platform.capabilities();
        if caps.lowercase_proxy_vars {
            s.extend([
                Setting::new(
                    proxy::HTTPS_PROXY_LOWER,
                    "Proxy for HTTPS requests",
                    Str(self.proxies.https_proxy_lower.clone()),
                ),
                Setting::new(
                    proxy::HTTP_PROXY_LOWER,
                    "Proxy for HTTP requests",
                    Str(self.proxies.http_proxy_lower.clone()),
                ),
                Setting::new(
                    proxy::NO_PROXY_LOWER,
                    "No proxy for these hosts",
                    Str(self.proxies.no_proxy_lower.clone()),
                ),
            ]);
        }

        if caps.gpu_visibility_vars {
            s.extend([
                Setting::new(
                    gpu::CUDA_VISIBLE_DEVICES,
                    "Set which NVIDIA devices are visible",
                    Str(self.cuda_visible_devices.clone()),
                ),
                Setting::new(
                    gpu::HIP_VISIBLE_DEVICES,
                    "Set which AMD devices are visible",
                    Str(self.hip_visible_devices.clone()),
                ),
                Setting::new(
                    gpu::ROCR_VISIBLE_DEVICES,
                    "Set which AMD devices are visible",
                    Str(self.rocr_visible_devices.clone()),
                ),
                Setting::new(
                    gpu::GPU_DEVICE_ORDINAL,
                    "Set which AMD devices are visible",
                    Str(self.gpu_device_ordinal.clone()),
                ),
                Setting::new(
                    gpu::HSA_OVERRIDE_GFX_VERSION,
                    "Override the gfx used for all detected AMD GPUs",
                    Str(self.hsa_override_gfx_version.clone()),
                ),
                Setting::new(
                    env_keys::OLLAMA_INTEL_GPU,
                    "Enable experimental Intel GPU detection",
                    Bool(self.intel_gpu),
                ),
            ]);
        }

        s
    }

    /// Descriptions for the requested names. Unknown names are skipped.
    pub fn describe<S: AsRef<str>>(&self, names: &[S]) -> BTreeMap<String, String> {
        describe_in(&self.vars(), names)
    }
}

fn describe_in<S: AsRef<str>>(vars: &[Setting], names: &[S]) -> BTreeMap<String, String> {
    names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            vars.iter()
                .find(|v| v.name == name)
                .map(|v| (name.to_string(), v.description()))
        })
        .collect()
}

/// Registry built from the current process environment.
pub fn vars() -> Result<Vec<Setting>> {
    Ok(EnvConfig::from_env()?.vars())
}

/// [`EnvConfig::describe`] against the current process environment.
pub fn describe<S: AsRef<str>>(names: &[S]) -> Result<BTreeMap<String, String>> {
    Ok(EnvConfig::from_env()?.describe(names))
}
