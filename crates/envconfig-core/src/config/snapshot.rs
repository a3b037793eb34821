//! `EnvConfig`：启动时一次性读取的配置快照
//!
//! 业务代码持有 `EnvConfig` 并显式传递，不再依赖全局访问器；
//! 测试或运行时需要重新读取时调用 [`EnvConfig::reload`]。

use std::path::PathBuf;
use std::time::Duration;

use super::env_keys::proxy;
use super::loader::raw_from;
use super::network::{host_from, origins_from, HostUrl};
use super::schema::{self, models_from};
use crate::env::{ReadEnv, SystemEnv};
use crate::error::Result;
use crate::platform::Platform;

/// Proxy variables, kept verbatim for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyVars {
    pub https_proxy: String,
    pub http_proxy: String,
    pub no_proxy: String,
    pub https_proxy_lower: String,
    pub http_proxy_lower: String,
    pub no_proxy_lower: String,
}

impl ProxyVars {
    pub fn from_source<E: ReadEnv + ?Sized>(env: &E) -> Self {
        Self {
            https_proxy: raw_from(env, proxy::HTTPS_PROXY),
            http_proxy: raw_from(env, proxy::HTTP_PROXY),
            no_proxy: raw_from(env, proxy::NO_PROXY),
            https_proxy_lower: raw_from(env, proxy::HTTPS_PROXY_LOWER),
            http_proxy_lower: raw_from(env, proxy::HTTP_PROXY_LOWER),
            no_proxy_lower: raw_from(env, proxy::NO_PROXY_LOWER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub host: HostUrl,
    pub origins: Vec<String>,
    pub models: PathBuf,

    pub keep_alive: Duration,
    pub load_timeout: Duration,

    pub debug: bool,
    pub flash_attention: bool,
    pub no_history: bool,
    pub no_prune: bool,
    pub sched_spread: bool,
    pub intel_gpu: bool,

    pub llm_library: String,
    pub tmp_dir: String,
    pub cuda_visible_devices: String,
    pub hip_visible_devices: String,
    pub rocr_visible_devices: String,
    pub gpu_device_ordinal: String,
    pub hsa_override_gfx_version: String,

    pub num_parallel: usize,
    pub max_loaded_models: usize,
    pub max_queue: usize,
    pub max_vram: u64,
    pub gpu_overhead: u64,

    pub proxies: ProxyVars,
    /// Platform the registry describes; decides which informational entries [`vars`](Self::vars) lists.
    pub platform: Platform,
}

impl EnvConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&SystemEnv)
    }

    /// Fails only when the models directory cannot be resolved.
    pub fn from_source<E: ReadEnv + ?Sized>(env: &E) -> Result<Self> {
        let config = Self {
            host: host_from(env),
            origins: origins_from(env),
            models: models_from(env)?,

            keep_alive: schema::KEEP_ALIVE.get_from(env),
            load_timeout: schema::LOAD_TIMEOUT.get_from(env),

            debug: schema::DEBUG.get_from(env),
            flash_attention: schema::FLASH_ATTENTION.get_from(env),
            no_history: schema::NO_HISTORY.get_from(env),
            no_prune: schema::NO_PRUNE.get_from(env),
            sched_spread: schema::SCHED_SPREAD.get_from(env),
            intel_gpu: schema::INTEL_GPU.get_from(env),

            llm_library: schema::LLM_LIBRARY.get_from(env),
            tmp_dir: schema::TMP_DIR.get_from(env),
            cuda_visible_devices: schema::CUDA_VISIBLE_DEVICES.get_from(env),
            hip_visible_devices: schema::HIP_VISIBLE_DEVICES.get_from(env),
            rocr_visible_devices: schema::ROCR_VISIBLE_DEVICES.get_from(env),
            gpu_device_ordinal: schema::GPU_DEVICE_ORDINAL.get_from(env),
            hsa_override_gfx_version: schema::HSA_OVERRIDE_GFX_VERSION.get_from(env),

            num_parallel: schema::NUM_PARALLEL.get_from(env),
            max_loaded_models: schema::MAX_LOADED_MODELS.get_from(env),
            max_queue: schema::MAX_QUEUE.get_from(env),
            max_vram: schema::MAX_VRAM.get_from(env),
            gpu_overhead: schema::GPU_OVERHEAD.get_from(env),

            proxies: ProxyVars::from_source(env),
            platform: Platform::current(),
        };
        tracing::debug!(host = %config.host, models = %config.models.display(), "loaded environment config");
        Ok(config)
    }

    /// Re-reads the process environment. On error `self` is left untouched.
    pub fn reload(&mut self) -> Result<()> {
        self.reload_from(&SystemEnv)
    }

    pub fn reload_from<E: ReadEnv + ?Sized>(&mut self, env: &E) -> Result<()> {
        let platform = self.platform;
        *self = Self {
            platform,
            ..Self::from_source(env)?
        };
        Ok(())
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_keys;
    use crate::env::InMemoryEnv;
    use crate::error::EnvConfigError;

    fn base_env() -> InMemoryEnv {
        let mut env = InMemoryEnv::new();
        env.set_home("/home/test");
        env
    }

    #[test]
    fn test_snapshot_defaults() {
        let config = EnvConfig::from_source(&base_env()).unwrap();
        assert_eq!(config.host.to_string(), "http://127.0.0.1:11434");
        assert_eq!(config.origins.len(), 15);
        assert_eq!(
            config.models,
            PathBuf::from("/home/test").join(".ollama").join("models")
        );
        assert_eq!(config.keep_alive, Duration::from_secs(300));
        assert_eq!(config.load_timeout, Duration::from_secs(300));
        assert!(!config.debug);
        assert_eq!(config.max_queue, 512);
        assert_eq!(config.num_parallel, 0);
        assert_eq!(config.proxies, ProxyVars::default());
        assert_eq!(config.platform, Platform::current());
    }

    #[test]
    fn test_snapshot_reads_every_kind() {
        let mut env = base_env();
        env.set(env_keys::OLLAMA_HOST, "https://example.com/ollama")
            .set(env_keys::OLLAMA_KEEP_ALIVE, "-1")
            .set(env_keys::OLLAMA_LOAD_TIMEOUT, "0")
            .set(env_keys::OLLAMA_FLASH_ATTENTION, "1")
            .set(env_keys::OLLAMA_NUM_PARALLEL, "4")
            .set(env_keys::OLLAMA_GPU_OVERHEAD, "1024")
            .set(env_keys::gpu::HIP_VISIBLE_DEVICES, "0")
            .set(proxy::HTTPS_PROXY, " http://proxy:3128 ");

        let config = EnvConfig::from_source(&env).unwrap();
        assert_eq!(config.host.to_string(), "https://example.com:443/ollama");
        assert_eq!(config.keep_alive, Duration::MAX);
        assert_eq!(config.load_timeout, Duration::MAX);
        assert!(config.flash_attention);
        assert_eq!(config.num_parallel, 4);
        assert_eq!(config.gpu_overhead, 1024);
        assert_eq!(config.hip_visible_devices, "0");
        assert_eq!(config.proxies.https_proxy, " http://proxy:3128 ");
    }

    #[test]
    fn test_snapshot_missing_home_is_fatal() {
        let err = EnvConfig::from_source(&InMemoryEnv::new()).unwrap_err();
        assert!(matches!(err, EnvConfigError::HomeDirUnavailable));
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let mut env = base_env();
        let mut config = EnvConfig::from_source(&env)
            .unwrap()
            .with_platform(Platform::Windows);
        assert!(!config.debug);

        env.set(env_keys::OLLAMA_DEBUG, "1");
        config.reload_from(&env).unwrap();
        assert!(config.debug);
        assert_eq!(config.platform, Platform::Windows);
    }

    #[test]
    fn test_reload_failure_keeps_previous() {
        let mut env = base_env();
        env.set(env_keys::OLLAMA_MAX_QUEUE, "8");
        let mut config = EnvConfig::from_source(&env).unwrap();

        let mut broken = InMemoryEnv::new();
        broken.set(env_keys::OLLAMA_MAX_QUEUE, "16");
        assert!(config.reload_from(&broken).is_err());
        assert_eq!(config.max_queue, 8);
    }
}
