//! 统一配置层
//!
//! 所有 `OLLAMA_*` 环境变量读取集中在此模块。
//!
//! - `env_keys`: key 常量
//! - `loader`: `var` 及 bool / uint 解析
//! - `duration`: Go 风格时长字面量（`5m`、`1h30m`）
//! - `network`: `OLLAMA_HOST`、`OLLAMA_ORIGINS`
//! - `schema`: 各类型 setting 定义与单例常量
//! - `snapshot`: `EnvConfig` 快照
//! - `registry`: `vars` / `describe` 自描述

pub mod duration;
pub mod env_keys;
pub mod loader;
pub mod network;
pub mod registry;
pub mod schema;
pub mod snapshot;

pub use loader::{var, var_from};
pub use network::{host, host_from, origins, origins_from, HostUrl};
pub use registry::{describe, vars, Setting, SettingValue};
pub use schema::{
    models, models_from, BoolSetting, DurationSetting, StringSetting, UintSetting, UintValue,
    CUDA_VISIBLE_DEVICES, DEBUG, FLASH_ATTENTION, GPU_DEVICE_ORDINAL, GPU_OVERHEAD,
    HIP_VISIBLE_DEVICES, HSA_OVERRIDE_GFX_VERSION, INTEL_GPU, KEEP_ALIVE, LLM_LIBRARY,
    LOAD_TIMEOUT, MAX_LOADED_MODELS, MAX_QUEUE, MAX_VRAM, NO_HISTORY, NO_PRUNE, NUM_PARALLEL,
    ROCR_VISIBLE_DEVICES, SCHED_SPREAD, TMP_DIR,
};
pub use snapshot::{EnvConfig, ProxyVars};
