//! 环境变量 key 常量

// ─── Network ────────────────────────────────────────────────────────────────
pub const OLLAMA_HOST: &str = "OLLAMA_HOST";
pub const OLLAMA_ORIGINS: &str = "OLLAMA_ORIGINS";

// ─── Paths ──────────────────────────────────────────────────────────────────
pub const OLLAMA_MODELS: &str = "OLLAMA_MODELS";
pub const OLLAMA_TMPDIR: &str = "OLLAMA_TMPDIR";
pub const OLLAMA_LLM_LIBRARY: &str = "OLLAMA_LLM_LIBRARY";

// ─── Durations ──────────────────────────────────────────────────────────────
pub const OLLAMA_KEEP_ALIVE: &str = "OLLAMA_KEEP_ALIVE";
pub const OLLAMA_LOAD_TIMEOUT: &str = "OLLAMA_LOAD_TIMEOUT";

// ─── Feature flags ──────────────────────────────────────────────────────────
pub const OLLAMA_DEBUG: &str = "OLLAMA_DEBUG";
pub const OLLAMA_FLASH_ATTENTION: &str = "OLLAMA_FLASH_ATTENTION";
pub const OLLAMA_NOHISTORY: &str = "OLLAMA_NOHISTORY";
pub const OLLAMA_NOPRUNE: &str = "OLLAMA_NOPRUNE";
pub const OLLAMA_SCHED_SPREAD: &str = "OLLAMA_SCHED_SPREAD";
pub const OLLAMA_INTEL_GPU: &str = "OLLAMA_INTEL_GPU";

// ─── Scheduling / resource limits ───────────────────────────────────────────
pub const OLLAMA_NUM_PARALLEL: &str = "OLLAMA_NUM_PARALLEL";
pub const OLLAMA_MAX_LOADED_MODELS: &str = "OLLAMA_MAX_LOADED_MODELS";
pub const OLLAMA_MAX_QUEUE: &str = "OLLAMA_MAX_QUEUE";
pub const OLLAMA_MAX_VRAM: &str = "OLLAMA_MAX_VRAM";
pub const OLLAMA_GPU_OVERHEAD: &str = "OLLAMA_GPU_OVERHEAD";

/// GPU 可见性（厂商变量，macOS 无意义）
pub mod gpu {
    pub const CUDA_VISIBLE_DEVICES: &str = "CUDA_VISIBLE_DEVICES";
    pub const HIP_VISIBLE_DEVICES: &str = "HIP_VISIBLE_DEVICES";
    pub const ROCR_VISIBLE_DEVICES: &str = "ROCR_VISIBLE_DEVICES";
    pub const GPU_DEVICE_ORDINAL: &str = "GPU_DEVICE_ORDINAL";
    pub const HSA_OVERRIDE_GFX_VERSION: &str = "HSA_OVERRIDE_GFX_VERSION";
}

/// 代理变量：仅用于展示，不做解析
pub mod proxy {
    pub const HTTPS_PROXY: &str = "HTTPS_PROXY";
    pub const HTTP_PROXY: &str = "HTTP_PROXY";
    pub const NO_PROXY: &str = "NO_PROXY";

    // Windows 上环境变量大小写不敏感，小写形式不单独列出
    pub const HTTPS_PROXY_LOWER: &str = "https_proxy";
    pub const HTTP_PROXY_LOWER: &str = "http_proxy";
    pub const NO_PROXY_LOWER: &str = "no_proxy";
}
