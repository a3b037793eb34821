//! 环境变量读取与基础解析
//!
//! 所有 setting 都经由 [`var_from`] 读取，保证去空白、去引号规则一致。

use crate::env::{ReadEnv, SystemEnv};

/// Reads `key` from the process environment, stripped of surrounding whitespace and quotes.
///
/// Unset (or non-unicode) variables read as the empty string.
pub fn var(key: &str) -> String {
    var_from(&SystemEnv, key)
}

/// [`var`] against an arbitrary source.
pub fn var_from<E: ReadEnv + ?Sized>(env: &E, key: &str) -> String {
    env.var(key).map(|raw| clean(&raw)).unwrap_or_default()
}

/// Raw value, no trimming. Only the informational proxy entries read this way.
pub(crate) fn raw_from<E: ReadEnv + ?Sized>(env: &E, key: &str) -> String {
    env.var(key).unwrap_or_default()
}

fn clean(raw: &str) -> String {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

/// Boolean literals accepted by `OLLAMA_*` flags: `1 t T TRUE true True` and the
/// matching false forms. Anything else is `None`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Base-10 unsigned integer; digits only, no sign.
pub fn parse_uint(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
