//! `OLLAMA_HOST` / `OLLAMA_ORIGINS`

use std::fmt;
use std::net::IpAddr;

use super::env_keys::{OLLAMA_HOST, OLLAMA_ORIGINS};
use super::loader::var_from;
use crate::env::{ReadEnv, SystemEnv};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 11434;

/// Hosts that are always allowed as browser origins.
const LOCAL_ORIGIN_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "0.0.0.0"];
/// Scheme wildcards for desktop shells and local files.
const APP_ORIGINS: [&str; 3] = ["app://*", "file://*", "tauri://*"];

/// Listen address resolved from `OLLAMA_HOST`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostUrl {
    pub scheme: String,
    /// `host:port`, IPv6 hosts bracketed.
    pub host: String,
    /// Path after the first `/`, without the leading slash. Empty if none.
    pub path: String,
}

impl HostUrl {
    /// Parses an `OLLAMA_HOST` value. Never fails: every malformed part falls back to its default.
    pub fn parse(value: &str) -> Self {
        let s = value.trim();
        let (scheme, rest, default_port) = match s.split_once("://") {
            None => ("http", s, DEFAULT_PORT),
            Some(("http", rest)) => ("http", rest, 80),
            Some(("https", rest)) => ("https", rest, 443),
            Some((scheme, rest)) => (scheme, rest, DEFAULT_PORT),
        };

        let (hostport, path) = rest.split_once('/').unwrap_or((rest, ""));
        let (host, port) = match split_host_port(hostport) {
            Some((host, port)) => (host.to_string(), Some(port)),
            None => (fallback_host(hostport), None),
        };

        // A valid port is kept as written (`+80` stays `+80`).
        let port = match port {
            None => default_port.to_string(),
            Some(port) if port.parse::<i32>().is_ok_and(|n| u16::try_from(n).is_ok()) => {
                port.to_string()
            }
            Some(port) => {
                tracing::warn!(port, default = default_port, "invalid port, using default");
                default_port.to_string()
            }
        };

        Self {
            scheme: scheme.to_string(),
            host: join_host_port(&host, port),
            path: path.to_string(),
        }
    }
}

impl Default for HostUrl {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: join_host_port(DEFAULT_HOST, DEFAULT_PORT),
            path: String::new(),
        }
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if !self.path.is_empty() {
            write!(f, "/{}", self.path)?;
        }
        Ok(())
    }
}

/// Host to use when `hostport` has no usable `host:port` split.
fn fallback_host(hostport: &str) -> String {
    match hostport.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>() {
        Ok(ip) => canonical_ip(ip),
        Err(_) if !hostport.is_empty() => hostport.to_string(),
        Err(_) => DEFAULT_HOST.to_string(),
    }
}

fn canonical_ip(ip: IpAddr) -> String {
    match ip {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        IpAddr::V4(v4) => v4.to_string(),
    }
}

/// Splits `host:port` / `[v6]:port`. `None` for a missing port, stray brackets, or a bare
/// IPv6 address.
fn split_host_port(hostport: &str) -> Option<(&str, &str)> {
    let colon = hostport.rfind(':')?;
    let (host, open_from, close_from) = if hostport.starts_with('[') {
        let end = hostport.find(']')?;
        if end + 1 != colon {
            return None;
        }
        (&hostport[1..end], 1, end + 1)
    } else {
        let host = &hostport[..colon];
        if host.contains(':') {
            return None;
        }
        (host, 0, 0)
    };
    if hostport[open_from..].contains('[') || hostport[close_from..].contains(']') {
        return None;
    }
    Some((host, &hostport[colon + 1..]))
}

fn join_host_port(host: &str, port: impl fmt::Display) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Scheme and `host:port` from `OLLAMA_HOST`; default `http://127.0.0.1:11434`.
pub fn host() -> HostUrl {
    host_from(&SystemEnv)
}

pub fn host_from<E: ReadEnv + ?Sized>(env: &E) -> HostUrl {
    HostUrl::parse(&var_from(env, OLLAMA_HOST))
}

/// Allowed browser origins: `OLLAMA_ORIGINS` entries, then the fixed local patterns.
pub fn origins() -> Vec<String> {
    origins_from(&SystemEnv)
}

pub fn origins_from<E: ReadEnv + ?Sized>(env: &E) -> Vec<String> {
    let configured = var_from(env, OLLAMA_ORIGINS);
    let mut origins: Vec<String> = if configured.is_empty() {
        Vec::new()
    } else {
        configured.split(',').map(str::to_string).collect()
    };

    for origin in LOCAL_ORIGIN_HOSTS {
        origins.extend([
            format!("http://{origin}"),
            format!("https://{origin}"),
            format!("http://{}", join_host_port(origin, "*")),
            format!("https://{}", join_host_port(origin, "*")),
        ]);
    }
    origins.extend(APP_ORIGINS.iter().map(|o| o.to_string()));
    origins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InMemoryEnv;
    use crate::test_log::capture_logs;

    fn host_of(value: &str) -> HostUrl {
        let env: InMemoryEnv = [(OLLAMA_HOST, value)].into_iter().collect();
        host_from(&env)
    }

    #[test]
    fn test_host_table() {
        let cases = [
            ("", "127.0.0.1:11434"),
            ("1.2.3.4", "1.2.3.4:11434"),
            (":1234", ":1234"),
            ("1.2.3.4:1234", "1.2.3.4:1234"),
            ("example.com", "example.com:11434"),
            ("example.com:1234", "example.com:1234"),
            (":0", ":0"),
            ("[::1]", "[::1]:11434"),
            ("[::]", "[::]:11434"),
            ("::1", "[::1]:11434"),
            ("[::1]:1337", "[::1]:1337"),
            (" 1.2.3.4 ", "1.2.3.4:11434"),
            ("\"1.2.3.4\"", "1.2.3.4:11434"),
            (" \" 1.2.3.4 \" ", "1.2.3.4:11434"),
            ("'1.2.3.4'", "1.2.3.4:11434"),
            ("http://1.2.3.4", "1.2.3.4:80"),
            ("http://1.2.3.4:4321", "1.2.3.4:4321"),
            ("https://1.2.3.4", "1.2.3.4:443"),
            ("https://1.2.3.4:4321", "1.2.3.4:4321"),
            ("https://example.com/ollama", "example.com:443"),
            ("::ffff:1.2.3.4", "1.2.3.4:11434"),
            ("h:+80", "h:+80"),
            ("h:-0", "h:-0"),
            ("h:080", "h:080"),
        ];
        for (input, expected) in cases {
            assert_eq!(host_of(input).host, expected, "OLLAMA_HOST={input:?}");
        }
    }

    #[test]
    fn test_host_unset_is_default() {
        let url = host_from(&InMemoryEnv::new());
        assert_eq!(url, HostUrl::default());
        assert_eq!(url.to_string(), "http://127.0.0.1:11434");
    }

    #[test]
    fn test_host_scheme_and_path() {
        let url = host_of("https://example.com");
        assert_eq!(url.scheme, "https");
        assert_eq!(url.host, "example.com:443");
        assert_eq!(url.path, "");

        let url = host_of("1.2.3.4:9999/extra");
        assert_eq!(url.scheme, "http");
        assert_eq!(url.host, "1.2.3.4:9999");
        assert_eq!(url.path, "extra");
        assert_eq!(url.to_string(), "http://1.2.3.4:9999/extra");
    }

    #[test]
    fn test_host_unknown_scheme_keeps_default_port() {
        let url = host_of("tcp://example.com");
        assert_eq!(url.scheme, "tcp");
        assert_eq!(url.host, "example.com:11434");
    }

    #[test]
    fn test_host_invalid_port_warns() {
        let (url, logs) = capture_logs(|| host_of("badhost:99999"));
        assert_eq!(url.host, "badhost:11434");
        assert!(logs.contains("invalid port, using default"), "{logs}");
        assert!(logs.contains("99999"), "{logs}");

        let (url, logs) = capture_logs(|| host_of(":-1"));
        assert_eq!(url.host, ":11434");
        assert!(logs.contains("WARN"), "{logs}");

        let (url, _) = capture_logs(|| host_of("https://example.com:http"));
        assert_eq!(url.host, "example.com:443");
    }

    #[test]
    fn test_host_valid_port_is_silent() {
        let (_, logs) = capture_logs(|| host_of("example.com:8080"));
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("a:1"), Some(("a", "1")));
        assert_eq!(split_host_port("[::1]:2"), Some(("::1", "2")));
        assert_eq!(split_host_port(":"), Some(("", "")));
        assert_eq!(split_host_port("a"), None);
        assert_eq!(split_host_port("::1"), None);
        assert_eq!(split_host_port("[::1]"), None);
        assert_eq!(split_host_port("[::1]x:2"), None);
        assert_eq!(split_host_port("a]:2"), None);
        assert_eq!(split_host_port("[a:2"), None);
    }

    #[test]
    fn test_origins_default() {
        let origins = origins_from(&InMemoryEnv::new());
        assert_eq!(origins.len(), 3 * 4 + 3);
        assert_eq!(
            &origins[..4],
            [
                "http://localhost",
                "https://localhost",
                "http://localhost:*",
                "https://localhost:*"
            ]
        );
        assert_eq!(origins[4], "http://127.0.0.1");
        assert_eq!(origins[11], "https://0.0.0.0:*");
        assert_eq!(&origins[12..], ["app://*", "file://*", "tauri://*"]);
    }

    #[test]
    fn test_origins_configured_first() {
        let env: InMemoryEnv = [(OLLAMA_ORIGINS, "http://10.0.0.1,https://foo.example")]
            .into_iter()
            .collect();
        let origins = origins_from(&env);
        assert_eq!(origins.len(), 2 + 15);
        assert_eq!(origins[0], "http://10.0.0.1");
        assert_eq!(origins[1], "https://foo.example");
        assert_eq!(origins[2], "http://localhost");
    }

    #[test]
    fn test_origins_keep_duplicates() {
        let env: InMemoryEnv = [(OLLAMA_ORIGINS, "http://localhost")].into_iter().collect();
        let origins = origins_from(&env);
        assert_eq!(
            origins.iter().filter(|o| *o == "http://localhost").count(),
            2
        );
    }
}
