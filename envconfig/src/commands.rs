//! Subcommand handlers. Output goes to the given writer so handlers can be tested.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use envconfig_core::{lib_dir, EnvConfig, Setting};

use crate::cli::Commands;

/// Loads the process environment and runs `command`.
///
/// An unresolvable models directory aborts here; there is no safe default for it.
pub fn run(command: Commands, out: &mut impl Write) -> Result<()> {
    let config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load OLLAMA_* environment");
            return Err(err).context("failed to load OLLAMA_* environment");
        }
    };
    run_with(command, &config, out)
}

pub fn run_with(command: Commands, config: &EnvConfig, out: &mut impl Write) -> Result<()> {
    tracing::debug!(?command, platform = ?config.platform, host = %config.host, "running command");
    match command {
        Commands::Vars { json } => write_vars(&config.vars(), json, out),
        Commands::Describe { names } => write_descriptions(&config.describe(names.as_slice()), out),
        Commands::Host => {
            writeln!(out, "{}", config.host)?;
            Ok(())
        }
        Commands::LibDir => {
            let dir = lib_dir().context("failed to resolve library directory")?;
            writeln!(out, "{}", dir.display())?;
            Ok(())
        }
    }
}

fn write_vars(vars: &[Setting], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, vars)?;
        writeln!(out)?;
        return Ok(());
    }
    for var in vars {
        writeln!(out, "{var}")?;
    }
    Ok(())
}

fn write_descriptions(descriptions: &BTreeMap<String, String>, out: &mut impl Write) -> Result<()> {
    for (name, description) in descriptions {
        writeln!(out, "{name}\t{description}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envconfig_core::config::env_keys;
    use envconfig_core::test_log::capture_logs;
    use envconfig_core::{InMemoryEnv, Platform};

    fn config_with(pairs: &[(&str, &str)]) -> EnvConfig {
        let mut env: InMemoryEnv = pairs.iter().copied().collect();
        env.set_home("/home/test");
        EnvConfig::from_source(&env)
            .unwrap()
            .with_platform(Platform::Linux)
    }

    fn render(command: Commands, config: &EnvConfig) -> String {
        let mut out = Vec::new();
        run_with(command, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_vars_text() {
        let out = render(Commands::Vars { json: false }, &config_with(&[]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 29);
        assert_eq!(lines[0], "OLLAMA_DEBUG:false");
        assert!(lines.contains(&"OLLAMA_MAX_QUEUE:512"));
        assert!(lines.contains(&"OLLAMA_LOAD_TIMEOUT:5m0s"));
    }

    #[test]
    fn test_vars_json() {
        let config = config_with(&[(env_keys::OLLAMA_NUM_PARALLEL, "2")]);
        let out = render(Commands::Vars { json: true }, &config);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let entries = json.as_array().unwrap();
        let parallel = entries
            .iter()
            .find(|e| e["name"] == "OLLAMA_NUM_PARALLEL")
            .unwrap();
        assert_eq!(parallel["value"], 2);
        assert!(parallel["default"].is_null());
    }

    #[test]
    fn test_describe_sorted_and_filtered() {
        let names = vec![
            "OLLAMA_KEEP_ALIVE".to_string(),
            "BOGUS".to_string(),
            "OLLAMA_DEBUG".to_string(),
        ];
        let out = render(Commands::Describe { names }, &config_with(&[]));
        assert_eq!(
            out,
            "OLLAMA_DEBUG\tEnable debug (default: false)\n\
             OLLAMA_KEEP_ALIVE\tDuration of inactivity before models are unloaded (default: 5m0s)\n"
        );
    }

    #[test]
    fn test_host() {
        let config = config_with(&[(env_keys::OLLAMA_HOST, "https://example.com/ollama")]);
        assert_eq!(
            render(Commands::Host, &config),
            "https://example.com:443/ollama\n"
        );
    }

    #[test]
    fn test_lib_dir() {
        let out = render(Commands::LibDir, &config_with(&[]));
        assert!(out.trim_end().ends_with(envconfig_core::lib_relative_to_exe()));
    }

    #[test]
    fn test_run_logs_command_at_debug() {
        let config = config_with(&[(env_keys::OLLAMA_HOST, "0.0.0.0:8080")]);
        let (out, logs) = capture_logs(|| render(Commands::Host, &config));
        assert_eq!(out, "http://0.0.0.0:8080\n");
        assert!(logs.contains("DEBUG"), "{logs}");
        assert!(logs.contains("running command"), "{logs}");
        assert!(logs.contains("Host"), "{logs}");
        assert!(logs.contains("http://0.0.0.0:8080"), "{logs}");
    }
}
