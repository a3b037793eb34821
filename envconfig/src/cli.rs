use clap::{Parser, Subcommand};

/// Inspect the OLLAMA_* environment configuration
#[derive(Parser, Debug)]
#[command(name = "envconfig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr (also: ENVCONFIG_LOG_JSON=1)
    #[arg(long, global = true, default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every setting with its current value
    Vars {
        /// Output a JSON array of {name, usage, value, default}
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print usage text (and default, if any) for the named settings
    Describe {
        /// Setting names, e.g. OLLAMA_HOST OLLAMA_KEEP_ALIVE
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// Print the resolved OLLAMA_HOST URL
    Host,

    /// Print the library directory for this executable
    LibDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vars_json() {
        let cli = Cli::try_parse_from(["envconfig", "vars", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Vars { json: true }));
    }

    #[test]
    fn test_describe_requires_names() {
        assert!(Cli::try_parse_from(["envconfig", "describe"]).is_err());
        let cli = Cli::try_parse_from(["envconfig", "describe", "OLLAMA_HOST", "OLLAMA_DEBUG"])
            .unwrap();
        match cli.command {
            Commands::Describe { names } => assert_eq!(names, ["OLLAMA_HOST", "OLLAMA_DEBUG"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_clap_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
