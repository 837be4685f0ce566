//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for symptom-triage
#[derive(Parser, Debug)]
#[command(name = "symptom-triage")]
#[command(author, version, about = "Conversational symptom triage assistant")]
#[command(long_about = r#"
Symptom Triage turns free-text symptom descriptions into a ranked list of
possible conditions, flags emergencies, and keeps short-lived chat sessions.

It is not a substitute for professional medical advice.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./triage.toml       Project-level config
3. ~/.config/symptom-triage/config.toml   Global config

Example:
  symptom-triage chat
  symptom-triage predict "headache, nausea, vomiting"
  symptom-triage serve < requests.jsonl
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Subcommand to run; interactive chat when none is given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start an interactive chat session
    Chat,

    /// Check a comma-separated symptom list once, without a session
    Predict {
        /// Symptoms, e.g. "fever, cough"
        symptoms: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve JSON-lines requests on stdin/stdout
    Serve,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_chat() {
        let cli = Cli::parse_from(["symptom-triage"]);
        assert_eq!(cli.command(), Command::Chat);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_predict_with_global_flags() {
        let cli = Cli::parse_from([
            "symptom-triage",
            "predict",
            "fever, cough",
            "--json",
            "-vv",
            "--no-color",
        ]);
        assert_eq!(
            cli.command(),
            Command::Predict {
                symptoms: "fever, cough".to_string(),
                json: true
            }
        );
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_config_flags() {
        let cli = Cli::parse_from(["symptom-triage", "--config", "my.toml", "serve"]);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert_eq!(cli.command(), Command::Serve);
    }
}
