use std::path::PathBuf;

use clap::Parser;
use senv_config::ActionInputs;

/// Every input can also come from the host's `INPUT_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "senv")]
#[command(about = "Write secrets from a JSON map to an env file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON object of secret names to values (`-` reads stdin)
    #[arg(long, env = "INPUT_SECRETS", hide_env_values = true)]
    pub secrets: Option<String>,

    /// Output env file
    #[arg(long, env = "INPUT_PATH")]
    pub path: Option<PathBuf>,

    /// Comma-separated regexes; only matching keys are kept
    #[arg(long, env = "INPUT_INCLUDE_REGEXP")]
    pub include_regexp: Option<String>,

    /// Comma-separated regexes; matching keys are dropped (GITHUB_TOKEN always is)
    #[arg(long, env = "INPUT_EXCLUDE_REGEXP")]
    pub exclude_regexp: Option<String>,

    /// Comma-separated `search=replacement` rules applied to keys in order
    #[arg(long, env = "INPUT_REPLACE_REGEXP")]
    pub replace_regexp: Option<String>,

    /// TOML file with the same inputs; flags and environment take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Inputs given on the command line or through the environment, trimmed.
    /// Blank values count as unset so they do not mask the config file.
    pub fn action_inputs(&self) -> ActionInputs {
        ActionInputs {
            secrets: self.secrets.clone(),
            path: self.path.clone(),
            include_regexp: self.include_regexp.clone(),
            exclude_regexp: self.exclude_regexp.clone(),
            replace_regexp: self.replace_regexp.clone(),
        }
        .trimmed()
    }

    /// Config file inputs (if any) overlaid with flags and environment.
    pub fn resolve_inputs(&self) -> senv_config::Result<ActionInputs> {
        let base = match &self.config {
            Some(path) => ActionInputs::load(path)?.trimmed(),
            None => ActionInputs::default(),
        };
        Ok(base.overlay(self.action_inputs()))
    }
}
