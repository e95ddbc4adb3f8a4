//! Automation host integration: log setup and failure reporting

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Default log level: `debug` when the host runs with step debugging on.
fn default_filter(runner_debug: Option<&str>) -> &'static str {
    match runner_debug {
        Some("1") | Some("true") => "debug",
        _ => "info",
    }
}

/// Logs go to stderr so stdout only carries workflow commands.
pub fn init_logging() {
    let runner_debug = std::env::var("RUNNER_DEBUG").ok();
    let default = default_filter(runner_debug.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Escape a message for a workflow command so it stays on one line.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format the single failure line the host picks up from stdout.
pub fn failure_command(err: &anyhow::Error) -> String {
    format!("::error::{}", escape_data(&format!("{err:#}")))
}

pub fn report_failure(err: &anyhow::Error) {
    println!("{}", failure_command(err));
}
