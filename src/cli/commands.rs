//! CLI commands
//!
//! Special commands that can be executed in the REPL.

use crate::core::{Config, Result};

/// Result of parsing a command
pub enum CommandResult {
    /// Continue processing as a workflow question
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
    /// Reset session counters
    Clear,
    /// No output needed
    None,
}

/// Parse and handle special commands
pub fn handle_command(input: &str, config: &Config, runs: usize) -> Result<CommandResult> {
    let input = input.trim();
    let cmd = input.split_whitespace().next().unwrap_or("").to_lowercase();

    match cmd.as_str() {
        "exit" | "quit" | "q" => Ok(CommandResult::Exit),

        "clear" | "reset" => Ok(CommandResult::Clear),

        "help" | "?" => Ok(CommandResult::Handled(help_text())),

        "status" => {
            let status = format!(
                "apiscout status:\n\
                 ─────────────────────────────\n\
                 Gateway:     {}\n\
                 Discovery:   {}\n\
                 Consumption: {}\n\
                 Provider:    {} (approval: {:?})\n\
                 Runs:        {}",
                config.gateway.base_url,
                config.models.discovery,
                config.models.consumption,
                config.remote.provider_label,
                config.remote.approval,
                runs,
            );
            Ok(CommandResult::Handled(status))
        }

        "config" => {
            let toml_str = toml::to_string_pretty(config)
                .unwrap_or_else(|_| "# error rendering config".to_string());
            Ok(CommandResult::Handled(toml_str))
        }

        "save" => {
            let path = config.save_and_get_path()?;
            Ok(CommandResult::Handled(format!(
                "Configuration saved to {}",
                path.display()
            )))
        }

        _ => {
            if input.starts_with('/') {
                Ok(CommandResult::Handled(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    cmd
                )))
            } else {
                Ok(CommandResult::Continue(input.to_string()))
            }
        }
    }
}

/// Generate help text
fn help_text() -> String {
    r#"apiscout commands:
─────────────────────────────────────────────
  help, ?          Show this help message
  exit, quit, q    Exit apiscout
  clear, reset     Reset the session run counter
  status           Show current configuration
  config           Print the active config as TOML
  save             Write the active config to disk

Anything else is run as a question: the discovery
agent finds a free public API for it, then the
consumption agent answers using that API.
─────────────────────────────────────────────"#
        .to_string()
}
