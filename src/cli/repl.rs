//! Interactive REPL for apiscout
//!
//! Each input line runs one full discovery-then-consumption workflow.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::agent::Workflow;
use crate::cli::commands::{handle_command, CommandResult};
use crate::core::{Config, Result};
use crate::runner::GatewayRunner;

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    config: Config,
    workflow: Workflow,
    runs: usize,
}

impl Repl {
    /// Create a new REPL with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::load())
    }

    /// Create a REPL with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let runner = Arc::new(GatewayRunner::from_config(&config));
        let workflow = Workflow::from_config(&config, runner)?;

        Ok(Self {
            config,
            workflow,
            runs: 0,
        })
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            match handle_command(input, &self.config, self.runs)? {
                CommandResult::Exit => {
                    println!("\nGoodbye!");
                    break;
                }
                CommandResult::Clear => {
                    self.runs = 0;
                    println!("Session counters reset.\n");
                }
                CommandResult::Handled(output) => {
                    println!("{}\n", output);
                }
                CommandResult::None => {}
                CommandResult::Continue(question) => {
                    match self.workflow.run_detailed(&question).await {
                        Ok(report) => {
                            self.runs += 1;
                            println!("\nAnswer:\n{}\n", report.output.output_text);
                            println!(
                                "({} log items, API docs {} chars)\n",
                                report.log.len(),
                                report.api_docs.len()
                            );
                        }
                        Err(e) => {
                            eprintln!("\nError: {}\n", e);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        println!(
            r#"
╔═══════════════════════════════════════════════╗
║  apiscout — find a free API, answer with it   ║
╚═══════════════════════════════════════════════╝"#
        );
        println!("Gateway:     {}", self.config.gateway.base_url);
        println!("Models:");
        println!("  Discovery:   {}", self.config.models.discovery);
        println!("  Consumption: {}", self.config.models.consumption);
        println!();
        println!("Commands: help, status, config, save, clear, exit");
        println!("───────────────────────────────────────────────");
    }
}
