//! apiscout - Two-Stage API Discovery Agent Workflow
//!
//! Main entry point for the CLI application.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apiscout::{Config, GatewayRunner, Repl, Workflow};

/// apiscout - discover a free public API, then answer with it
#[derive(Parser, Debug)]
#[command(name = "apiscout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Question to answer (non-interactive)
    #[arg(long, short = 'q')]
    question: Option<String>,

    /// Model for the discovery agent
    #[arg(long)]
    discovery_model: Option<String>,

    /// Model for the consumption agent
    #[arg(long)]
    consumption_model: Option<String>,

    /// Base URL of the agent-execution gateway
    #[arg(long)]
    gateway_url: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.discovery_model {
        config.models.discovery = model.clone();
    }

    if let Some(ref model) = args.consumption_model {
        config.models.consumption = model.clone();
    }

    if let Some(ref url) = args.gateway_url {
        config.gateway.base_url = url.clone();
    }

    if args.debug {
        config.workflow.debug = true;
    }

    init_tracing(config.workflow.debug);

    // Single question mode
    if let Some(question) = args.question {
        let runner = Arc::new(GatewayRunner::from_config(&config));
        let workflow = Workflow::from_config(&config, runner)?;

        let output = workflow.run(&question).await?;
        println!("{}", output.output_text);
        return Ok(());
    }

    // Interactive REPL mode
    let mut repl = Repl::with_config(config)?;
    repl.run().await?;

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "apiscout=debug" } else { "apiscout=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
