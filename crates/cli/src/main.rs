//! revroute CLI: the main entry point.
//!
//! Commands:
//! - `classify`: Classify one request against a workspace snapshot
//! - `patterns`: List the deterministic command table

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "revroute",
    about = "revroute: request classification and freshness-aware dispatch",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a request and print the routing decision as JSON
    Classify {
        /// Workspace whose state snapshot to consult
        #[arg(short, long)]
        workspace: String,

        /// Directory holding `<workspace>.json` snapshots
        #[arg(long, env = "REVROUTE_STATE_DIR")]
        state_dir: Option<PathBuf>,

        /// Config file (defaults to ~/.revroute/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scope type currently shown in the UI (deal, rep, pipeline, ...)
        #[arg(long)]
        scope_type: Option<String>,

        /// Entity currently shown in the UI
        #[arg(long)]
        scope_entity: Option<String>,

        /// Where the request came from (slack, web, ...)
        #[arg(long)]
        source: Option<String>,

        /// Recent conversation text
        #[arg(long)]
        thread_context: Option<String>,

        /// The user's request
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List the pre-routed command patterns
    Patterns,
}

/// Default log level when `RUST_LOG` is unset.
fn log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable JSON
    let filter = log_filter(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Classify {
            workspace,
            state_dir,
            config,
            scope_type,
            scope_entity,
            source,
            thread_context,
            text,
        } => {
            let args = commands::classify::ClassifyArgs {
                workspace,
                state_dir,
                config,
                text: text.join(" "),
                context: commands::classify::ui_context(
                    scope_type,
                    scope_entity,
                    source,
                    thread_context,
                ),
            };
            commands::classify::run(args).await?
        }
        Commands::Patterns => commands::patterns::run()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_level_is_info() {
        assert_eq!(log_filter(false), "info");
        assert_eq!(log_filter(true), "debug");
    }

    #[test]
    fn classify_args_parse() {
        let cli = Cli::parse_from([
            "revroute", "classify", "--workspace", "ws-1", "--scope-type", "deal", "run", "it",
        ]);
        match cli.command {
            Commands::Classify { workspace, scope_type, text, .. } => {
                assert_eq!(workspace, "ws-1");
                assert_eq!(scope_type.as_deref(), Some("deal"));
                assert_eq!(text, vec!["run", "it"]);
            }
            Commands::Patterns => panic!("expected classify"),
        }
    }
}
