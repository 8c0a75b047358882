//! CLI command definitions using clap.
//!
//! Subcommands:
//! - serve: run the tool daemon on a Unix socket
//! - tools: list registered tools
//! - invoke: call a tool by name with JSON arguments
//! - route: map free text to a tool selection, optionally invoking it
//!
//! The tools/invoke/route commands run in-process against a standard
//! registry by default; with --socket they go through a running daemon.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolbelt - tool invocation daemon with keyword-based intent routing
#[derive(Parser, Debug)]
#[command(name = "toolbelt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the tool daemon
    Serve {
        /// Unix socket path to listen on
        #[arg(short, long)]
        socket: Option<PathBuf>,
    },

    /// List registered tools
    Tools {
        /// Talk to a running daemon instead of running in-process
        #[arg(short, long)]
        socket: Option<PathBuf>,
    },

    /// Invoke a tool by name
    Invoke {
        /// Tool name (e.g. echo, calculate)
        tool: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,

        /// Talk to a running daemon instead of running in-process
        #[arg(short, long)]
        socket: Option<PathBuf>,
    },

    /// Route free text to a tool selection
    Route {
        /// Natural-language input
        text: String,

        /// Also invoke the selected tool
        #[arg(long)]
        call: bool,

        /// Talk to a running daemon instead of running in-process
        #[arg(short, long)]
        socket: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_invoke_defaults_args() {
        let cli = Cli::parse_from(["toolbelt", "invoke", "echo"]);
        match cli.command {
            Commands::Invoke { tool, args, socket } => {
                assert_eq!(tool, "echo");
                assert_eq!(args, "{}");
                assert!(socket.is_none());
            }
            _ => panic!("expected invoke command"),
        }
    }

    #[test]
    fn test_route_with_call() {
        let cli = Cli::parse_from(["toolbelt", "route", "计算一下", "--call"]);
        match cli.command {
            Commands::Route { text, call, .. } => {
                assert_eq!(text, "计算一下");
                assert!(call);
            }
            _ => panic!("expected route command"),
        }
    }

    #[test]
    fn test_serve_with_socket() {
        let cli = Cli::parse_from(["toolbelt", "serve", "--socket", "/tmp/tb.sock"]);
        match cli.command {
            Commands::Serve { socket } => {
                assert_eq!(socket, Some(PathBuf::from("/tmp/tb.sock")));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["toolbelt", "--verbose", "tools"]);
        assert!(cli.is_verbose());
    }
}
