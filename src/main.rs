use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::Commands;

use toolbelt::config::Config;
use toolbelt::ipc::{IpcClient, IpcClientConfig, IpcServer, IpcServerConfig};
use toolbelt::router::IntentRouter;
use toolbelt::tools::{Dispatcher, InvocationResponse, ToolRegistry};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolbelt")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolbelt.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Build the in-process protocol stack from config
fn build_stack(config: &Config) -> (Dispatcher, IntentRouter) {
    let registry = Arc::new(ToolRegistry::standard());
    let dispatcher = Dispatcher::new(Arc::clone(&registry), config.tool_context());
    let router = IntentRouter::new(registry);
    (dispatcher, router)
}

fn print_response(response: &InvocationResponse) {
    let text = response.text();
    if response.is_error {
        println!("{}", text.red());
    } else {
        println!("{}", text);
    }
}

async fn run_serve(socket: Option<PathBuf>, config: &Config) -> Result<()> {
    let socket_path = socket.unwrap_or_else(|| config.ipc.socket_path.clone());
    let (dispatcher, router) = build_stack(config);

    let server = IpcServer::new(
        IpcServerConfig::default().with_socket_path(&socket_path),
        dispatcher,
        router,
    );

    println!("{} {}", "Serving on".green(), socket_path.display());
    server.run().await?;
    Ok(())
}

async fn run_tools(socket: Option<PathBuf>, config: &Config) -> Result<()> {
    let definitions = match socket {
        Some(path) => {
            let client = IpcClient::connect(IpcClientConfig::with_socket(path)).await?;
            client.list_tools().await?
        }
        None => {
            let (dispatcher, _) = build_stack(config);
            dispatcher.registry().definitions()
        }
    };

    for def in definitions {
        println!("{}  {}", def.name.bold(), def.description.dimmed());
    }
    Ok(())
}

async fn run_invoke(
    tool: &str,
    args: &str,
    socket: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let arguments: Value =
        serde_json::from_str(args).context("arguments must be a JSON object")?;

    let response = match socket {
        Some(path) => {
            let client = IpcClient::connect(IpcClientConfig::with_socket(path)).await?;
            client.call_tool(tool, arguments).await?
        }
        None => {
            let (dispatcher, _) = build_stack(config);
            dispatcher.invoke(tool, &arguments).await
        }
    };

    print_response(&response);
    Ok(())
}

async fn run_route(text: &str, call: bool, socket: Option<PathBuf>, config: &Config) -> Result<()> {
    match socket {
        Some(path) => {
            let client = IpcClient::connect(IpcClientConfig::with_socket(path)).await?;
            let intent = client.route(text).await?;

            print_intent(&intent.tool_name, &intent.arguments, intent.rationale.as_deref());
            if call {
                let response = client.call_tool(&intent.tool_name, intent.arguments).await?;
                print_response(&response);
            }
        }
        None => {
            let (dispatcher, router) = build_stack(config);
            let intent = router.route(text);

            print_intent(&intent.tool_name, &intent.arguments, intent.rationale.as_deref());
            if call {
                let response = dispatcher.invoke(&intent.tool_name, &intent.arguments).await;
                print_response(&response);
            }
        }
    }
    Ok(())
}

fn print_intent(tool_name: &str, arguments: &Value, rationale: Option<&str>) {
    println!("{} {}", "tool:".bold(), tool_name);
    println!("{} {}", "args:".bold(), arguments);
    if let Some(rationale) = rationale {
        println!("{} {}", "why: ".bold(), rationale.dimmed());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match cli.command {
        Commands::Serve { socket } => run_serve(socket, &config).await,
        Commands::Tools { socket } => run_tools(socket, &config).await,
        Commands::Invoke { tool, args, socket } => run_invoke(&tool, &args, socket, &config).await,
        Commands::Route { text, call, socket } => run_route(&text, call, socket, &config).await,
    }
}
