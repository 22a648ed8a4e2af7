//! wasmdev — compile, serve and deploy WASM binaries for local
//! development.
//!
//! # Startup order
//! logging → config (file, then flag overrides) → listener → server.
//! Any startup error is fatal; request-level errors never are.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use wasmdev::build::{Builder, CommandBuilder};
use wasmdev::config::{load_config, DevConfig};
use wasmdev::deploy::{render_output, DeployClient};
use wasmdev::http::DevServer;
use wasmdev::lifecycle;
use wasmdev::observability::init_logging;
use wasmdev::pages::TemplatePages;

#[derive(Parser)]
#[command(name = "wasmdev")]
#[command(about = "Compile, serve and deploy WASM binaries for local development", long_about = None)]
struct Cli {
    /// TOML config file; flags override file values.
    #[arg(short = 'f', long, global = true)]
    config: Option<PathBuf>,

    /// Emit debug-level diagnostics (build timings, cache hits).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile on demand and serve over HTTP
    Serve {
        /// Source package or directory to compile
        path: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Cache the first successful build for the whole session
        #[arg(long)]
        cache: bool,

        /// Open a browser at the root URL after startup
        #[arg(short, long)]
        open: bool,

        /// Compiler command to invoke
        #[arg(long)]
        command: Option<String>,

        /// Extra compiler flags, whitespace separated
        #[arg(long)]
        flags: Option<String>,

        /// Build tags passed to the compiler
        #[arg(long)]
        build_tags: Option<String>,
    },
    /// Compile and push the artifact to the hosting service
    Deploy {
        /// Source package or directory to compile
        path: Option<String>,

        /// Output template. Variables: {page}, {script}, {loader}, {binary}
        #[arg(short, long)]
        template: Option<String>,

        /// Print all template variables as a JSON blob
        #[arg(short, long)]
        json: bool,
    },
    /// Show client version number
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Version) {
        println!("{}", wasmdev::CLIENT_VERSION);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DevConfig::default(),
    };
    config.observability.verbose |= cli.verbose;
    init_logging(&config.observability);

    match cli.command {
        Commands::Serve {
            path,
            port,
            cache,
            open,
            command,
            flags,
            build_tags,
        } => {
            if let Some(path) = path {
                config.build.path = path;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(command) = command {
                config.build.command = command;
            }
            if let Some(flags) = flags {
                config.build.flags = flags;
            }
            if let Some(build_tags) = build_tags {
                config.build.build_tags = build_tags;
            }
            config.server.cache |= cache;
            config.server.open |= open;

            serve(config).await
        }
        Commands::Deploy {
            path,
            template,
            json,
        } => {
            if let Some(path) = path {
                config.build.path = path;
            }
            if let Some(template) = template {
                config.deploy.template = template;
            }
            config.deploy.json |= json;

            deploy(config).await
        }
        Commands::Version => unreachable!("handled before logging init"),
    }
}

/// Run the dev server until an interrupt or termination signal.
async fn serve(config: DevConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.server.port;
    let open = config.server.open;

    // Listener startup failure (e.g. port in use) is fatal.
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;

    if open {
        lifecycle::browser::open(&format!("http://localhost:{port}/"));
    }

    let builder = Arc::new(CommandBuilder::new(config.build.clone()));
    let pages = Arc::new(TemplatePages::new());
    let server = DevServer::new(config, builder, pages);

    server.run(listener, lifecycle::shutdown_signal()).await?;
    Ok(())
}

/// Compile once and push the artifact to the hosting service.
async fn deploy(config: DevConfig) -> Result<(), Box<dyn std::error::Error>> {
    let builder = CommandBuilder::new(config.build.clone());
    let artifact = tokio::task::spawn_blocking(move || builder.build()).await??;
    tracing::info!(hash = %artifact.hash_hex(), "Compiled WASM binary");

    let client = DeployClient::new(&config.deploy.host)?;
    let deployment = client.push(&artifact, &TemplatePages::new()).await?;

    println!("{}", render_output(&config.deploy, &deployment)?);
    Ok(())
}
