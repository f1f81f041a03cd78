use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use rpctweak_core::ResponseMode;
use rpctweak_http::runtime::{RpcSimRuntime, RuntimeConfigBuilder, shutdown_signal};

#[derive(Parser, Debug)]
#[command(name = "rpctweak", version)]
#[command(about = "RPC Tweak - response-mode simulator for testing RPC clients")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the simulator server
    Serve {
        /// Socket address to bind (overrides RPCTWEAK_BIND_ADDR)
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// Initial response mode 0-4 (overrides RPCTWEAK_MODE; out-of-range
        /// values are treated as 0)
        #[arg(long)]
        mode: Option<i64>,
    },
    /// Print the response mode catalog
    Modes,
}

fn init_logging() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter, // fallback to default if parsing fails
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, mode } => {
            let mut builder = RuntimeConfigBuilder::from_env()?;
            if let Some(bind) = bind {
                builder = builder.bind_addr(bind);
            }
            if let Some(mode) = mode {
                builder = builder.initial_mode(ResponseMode::from_raw(mode));
            }
            let config = builder.build()?;

            let runtime = RpcSimRuntime::new(&config);
            let router = runtime.router_with_config(&config);

            let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
            tracing::info!(
                addr = %config.bind_addr,
                mode = config.initial_mode.as_u8(),
                "rpctweak listening"
            );

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::Modes => {
            for info in ResponseMode::catalog() {
                println!("{}: {}\n    {}", info.mode, info.label, info.description);
            }
        }
    }

    Ok(())
}
