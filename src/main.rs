use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use lifeplan::api::{ProjectArgs, run_cli_projection, run_http_server};

#[derive(Parser, Debug)]
#[command(
    name = "lifeplan",
    about = "Lifetime cash-flow, pension and asset projection"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Run one projection and print the result as JSON.
    Project(ProjectArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Project(args) => match run_cli_projection(args) {
            Ok(json) => println!("{json}"),
            Err(msg) => {
                error!(error = %msg, "projection failed");
                std::process::exit(2);
            }
        },
    }
}
