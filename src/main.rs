use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "riskline",
    about = "Growth-curve and content API behind the investment journey wizard"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API and the embedded chart page.
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = riskline::api::run_http_server(port).await {
                log::error!("server error: {e}");
                std::process::exit(1);
            }
        }
    }
}
