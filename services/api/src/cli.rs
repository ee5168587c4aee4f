use crate::quote::{run_pricing, run_quote, PricingArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use enrollment_pricing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Enrollment Quote Service",
    about = "Serve and inspect tutoring package quotes from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a session package for a program level
    Quote(QuoteArgs),
    /// Print the active pricing table as JSON
    Pricing(PricingArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Pricing(args) => run_pricing(args),
    }
}
