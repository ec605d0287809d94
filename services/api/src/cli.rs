use crate::commands::{run_score, run_validate, ScoreArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use customer_score::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Customer Score",
    about = "Register customers and compute credit scores from the command line",
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
    /// Compute a score from income and birth date without registering a customer
    Score(ScoreArgs),
    /// Check customer fields and print the first violated rule
    Validate(ValidateArgs),
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
        Command::Score(args) => {
            run_score(args);
            Ok(())
        }
        Command::Validate(args) => run_validate(args),
    }
}
