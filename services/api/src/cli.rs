use crate::commands::{
    run_catalog_list, run_catalog_validate, run_match, CatalogListArgs, CatalogValidateArgs,
    MatchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use scheme_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Scheme Match",
    about = "Match applicants to government welfare schemes from the command line",
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
    /// Rank every scheme for a single applicant profile
    Match(MatchArgs),
    /// Inspect or validate a scheme catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Load a catalog file and report the first malformed record, if any
    Validate(CatalogValidateArgs),
    /// List catalog schemes, optionally filtered
    List(CatalogListArgs),
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
        Command::Match(args) => run_match(args),
        Command::Catalog {
            command: CatalogCommand::Validate(args),
        } => run_catalog_validate(args),
        Command::Catalog {
            command: CatalogCommand::List(args),
        } => run_catalog_list(args),
    }
}
