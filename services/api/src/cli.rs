use crate::demo::{run_demo, run_rules_list, DemoArgs, RulesListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_rules::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Rule Board",
    about = "Serve and inspect the ordered auto-loan parameter rules",
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
    /// Inspect rule boards without starting the service
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// Walk through scripted drag-and-drop gestures against the standard rules
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Print the rule board, optionally loaded from a parameter sheet
    List(RulesListArgs),
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
        Command::Rules {
            command: RulesCommand::List(args),
        } => run_rules_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
