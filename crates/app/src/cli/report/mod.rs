use clap::{Args, Subcommand};

mod transactions;

#[derive(Debug, Args)]
pub(crate) struct ReportCommand {
    #[command(subcommand)]
    command: ReportSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReportSubcommand {
    /// Print billable stays as a table
    Transactions(transactions::TransactionsArgs),
}

pub(crate) async fn run(command: ReportCommand) -> Result<(), String> {
    match command.command {
        ReportSubcommand::Transactions(args) => transactions::run(args).await,
    }
}
