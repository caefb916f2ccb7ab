use clap::{Args, Subcommand};

mod sweep;

#[derive(Debug, Args)]
pub(crate) struct RegistrationCommand {
    #[command(subcommand)]
    command: RegistrationSubcommand,
}

#[derive(Debug, Subcommand)]
enum RegistrationSubcommand {
    /// Delete sign-ups whose verification codes have expired
    Sweep(sweep::SweepArgs),
}

pub(crate) async fn run(command: RegistrationCommand) -> Result<(), String> {
    match command.command {
        RegistrationSubcommand::Sweep(args) => sweep::run(args).await,
    }
}
