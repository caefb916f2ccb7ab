use clap::{Args, Subcommand};

mod import;

#[derive(Debug, Args)]
pub(crate) struct RoomCommand {
    #[command(subcommand)]
    command: RoomSubcommand,
}

#[derive(Debug, Subcommand)]
enum RoomSubcommand {
    /// Create rooms listed in a YAML file
    Import(import::ImportRoomsArgs),
}

pub(crate) async fn run(command: RoomCommand) -> Result<(), String> {
    match command.command {
        RoomSubcommand::Import(args) => import::run(args).await,
    }
}
