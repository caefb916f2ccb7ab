use clap::{Parser, Subcommand};

mod db;
mod registration;
mod report;
mod room;
mod user;

#[derive(Debug, Parser)]
#[command(name = "dormitory-app", about = "Dormitory administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Room(room::RoomCommand),
    Report(report::ReportCommand),
    Registration(registration::RegistrationCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Room(command) => room::run(command).await,
            Commands::Report(command) => report::run(command).await,
            Commands::Registration(command) => registration::run(command).await,
        }
    }
}
