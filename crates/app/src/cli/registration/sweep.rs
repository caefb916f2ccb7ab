use std::sync::Arc;

use clap::Args;
use dormitory_app::{
    auth::{AuthService, DEFAULT_TOKEN_TTL, LogNotifier, PgAuthService, TokenSigner},
    database::{self, Db},
};
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SweepArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(
        Db::new(pool),
        TokenSigner::new("", DEFAULT_TOKEN_TTL),
        Arc::new(LogNotifier),
    );

    let removed = service
        .sweep_expired_registrations(Timestamp::now())
        .await
        .map_err(|error| format!("failed to sweep registrations: {error}"))?;

    println!("removed {removed} expired registration(s)");

    Ok(())
}
