use std::sync::Arc;

use clap::Args;
use dormitory_app::{
    auth::{DEFAULT_TOKEN_TTL, LogNotifier, NewRegistration, PgAuthService, TokenSigner},
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Login password, at least 8 characters
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // The signer is never used here; admins log in through the API.
    let service = PgAuthService::new(
        Db::new(pool),
        TokenSigner::new("", DEFAULT_TOKEN_TTL),
        Arc::new(LogNotifier),
    );

    let user = service
        .create_admin(NewRegistration {
            name: args.name,
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
