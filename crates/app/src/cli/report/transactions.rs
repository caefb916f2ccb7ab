use clap::Args;
use dormitory::dashboard::DateFilter;
use dormitory_app::{
    assignments::{AssignmentsService, PgAssignmentsService, models::PrintTransaction},
    database::{self, Db},
};
use jiff::{civil::Date, tz::TimeZone};
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct TransactionsArgs {
    /// Only stays ending on or after this date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<Date>,

    /// Only stays starting on or before this date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<Date>,

    /// IANA time zone used to turn check-in and check-out times into dates
    #[arg(long, env = "DASHBOARD_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

fn render(transactions: &[PrintTransaction]) -> Table {
    let mut builder = Builder::default();

    builder.push_record([
        "Reference", "Tenant", "Email", "Room", "Status", "Check-in", "Check-out", "Days",
        "Total",
    ]);

    for transaction in transactions {
        builder.push_record([
            transaction.reference.clone(),
            transaction.tenant_name.clone(),
            transaction.tenant_email.clone(),
            transaction.room_number.clone(),
            transaction.status.to_string(),
            transaction.check_in.to_string(),
            transaction.check_out.to_string(),
            transaction.duration_days.to_string(),
            transaction
                .total_price
                .map_or_else(|| "-".to_string(), |price| price.to_string()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(7..9), Alignment::right());

    table
}

pub(crate) async fn run(args: TransactionsArgs) -> Result<(), String> {
    let filter =
        DateFilter::new(args.start, args.end).map_err(|error| format!("invalid range: {error}"))?;

    let tz = TimeZone::get(&args.timezone)
        .map_err(|error| format!("unknown time zone {}: {error}", args.timezone))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAssignmentsService::new(Db::new(pool), tz);

    let transactions = service
        .list_print_transactions(filter)
        .await
        .map_err(|error| format!("failed to load transactions: {error}"))?;

    if transactions.is_empty() {
        println!("no transactions found");
        return Ok(());
    }

    println!("{}", render(&transactions));

    Ok(())
}
