use clap::Args;
use souq_app::{
    database::{self, Db},
    domain::welcome_coupons::{PgWelcomeCouponsService, WelcomeCouponsService},
};

#[derive(Debug, Args)]
pub(crate) struct BackfillArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: BackfillArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgWelcomeCouponsService::new(Db::new(pool));

    let assigned = service
        .backfill_assignments()
        .await
        .map_err(|error| format!("failed to backfill welcome coupons: {error}"))?;

    println!("assigned: {assigned}");

    Ok(())
}
