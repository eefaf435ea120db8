use clap::Args;
use souq_app::database::{self, MIGRATOR};

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: StatusArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let applied = database::applied_migrations(&pool)
        .await
        .map_err(|error| format!("failed to read migration history: {error}"))?;

    let mut pending = 0_usize;

    for migration in MIGRATOR.iter() {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            pending += 1;
            "pending"
        };

        println!("{} {state} {}", migration.version, migration.description);
    }

    println!("{pending} pending");

    Ok(())
}
