use clap::Args;
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use souq_app::{
    database::{self, Db},
    domain::offers::{OffersService, PgOffersService},
};

#[derive(Debug, Args)]
pub(crate) struct ActiveOffersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Evaluation date (YYYY-MM-DD); today in UTC when omitted
    #[arg(long)]
    on: Option<Date>,
}

pub(crate) async fn run(args: ActiveOffersArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let on = args
        .on
        .unwrap_or_else(|| Timestamp::now().to_zoned(TimeZone::UTC).date());

    let offers = PgOffersService::new(Db::new(pool))
        .list_active_offers(on)
        .await
        .map_err(|error| format!("failed to list offers: {error}"))?;

    if offers.is_empty() {
        println!("no offers live on {on}");
        return Ok(());
    }

    for record in offers {
        let terms = &record.offer.terms;

        println!("offer_uuid: {}", record.uuid());
        println!("title: {}", terms.title);
        println!("priority: {}", terms.priority);
        println!("window: {} .. {}", terms.start_date, terms.end_date);
        println!(
            "codes: {}",
            terms
                .tiers
                .iter()
                .map(|tier| format!("{}*", tier.code_stem()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    Ok(())
}
