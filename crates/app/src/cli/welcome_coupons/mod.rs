use clap::{Args, Subcommand};

mod backfill;

#[derive(Debug, Args)]
pub(crate) struct WelcomeCouponsCommand {
    #[command(subcommand)]
    command: WelcomeCouponsSubcommand,
}

#[derive(Debug, Subcommand)]
enum WelcomeCouponsSubcommand {
    /// Assign active welcome coupons to users that do not have them yet
    Backfill(backfill::BackfillArgs),
}

pub(crate) async fn run(command: WelcomeCouponsCommand) -> Result<(), String> {
    match command.command {
        WelcomeCouponsSubcommand::Backfill(args) => backfill::run(args).await,
    }
}
