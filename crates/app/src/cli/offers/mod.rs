use clap::{Args, Subcommand};

mod active;

#[derive(Debug, Args)]
pub(crate) struct OffersCommand {
    #[command(subcommand)]
    command: OffersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OffersSubcommand {
    /// List offers live on a date, in matching order
    Active(active::ActiveOffersArgs),
}

pub(crate) async fn run(command: OffersCommand) -> Result<(), String> {
    match command.command {
        OffersSubcommand::Active(args) => active::run(args).await,
    }
}
