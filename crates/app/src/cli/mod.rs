use clap::{Parser, Subcommand};

mod db;
mod offers;
mod welcome_coupons;

#[derive(Debug, Parser)]
#[command(name = "souq-app", about = "Souq CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Offers(offers::OffersCommand),
    WelcomeCoupons(welcome_coupons::WelcomeCouponsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Offers(command) => offers::run(command).await,
            Commands::WelcomeCoupons(command) => welcome_coupons::run(command).await,
        }
    }
}
