//! Promotional Offers

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::OffersServiceError;
pub(crate) use repository::PgOffersRepository;
pub use service::*;
