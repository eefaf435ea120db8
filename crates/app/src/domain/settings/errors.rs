//! Settings service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsServiceError {
    #[error("promotion settings row is missing")]
    Missing,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SettingsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::Missing,
            error => Self::Sql(error),
        }
    }
}
