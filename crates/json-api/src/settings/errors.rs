//! Settings Errors

use salvo::http::StatusError;
use tracing::error;

use souq_app::domain::settings::SettingsServiceError;

pub(crate) fn into_status_error(error: SettingsServiceError) -> StatusError {
    match error {
        SettingsServiceError::Missing => {
            error!("promotion settings row is missing, run migrations");

            StatusError::internal_server_error()
        }
        SettingsServiceError::Sql(source) => {
            error!("settings storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
