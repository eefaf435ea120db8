//! Depot helper extensions.

use std::any::{Any, type_name};

use salvo::prelude::{Depot, StatusError};
use tracing::error;

/// Typed depot lookups that fail as HTTP 500.
pub(crate) trait DepotExt {
    /// Fetch a value injected by middleware, such as the shared app state.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_missing| {
            error!(value = type_name::<T>(), "missing from depot");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::prelude::StatusCode;

    use super::*;

    #[test]
    fn injected_value_is_returned() {
        let mut depot = Depot::new();

        depot.inject(42_u32);

        assert_eq!(depot.obtain_or_500::<u32>().ok(), Some(&42));
    }

    #[test]
    fn missing_value_is_internal_server_error() {
        let depot = Depot::new();

        let error = depot.obtain_or_500::<String>().err();

        assert_eq!(
            error.map(|error| error.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
