//! Evaluation date query parsing helpers.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

/// Today's date in UTC, the calendar offers are evaluated against.
fn today() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}

pub(crate) trait EvaluationDateExt {
    fn into_evaluation_date(self) -> Result<Date, StatusError>;
}

impl EvaluationDateExt for QueryParam<String, false> {
    fn into_evaluation_date(self) -> Result<Date, StatusError> {
        self.into_inner()
            .map(|value| value.parse::<Date>())
            .transpose()
            .or_400("could not parse \"on\" query parameter")
            .map(|date| date.unwrap_or_else(today))
    }
}
