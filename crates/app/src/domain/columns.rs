//! Column conversion helpers shared by the repositories.

use std::{fmt::Display, str::FromStr};

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Row, postgres::PgRow};

pub(crate) fn decode_error(column: &str, error: impl Display) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: error.to_string().into(),
    }
}

/// Read a text column and parse it.
pub(crate) fn parse_column<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    row.try_get::<String, _>(column)?
        .parse()
        .map_err(|error| decode_error(column, error))
}

/// Read a nullable text column and parse it when present.
pub(crate) fn parse_optional_column<T>(row: &PgRow, column: &str) -> sqlx::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    row.try_get::<Option<String>, _>(column)?
        .map(|value| value.parse().map_err(|error| decode_error(column, error)))
        .transpose()
}

pub(crate) fn timestamp_column(row: &PgRow, column: &str) -> sqlx::Result<Timestamp> {
    Ok(row.try_get::<SqlxTimestamp, _>(column)?.to_jiff())
}

pub(crate) fn optional_timestamp_column(
    row: &PgRow,
    column: &str,
) -> sqlx::Result<Option<Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(SqlxTimestamp::to_jiff))
}

/// Read a non-negative `INTEGER` column as a count.
pub(crate) fn count_column(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|error| decode_error(column, error))
}

pub(crate) fn optional_count_column(row: &PgRow, column: &str) -> sqlx::Result<Option<u32>> {
    row.try_get::<Option<i32>, _>(column)?
        .map(|value| u32::try_from(value).map_err(|error| decode_error(column, error)))
        .transpose()
}

pub(crate) fn try_i32_from_u32(value: u32, column: &'static str) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|error| decode_error(column, error))
}

pub(crate) fn try_optional_i32_from_u32(
    value: Option<u32>,
    column: &'static str,
) -> Result<Option<i32>, sqlx::Error> {
    value.map(|v| try_i32_from_u32(v, column)).transpose()
}
