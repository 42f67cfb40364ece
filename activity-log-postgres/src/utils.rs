use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, sqlx::Error>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, sqlx::Error> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| too_long(col_name, N))
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, sqlx::Error> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| too_long(col_name, N))
}

/// Converts a caller supplied string into a bounded one, rejecting oversized input.
pub fn to_heapless_string<const N: usize>(
    value: &str,
    field: &str,
) -> Result<HeaplessString<N>, activity_log_db::RepositoryError> {
    HeaplessString::from_str(value).map_err(|_| {
        activity_log_db::RepositoryError::validation(format!("Value for '{field}' is too long (max {N} chars)"))
    })
}

fn too_long(col_name: &str, max: usize) -> sqlx::Error {
    sqlx::Error::Decode(format!("Value for column '{col_name}' is too long (max {max} chars)").into())
}
