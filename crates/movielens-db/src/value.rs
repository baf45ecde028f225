//! # Row Values
//!
//! The primitives hand rows back as ordered tuples of [`SqlValue`]s, one per
//! selected column, without knowing what the query meant. The repositories
//! then pick columns out by position with the typed accessors on [`SqlRow`].
//!
//! ```text
//! SELECT Movie_ID, Title, CAST(strftime('%Y', Release_Date) AS INTEGER) ...
//!           │        │                     │
//!           ▼        ▼                     ▼
//! SqlRow [ Integer(5), Text("Heat"), Integer(1995) ]
//!           │        │                     │
//!      i64_at(0)  text_at(1)         opt_i32_at(2)
//! ```

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

use movielens_core::Quantity;

use crate::error::{DbError, DbResult};

// =============================================================================
// SqlValue
// =============================================================================

/// One SQLite value, tagged with its storage class.
///
/// Also used for query parameters, so a query can be called with
/// `&[movie_id.into(), rating.into()]`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Storage class name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Integer(_) => "integer",
            SqlValue::Real(_) => "real",
            SqlValue::Text(_) => "text",
            SqlValue::Blob(_) => "blob",
        }
    }

    /// Extract as i64 if the value is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as f64 if the value is numeric. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Real(v) => Some(*v),
            SqlValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Borrow as str if the value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

// =============================================================================
// SqlRow
// =============================================================================

/// An ordered tuple of column values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlRow {
    values: Vec<SqlValue>,
}

impl SqlRow {
    fn at(&self, index: usize) -> DbResult<&SqlValue> {
        self.values
            .get(index)
            .ok_or_else(|| DbError::decode(index, "a column", "end of row"))
    }

    /// Non-null integer column.
    pub fn i64_at(&self, index: usize) -> DbResult<i64> {
        let value = self.at(index)?;
        value
            .as_i64()
            .ok_or_else(|| DbError::decode(index, "integer", value.type_name()))
    }

    /// Nullable integer column.
    pub fn opt_i64_at(&self, index: usize) -> DbResult<Option<i64>> {
        match self.at(index)? {
            SqlValue::Null => Ok(None),
            _ => self.i64_at(index).map(Some),
        }
    }

    /// Nullable integer column narrowed to i32 (years).
    pub fn opt_i32_at(&self, index: usize) -> DbResult<Option<i32>> {
        match self.opt_i64_at(index)? {
            None => Ok(None),
            Some(v) => i32::try_from(v)
                .map(Some)
                .map_err(|_| DbError::decode(index, "32-bit integer", "integer")),
        }
    }

    /// Nullable numeric column that is usually whole.
    ///
    /// Accepts INTEGER or REAL storage; integral reals come back as
    /// [`Quantity::Whole`].
    pub fn opt_quantity_at(&self, index: usize) -> DbResult<Option<Quantity>> {
        match self.at(index)? {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(v) => Ok(Some(Quantity::Whole(*v))),
            SqlValue::Real(v) => Ok(Some(Quantity::from_real(*v))),
            other => Err(DbError::decode(index, "number", other.type_name())),
        }
    }

    /// Non-null numeric column as f64.
    pub fn f64_at(&self, index: usize) -> DbResult<f64> {
        let value = self.at(index)?;
        value
            .as_f64()
            .ok_or_else(|| DbError::decode(index, "real", value.type_name()))
    }

    /// Non-null text column.
    pub fn text_at(&self, index: usize) -> DbResult<String> {
        let value = self.at(index)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DbError::decode(index, "text", value.type_name()))
    }

    /// Nullable text column.
    pub fn opt_text_at(&self, index: usize) -> DbResult<Option<String>> {
        match self.at(index)? {
            SqlValue::Null => Ok(None),
            _ => self.text_at(index).map(Some),
        }
    }
}

impl From<Vec<SqlValue>> for SqlRow {
    fn from(values: Vec<SqlValue>) -> Self {
        SqlRow { values }
    }
}

/// Converts a driver row into an [`SqlRow`].
///
/// SQLite is dynamically typed, so the storage class is read per value
/// rather than from the declared column type.
pub(crate) fn decode_row(row: &SqliteRow) -> DbResult<SqlRow> {
    let mut values = Vec::with_capacity(row.len());

    for index in 0..row.len() {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            values.push(SqlValue::Null);
            continue;
        }

        let type_name = raw.type_info().name().to_string();
        let value = match type_name.as_str() {
            "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
            "REAL" | "NUMERIC" => SqlValue::Real(row.try_get_unchecked::<f64, _>(index)?),
            "BLOB" => SqlValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
            _ => SqlValue::Text(row.try_get_unchecked::<String, _>(index)?),
        };
        values.push(value);
    }

    Ok(SqlRow { values })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> SqlRow {
        SqlRow::from(vec![
            SqlValue::Integer(5),
            SqlValue::Text("Heat".to_string()),
            SqlValue::Null,
            SqlValue::Real(9.0),
        ])
    }

    #[test]
    fn test_typed_accessors() {
        let row = sample_row();
        assert_eq!(row.i64_at(0).unwrap(), 5);
        assert_eq!(row.text_at(1).unwrap(), "Heat");
        assert_eq!(row.opt_text_at(2).unwrap(), None);
        assert_eq!(row.opt_i64_at(2).unwrap(), None);
        assert!((row.f64_at(3).unwrap() - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_integer_widens_to_real() {
        let row = sample_row();
        assert!((row.f64_at(0).unwrap() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_type_mismatch_is_decode_error() {
        let row = sample_row();
        assert!(matches!(
            row.i64_at(1),
            Err(DbError::Decode {
                index: 1,
                expected: "integer",
                found: "text"
            })
        ));
        assert!(row.text_at(2).is_err());
    }

    #[test]
    fn test_quantity_accepts_integer_and_real() {
        let row = SqlRow::from(vec![
            SqlValue::Integer(121),
            SqlValue::Real(1.5e6),
            SqlValue::Real(95.5),
            SqlValue::Null,
            SqlValue::Text("long".to_string()),
        ]);
        assert_eq!(row.opt_quantity_at(0).unwrap(), Some(Quantity::Whole(121)));
        assert_eq!(row.opt_quantity_at(1).unwrap(), Some(Quantity::Whole(1_500_000)));
        assert_eq!(row.opt_quantity_at(2).unwrap(), Some(Quantity::Fractional(95.5)));
        assert_eq!(row.opt_quantity_at(3).unwrap(), None);
        assert!(matches!(
            row.opt_quantity_at(4),
            Err(DbError::Decode { index: 4, expected: "number", found: "text" })
        ));
    }

    #[test]
    fn test_out_of_bounds_is_decode_error() {
        let row = sample_row();
        assert!(matches!(row.i64_at(9), Err(DbError::Decode { index: 9, .. })));
    }

    #[test]
    fn test_param_conversions() {
        assert_eq!(SqlValue::from(7_i64), SqlValue::Integer(7));
        assert_eq!(SqlValue::from(7_u32), SqlValue::Integer(7));
        assert_eq!(SqlValue::from("x"), SqlValue::Text("x".to_string()));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
    }
}
