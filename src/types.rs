//! Core types
//!
//! This module defines the data structures shared by the pipeline:
//! - Room and student input records
//! - SQL values and rows
//! - Tabular query results

use chrono::{NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Format birthdays are stored in; understood by SQLite's `julianday()`
pub const BIRTHDAY_STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Room record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room id (primary key)
    pub id: i64,

    /// Room label
    pub name: String,
}

impl Room {
    /// Create a new room
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Student sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

/// Student record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Student {
    /// Student id (primary key)
    pub id: i64,

    /// Student name
    pub name: String,

    /// Date of birth
    #[serde(deserialize_with = "deserialize_birthday")]
    pub birthday: NaiveDateTime,

    /// Sex, `"M"` or `"F"` in input files
    pub sex: Sex,

    /// Owning room id; named `room` in input files
    #[serde(rename = "room")]
    pub room_id: i64,
}

impl Student {
    /// Create a new student born at midnight on `birthday`
    pub fn new(
        id: i64,
        name: impl Into<String>,
        birthday: NaiveDate,
        sex: Sex,
        room_id: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            birthday: birthday.and_time(chrono::NaiveTime::MIN),
            sex,
            room_id,
        }
    }

    /// Birthday as stored in the `students.birthday` column
    pub fn birthday_column(&self) -> String {
        self.birthday.format(BIRTHDAY_STORAGE_FORMAT).to_string()
    }
}

/// Parse a birthday in any of the accepted input layouts
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.ffffff]` and
/// `YYYY-MM-DD HH:MM:SS[.ffffff]`.
pub fn parse_birthday(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}

fn deserialize_birthday<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_birthday(&raw).ok_or_else(|| de::Error::custom(format!("invalid birthday '{}'", raw)))
}

/// SQL value types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// 64-bit integer
    Integer(i64),

    /// Floating point number
    Real(f64),

    /// Text value
    Text(String),

    /// NULL value
    Null,
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers are widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
            Value::Null => Ok(()),
        }
    }
}

impl From<rusqlite::types::ValueRef<'_>> for Value {
    fn from(value: rusqlite::types::ValueRef<'_>) -> Self {
        use rusqlite::types::ValueRef;

        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Value::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

/// Result row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row values, in column order
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Get value at column index
    pub fn get_value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Query result
///
/// Ordered rows with named columns, as produced by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names in the result
    pub columns: Vec<String>,

    /// Result rows
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the result
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get number of rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of `column` in row `row`
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get_value(index)
    }

    /// All values of one column, top to bottom
    pub fn column_values(&self, column: &str) -> Vec<&Value> {
        match self.column_index(column) {
            Some(index) => self
                .rows
                .iter()
                .filter_map(|row| row.get_value(index))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birthday_layouts() {
        let expected = NaiveDate::from_ymd_opt(2011, 8, 22)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(parse_birthday("2011-08-22"), Some(expected));
        assert_eq!(parse_birthday("2011-08-22T00:00:00.000000"), Some(expected));
        assert_eq!(parse_birthday("2011-08-22T00:00:00"), Some(expected));
        assert_eq!(parse_birthday("2011-08-22 00:00:00"), Some(expected));
        assert_eq!(parse_birthday("22/08/2011"), None);
        assert_eq!(parse_birthday("2011-02-30"), None);
    }

    #[test]
    fn test_student_deserialize() {
        let student: Student = serde_json::from_str(
            r#"{"id": 3, "name": "Peggy Ryan", "birthday": "2011-08-22T00:00:00.000000", "sex": "F", "room": 473}"#,
        )
        .unwrap();

        assert_eq!(student.id, 3);
        assert_eq!(student.sex, Sex::Female);
        assert_eq!(student.room_id, 473);
        assert_eq!(student.birthday_column(), "2011-08-22 00:00:00");
    }

    #[test]
    fn test_student_deserialize_rejects_bad_fields() {
        let bad_sex = r#"{"id": 1, "name": "A", "birthday": "2000-01-01", "sex": "X", "room": 1}"#;
        assert!(serde_json::from_str::<Student>(bad_sex).is_err());

        let bad_date = r#"{"id": 1, "name": "A", "birthday": "yesterday", "sex": "M", "room": 1}"#;
        assert!(serde_json::from_str::<Student>(bad_date).is_err());

        let missing_room = r#"{"id": 1, "name": "A", "birthday": "2000-01-01", "sex": "M"}"#;
        assert!(serde_json::from_str::<Student>(missing_room).is_err());
    }

    #[test]
    fn test_value_serialize() {
        assert_eq!(serde_json::to_string(&Value::Integer(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&Value::Real(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Value::Text("A".into())).unwrap(), "\"A\"");
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
    }

    #[test]
    fn test_query_result_lookup() {
        let mut result = QueryResult::new(vec!["room".to_string(), "count".to_string()]);
        result.add_row(Row::new(vec![Value::Integer(1), Value::Integer(2)]));
        result.add_row(Row::new(vec![Value::Integer(2), Value::Integer(0)]));

        assert_eq!(result.num_rows(), 2);
        assert_eq!(result.value(1, "count"), Some(&Value::Integer(0)));
        assert_eq!(result.value(0, "missing"), None);
        assert_eq!(result.column_values("room").len(), 2);
    }
}
