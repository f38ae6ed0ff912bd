//! JSON rendering
//!
//! A result becomes an array of objects, one per row, with keys in column
//! order and four-space indentation.

use crate::error::{Error, Result};
use crate::types::{QueryResult, Row};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

struct Rows<'a>(&'a QueryResult);

struct RowObject<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl Serialize for Rows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.rows.len()))?;
        for row in &self.0.rows {
            seq.serialize_element(&RowObject {
                columns: &self.0.columns,
                row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(&self.row.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Serialize `result` as a pretty-printed JSON array
pub fn to_json(result: &QueryResult) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    Rows(result)
        .serialize(&mut serializer)
        .map_err(|e| Error::Serialize {
            format: "json",
            reason: e.to_string(),
        })?;
    out.push(b'\n');
    Ok(out)
}
