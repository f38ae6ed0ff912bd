//! Result export
//!
//! [`OutputFormat`] is the validated `--format` value; [`Exporter`] is the
//! matching serializer. Exporters never choose where output goes: callers
//! pass the destination path.
//!
//! # Example
//!
//! ```rust
//! use dorm_db::export::{Exporter, OutputFormat};
//! use dorm_db::types::QueryResult;
//!
//! let format: OutputFormat = "xml".parse()?;
//! let exporter = Exporter::from(format);
//!
//! let empty = QueryResult::new(vec!["room".to_string()]);
//! let bytes = exporter.serialize("room_occupancy", &empty)?;
//! assert!(bytes.starts_with(b"<?xml"));
//! # Ok::<(), dorm_db::Error>(())
//! ```

pub mod json;
pub mod xml;

use crate::error::{Error, Result};
use crate::types::QueryResult;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Xml,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Result serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exporter {
    Json,
    Xml,
}

impl From<OutputFormat> for Exporter {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Exporter::Json,
            OutputFormat::Xml => Exporter::Xml,
        }
    }
}

impl Exporter {
    pub fn format(&self) -> OutputFormat {
        match self {
            Exporter::Json => OutputFormat::Json,
            Exporter::Xml => OutputFormat::Xml,
        }
    }

    /// Render `result`; `name` labels the document (XML root element)
    pub fn serialize(&self, name: &str, result: &QueryResult) -> Result<Vec<u8>> {
        match self {
            Exporter::Json => json::to_json(result),
            Exporter::Xml => xml::to_xml(name, result),
        }
    }

    /// Render `result` into the file at `path`, replacing it
    pub fn write_file(&self, name: &str, result: &QueryResult, path: &Path) -> Result<()> {
        let bytes = self.serialize(name, result)?;
        let output_error = |source| Error::Output {
            path: path.to_path_buf(),
            source,
        };

        let mut file = BufWriter::new(File::create(path).map_err(output_error)?);
        file.write_all(&bytes).map_err(output_error)?;
        file.flush().map_err(output_error)?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Row, Value};

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("XML".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);

        let err = "csv".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref f) if f == "csv"));
    }

    #[test]
    fn test_exporter_dispatch() {
        let mut result = QueryResult::new(vec!["room".to_string()]);
        result.add_row(Row::new(vec![Value::Integer(1)]));

        let json = Exporter::from(OutputFormat::Json)
            .serialize("mixed_sex_rooms", &result)
            .unwrap();
        assert!(json.starts_with(b"["));

        let xml = Exporter::from(OutputFormat::Xml)
            .serialize("mixed_sex_rooms", &result)
            .unwrap();
        assert!(String::from_utf8(xml).unwrap().contains("<mixed_sex_rooms>"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room_occupancy.json");
        let result = QueryResult::new(vec!["room".to_string()]);

        Exporter::Json
            .write_file("room_occupancy", &result, &path)
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"[]\n");
    }

    #[test]
    fn test_write_file_bad_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xml");
        let result = QueryResult::new(vec!["room".to_string()]);

        let err = Exporter::Xml
            .write_file("room_occupancy", &result, &path)
            .unwrap_err();
        assert!(matches!(err, Error::Output { .. }));
    }
}
