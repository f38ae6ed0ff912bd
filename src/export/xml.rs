//! XML rendering
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <room_occupancy>
//!     <row>
//!         <room>1</room>
//!         <name>A</name>
//!         <count>2</count>
//!     </row>
//! </room_occupancy>
//! ```
//!
//! NULL values become empty elements.

use crate::error::{Error, Result};
use crate::types::QueryResult;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Element wrapping each row
pub const ROW_ELEMENT: &str = "row";

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Serialize {
        format: "xml",
        reason: e.to_string(),
    }
}

/// Serialize `result` as an XML document rooted at `<root>`
pub fn to_xml(root: &str, result: &QueryResult) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(root)))
        .map_err(xml_error)?;

    for row in &result.rows {
        writer
            .write_event(Event::Start(BytesStart::new(ROW_ELEMENT)))
            .map_err(xml_error)?;
        for (column, value) in result.columns.iter().zip(&row.values) {
            if value.is_null() {
                writer
                    .write_event(Event::Empty(BytesStart::new(column.as_str())))
                    .map_err(xml_error)?;
                continue;
            }
            let text = value.to_string();
            writer
                .write_event(Event::Start(BytesStart::new(column.as_str())))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(column.as_str())))
                .map_err(xml_error)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(ROW_ELEMENT)))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(root)))
        .map_err(xml_error)?;

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(out)
}
