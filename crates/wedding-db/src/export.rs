use csv::WriterBuilder;

use wedding_types::models::LikeExportRow;

use crate::{DbError, Result};

pub const EXPORT_FILENAME: &str = "likes.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const HEADER: [&str; 3] = ["id", "ip", "created_at"];

/// Render likes as CSV: a header line, then one line per row. Missing values
/// are written as empty fields; anything containing a delimiter, quote or
/// newline gets quoted.
pub fn to_delimited_text(rows: &[LikeExportRow]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;
    for row in rows {
        let id = row.id.to_string();
        wtr.write_record([
            id.as_str(),
            row.ip.as_deref().unwrap_or(""),
            row.created_at.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| DbError::Export(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| DbError::ExportEncoding)
}
