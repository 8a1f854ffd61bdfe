// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::{COLUMNS, ExportError, Row, Table};

pub const EXPORT_FILE_NAME: &str = "alumni-data.csv";

/// Encodes exactly what is on screen: the visible rows in their current order.
pub fn export_csv(table: &Table) -> Result<Vec<u8>, ExportError> {
    encode_csv(table.visible_rows())
}

/// Header record of column labels followed by one record per row. Every field
/// is quoted and embedded quotes are doubled. Selection is not exported.
pub fn encode_csv<'a, I>(rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut rows = rows.into_iter().peekable();
    if rows.peek().is_none() {
        return Err(ExportError::NoData);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(COLUMNS.iter().map(|column| column.label))
        .map_err(encode_error)?;
    let mut count = 0_usize;
    for row in rows {
        writer.write_record(row.cells()).map_err(encode_error)?;
        count += 1;
    }

    let payload = writer
        .into_inner()
        .map_err(|error| ExportError::Encode(error.error().to_string()))?;
    debug!(rows = count, bytes = payload.len(), "encoded csv export");
    Ok(payload)
}

fn encode_error(error: csv::Error) -> ExportError {
    ExportError::Encode(error.to_string())
}
