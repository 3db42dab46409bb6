// OilLog - core/export.rs
//
// CSV and JSON export of parsed oil change records.
// Core layer: writes to any Write trait object.

use crate::core::model::OilChangeRecord;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV format.
///
/// Writes: mileage, date, oil_type, filter_type. Unknown values are empty.
pub fn export_csv<W: Write>(
    records: &[OilChangeRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["mileage", "date", "oil_type", "filter_type"])
        .map_err(csv_err)?;

    for record in records {
        csv_writer
            .write_record([
                record.mileage.to_string().as_str(),
                record.date.as_deref().unwrap_or(""),
                record.oil_type.as_deref().unwrap_or(""),
                record.filter_type.as_deref().unwrap_or(""),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[OilChangeRecord],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    Ok(records.len())
}
