use std::fs;
use std::io::Write;

use camino::Utf8Path;

use crate::domain::SampleMetadataRecord;
use crate::error::MgnifyError;

/// Serializes `records` as CSV with a header row and no index column.
pub fn write_csv<W: Write>(writer: W, records: &[SampleMetadataRecord]) -> Result<(), MgnifyError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    // Written explicitly so an empty table still gets its header.
    csv_writer
        .write_record(SampleMetadataRecord::COLUMNS)
        .map_err(|err| MgnifyError::Csv(err.to_string()))?;
    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|err| MgnifyError::Csv(err.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|err| MgnifyError::Csv(err.to_string()))?;
    Ok(())
}

/// Writes the table to `path`, replacing any existing file.
pub fn write_csv_atomic(path: &Utf8Path, records: &[SampleMetadataRecord]) -> Result<(), MgnifyError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| MgnifyError::Filesystem(err.to_string()))?;
    let mut temp = tempfile::Builder::new()
        .prefix("mgnify-fetch")
        .suffix(".csv.tmp")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| MgnifyError::Filesystem(err.to_string()))?;
    write_csv(temp.as_file_mut(), records)?;
    // Temp files are created 0600; the output keeps the replaced file's mode or gets 0644.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = fs::metadata(path.as_std_path())
            .map(|metadata| metadata.permissions())
            .unwrap_or_else(|_| fs::Permissions::from_mode(0o644));
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|err| MgnifyError::Filesystem(err.to_string()))?;
    }
    temp.persist(path.as_std_path())
        .map_err(|err| MgnifyError::Filesystem(err.to_string()))?;
    tracing::debug!(%path, rows = records.len(), "csv written");
    Ok(())
}
