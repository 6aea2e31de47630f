use std::io::Write;
use std::path::Path;

use crate::error::DialscanError;
use crate::model::SourcedContact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick a format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    /// Format for an output file. A path without an extension is written as
    /// CSV; any extension other than `.csv` or `.json` is rejected.
    pub fn for_output(path: &Path) -> Result<ExportFormat, DialscanError> {
        if path.extension().is_none() {
            return Ok(ExportFormat::Csv);
        }
        ExportFormat::from_path(path).ok_or_else(|| DialscanError::UnsupportedExport {
            path: path.to_path_buf(),
        })
    }
}

/// Write rows as CSV with a `Name,Mobile,SourceFile` header.
pub fn write_csv<W: Write>(rows: &[SourcedContact], writer: W) -> Result<(), DialscanError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(rows: &[SourcedContact], writer: W) -> Result<(), DialscanError> {
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

/// Write rows to `path` in the given format.
pub fn export_to_path(
    rows: &[SourcedContact],
    path: &Path,
    format: ExportFormat,
) -> Result<(), DialscanError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    match format {
        ExportFormat::Csv => write_csv(rows, &mut file)?,
        ExportFormat::Json => write_json(rows, &mut file)?,
    }
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SourcedContact> {
        vec![
            SourcedContact {
                name: "Priya Sharma".into(),
                mobile: "+919876543210".into(),
                source_file: "shot1.png".into(),
            },
            SourcedContact {
                name: "Dev, Jr".into(),
                mobile: "+919123456789".into(),
                source_file: "shot2.png".into(),
            },
        ]
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let mut buf = Vec::new();
        write_csv(&rows(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "Name,Mobile,SourceFile\n\
             Priya Sharma,+919876543210,shot1.png\n\
             \"Dev, Jr\",+919123456789,shot2.png\n"
        );
    }

    #[test]
    fn test_json_uses_column_names() {
        let mut buf = Vec::new();
        write_json(&rows(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["Name"], "Priya Sharma");
        assert_eq!(value[1]["Mobile"], "+919123456789");
        assert_eq!(value[1]["SourceFile"], "shot2.png");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/contacts.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("contacts.json")),
            Some(ExportFormat::Json)
        );
        assert_eq!(ExportFormat::from_path(Path::new("contacts.xlsx")), None);
        assert_eq!(ExportFormat::from_path(Path::new("contacts")), None);
    }

    #[test]
    fn test_output_format_rejects_spreadsheet_extension() {
        assert!(matches!(
            ExportFormat::for_output(Path::new("contacts.xlsx")),
            Err(DialscanError::UnsupportedExport { .. })
        ));
        assert_eq!(
            ExportFormat::for_output(Path::new("contacts.Json")).unwrap(),
            ExportFormat::Json
        );
        assert_eq!(
            ExportFormat::for_output(Path::new("contacts")).unwrap(),
            ExportFormat::Csv
        );
    }

    #[test]
    fn test_export_to_path_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.csv");
        export_to_path(&rows(), &path, ExportFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Name,Mobile,SourceFile\n"));
        assert_eq!(content.lines().count(), 3);
    }
}
