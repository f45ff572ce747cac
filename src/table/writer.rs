use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::RollupError;
use crate::models::{OutputRow, OUTPUT_COLUMNS};

/// Write the header followed by one line per row.
pub fn write_rows<W: Write>(sink: W, rows: &[OutputRow], delimiter: u8) -> Result<(), RollupError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::CRLF)
        .from_writer(sink);

    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the table next to `path` and rename it into place once complete,
/// so a failed run never leaves a partial file behind.
pub async fn write_table(path: &Path, rows: &[OutputRow], delimiter: u8) -> Result<(), RollupError> {
    let mut buf = Vec::new();
    write_rows(&mut buf, rows, delimiter)?;

    let tmp = staging_path(path)?;
    tokio::fs::write(&tmp, &buf).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            warn!(path = %tmp.display(), error = %cleanup, "Failed to remove staging file");
        }
        return Err(e.into());
    }

    info!(path = %path.display(), rows = rows.len(), bytes = buf.len(), "Wrote output table");
    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf, RollupError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RollupError::Config(format!("Output path has no file name: {}", path.display())))?;
    Ok(path.with_file_name(format!(".{}.{}.tmp", name, std::process::id())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellKey, MetricSums, MetricValue};
    use tempfile::TempDir;

    fn sample_row() -> OutputRow {
        let mut values = [MetricValue::Int(1); 12];
        values[2] = MetricValue::Float(0.5);
        OutputRow::new(
            CellKey::new("all", "release", "WINNT", "2024-03-14"),
            MetricSums::from_values(values),
        )
    }

    #[test]
    fn test_header_matches_data_order() {
        let mut buf = Vec::new();
        write_rows(&mut buf, &[sample_row()], b',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "geo,channel,os,date,actives,hours,inactives,new_records,five_of_seven,total_records,crashes,default,google,bing,yahoo,other"
        );
        assert_eq!(lines.next().unwrap(), "all,release,WINNT,2024-03-14,1,1,0.5,1,1,1,1,1,1,1,1,1");
        assert!(lines.next().is_none());
        assert!(text.ends_with("\r\n"));
    }

    #[test]
    fn test_values_with_delimiter_are_quoted() {
        let row = OutputRow::new(
            CellKey::new("US", "release", "Windows, 64-bit", "2024-03-14"),
            MetricSums::default(),
        );
        let mut buf = Vec::new();
        write_rows(&mut buf, &[row], b',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Windows, 64-bit\""));
    }

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        let tmp = staging_path(Path::new("/data/out/v4.csv")).unwrap();
        assert_eq!(tmp.parent(), Some(Path::new("/data/out")));
        let name = tmp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".v4.csv."));
        assert!(name.ends_with(".tmp"));
    }

    #[tokio::test]
    async fn test_write_table_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.csv");
        write_table(&out, &[sample_row()], b',').await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_write_table_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("missing").join("out.csv");
        let err = write_table(&out, &[sample_row()], b',').await.unwrap_err();
        assert!(matches!(err, RollupError::Io(_)));
        assert!(!out.exists());
    }
}
