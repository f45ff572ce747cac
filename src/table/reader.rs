use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::RollupError;
use crate::models::{InputRecord, KEY_COLUMNS, METRIC_KEYS};

/// Read every record of a delimited table whose first row is the header.
///
/// Rows shorter than the header are kept; the absent fields surface as
/// [`RollupError::MissingColumn`] when the aggregator looks them up.
/// Blank lines carry no record and are skipped.
pub fn parse_records<R: Read>(source: R, delimiter: u8) -> Result<Vec<InputRecord>, RollupError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;
    debug!(columns = headers.len(), "Parsed header row");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |pos| pos.line());
        records.push(InputRecord::from_row(line, headers.iter(), row.iter()));
    }
    Ok(records)
}

/// Load and parse the table at `path`.
pub async fn read_records(path: &Path, delimiter: u8) -> Result<Vec<InputRecord>, RollupError> {
    if !path.exists() {
        return Err(RollupError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let records = parse_records(bytes.as_slice(), delimiter)?;
    info!(path = %path.display(), records = records.len(), "Loaded input table");
    Ok(records)
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<(), RollupError> {
    let missing: Vec<&str> = KEY_COLUMNS
        .iter()
        .chain(METRIC_KEYS.iter())
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RollupError::MissingColumn(format!(
            "header lacks required column(s): {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "date,geo,channel,os,actives,hours,inactives,new_records,five_of_seven,total_records,crashes,default,google,bing,yahoo,other";

    #[test]
    fn test_parse_records_zips_header() {
        let data = format!("{HEADER}\n2024-03-01,US,release,WINNT,1,2,3,4,5,6,7,8,9,10,11,12\n");
        let records = parse_records(data.as_bytes(), b',').unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.line, 2);
        assert_eq!(rec.get("geo").unwrap(), "US");
        assert_eq!(rec.get("other").unwrap(), "12");
    }

    #[test]
    fn test_column_order_is_by_name() {
        let data = "os,other,yahoo,bing,google,default,crashes,total_records,five_of_seven,new_records,inactives,hours,actives,channel,geo,date,extra\n\
                    Linux,12,11,10,9,8,7,6,5,4,3,2,1,beta,FR,2024-03-01,ignored\n";
        let records = parse_records(data.as_bytes(), b',').unwrap();
        assert_eq!(records[0].get("date").unwrap(), "2024-03-01");
        assert_eq!(records[0].get("actives").unwrap(), "1");
        assert_eq!(records[0].get("extra").unwrap(), "ignored");
    }

    #[test]
    fn test_missing_header_column() {
        let data = "date,geo,channel,actives\n2024-03-01,US,release,1\n";
        match parse_records(data.as_bytes(), b',') {
            Err(RollupError::MissingColumn(msg)) => {
                assert!(msg.contains("os"));
                assert!(msg.contains("crashes"));
                assert!(!msg.contains("geo,"));
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_kept() {
        let data = format!("{HEADER}\n2024-03-01,US,release\n");
        let records = parse_records(data.as_bytes(), b',').unwrap();
        assert_eq!(records[0].len(), 3);
        assert!(records[0].get("os").is_err());
    }

    #[test]
    fn test_line_numbers_follow_source_lines() {
        let data = format!(
            "{HEADER}\n2024-03-01,US,release,WINNT,1,2,3,4,5,6,7,8,9,10,11,12\n\n\
             2024-03-01,CA,beta,\"Linux\nx86\",1,2,3,4,5,6,7,8,9,10,11,12\n\
             2024-03-01,FR,beta,Linux,1,2,3,4,5,6,7,8,9,10,11,12\n"
        );
        let records = parse_records(data.as_bytes(), b',').unwrap();
        let lines: Vec<u64> = records.iter().map(|r| r.line).collect();
        // blank line 3 is skipped; the quoted field spans lines 4-5
        assert_eq!(lines, vec![2, 4, 6]);
        assert_eq!(records[1].get("os").unwrap(), "Linux\nx86");
    }

    #[test]
    fn test_custom_delimiter() {
        let data = format!("{}\n2024-03-01\tUS\trelease\tWINNT\t1\t2\t3\t4\t5\t6\t7\t8\t9\t10\t11\t12\n", HEADER.replace(',', "\t"));
        let records = parse_records(data.as_bytes(), b'\t').unwrap();
        assert_eq!(records[0].get("os").unwrap(), "WINNT");
    }

    #[tokio::test]
    async fn test_read_records_missing_file() {
        let err = read_records(Path::new("/nonexistent/rollup.csv"), b',').await.unwrap_err();
        assert!(matches!(err, RollupError::Io(_)));
    }
}
