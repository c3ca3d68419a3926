//! CSV export of the duty schedule

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::constants::csv_format::{HEADERS, TIMESTAMP_FORMAT, UTF8_BOM};
use crate::error::AppError;
use crate::schedule::AssignmentRow;

fn optional_field(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes the header and one CSV record per row. Unset numbers and ages are empty fields.
pub fn write_schedule<W: Write>(writer: W, rows: &[AssignmentRow]) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for row in rows {
        csv_writer.write_record([
            optional_field(row.number),
            row.name.clone(),
            row.position.clone(),
            optional_field(row.age),
            row.session_timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the schedule to `path` as UTF-8 CSV with a byte order mark.
///
/// The file is first written next to the target and then renamed over it, so
/// an existing schedule is either fully replaced or left untouched.
/// Missing parent directories are created.
pub fn write_schedule_csv(path: &Path, rows: &[AssignmentRow]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path);
    debug!("Writing schedule to temporary file {}", tmp_path.display());

    let result = write_to_file(&tmp_path, rows).and_then(|()| {
        fs::rename(&tmp_path, path)?;
        Ok(())
    });

    match result {
        Ok(()) => {
            info!("Wrote {} schedule rows to {}", rows.len(), path.display());
            Ok(())
        }
        Err(e) => {
            if tmp_path.exists()
                && let Err(remove_err) = fs::remove_file(&tmp_path)
            {
                warn!(
                    "Failed to remove temporary file {}: {}",
                    tmp_path.display(),
                    remove_err
                );
            }
            Err(e)
        }
    }
}

fn write_to_file(path: &Path, rows: &[AssignmentRow]) -> Result<(), AppError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(UTF8_BOM)?;
    write_schedule(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "schedule.csv".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}

/// Reads a schedule written by [`write_schedule_csv`] back into rows.
///
/// A leading byte order mark is optional. Empty number and age fields become `None`.
pub fn read_schedule_csv(path: &Path) -> Result<Vec<AssignmentRow>, AppError> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());

    let mut reader = csv::Reader::from_reader(content);
    let headers = reader.headers()?.clone();
    if headers.iter().ne(HEADERS) {
        return Err(AppError::schedule_format(
            0,
            format!("unexpected header {:?}", headers.iter().collect::<Vec<_>>()),
        ));
    }

    reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let record = record?;
            parse_record(index + 1, &record)
        })
        .collect()
}

fn parse_record(row: usize, record: &csv::StringRecord) -> Result<AssignmentRow, AppError> {
    let field = |i: usize| record.get(i).unwrap_or_default();

    let optional_number = |i: usize| -> Result<Option<i32>, AppError> {
        let text = field(i);
        if text.is_empty() {
            return Ok(None);
        }
        text.parse()
            .map(Some)
            .map_err(|_| AppError::schedule_format(row, format!("'{text}' is not a number")))
    };

    let session_timestamp = NaiveDateTime::parse_from_str(field(4), TIMESTAMP_FORMAT)
        .map_err(|e| AppError::schedule_format(row, format!("bad timestamp '{}': {e}", field(4))))?;

    Ok(AssignmentRow {
        number: optional_number(0)?,
        name: field(1).to_string(),
        position: field(2).to_string(),
        age: optional_number(3)?,
        session_timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample_rows() -> Vec<AssignmentRow> {
        vec![
            AssignmentRow {
                number: Some(3),
                name: "Åsa Öberg".to_string(),
                position: "Vänsternia".to_string(),
                age: Some(18),
                session_timestamp: timestamp(2025, 8, 25, 20, 15),
            },
            AssignmentRow {
                number: None,
                name: "Lindqvist, Per".to_string(),
                position: String::new(),
                age: None,
                session_timestamp: timestamp(2025, 8, 27, 19, 0),
            },
        ]
    }

    #[test]
    fn test_write_schedule_format() {
        let mut buf = Vec::new();
        write_schedule(&mut buf, &sample_rows()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Number,Name,Position,Age,CleaningDate");
        assert_eq!(lines[1], "3,Åsa Öberg,Vänsternia,18,2025-08-25 20:15");
        assert_eq!(lines[2], ",\"Lindqvist, Per\",,,2025-08-27 19:00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_file_starts_with_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        write_schedule_csv(&path, &sample_rows()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert!(!dir.path().join(".schedule.csv.tmp").exists());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("schedule.csv");
        let rows = sample_rows();

        write_schedule_csv(&path, &rows).unwrap();
        assert_eq!(read_schedule_csv(&path).unwrap(), rows);
    }

    #[test]
    fn test_negative_values_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        let rows = vec![AssignmentRow {
            number: Some(-3),
            name: "A".to_string(),
            position: String::new(),
            age: Some(-1),
            session_timestamp: timestamp(2025, 9, 1, 20, 15),
        }];

        write_schedule_csv(&path, &rows).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("-3,A,,-1,2025-09-01 20:15\n"), "{text}");
        assert_eq!(read_schedule_csv(&path).unwrap(), rows);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        fs::write(&path, "old content that is much longer than nothing\n").unwrap();

        write_schedule_csv(&path, &[]).unwrap();
        let rows = read_schedule_csv(&path).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_rejects_foreign_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.csv");
        fs::write(&path, "a,b,c\n1,2,3\n").unwrap();
        assert!(matches!(
            read_schedule_csv(&path),
            Err(AppError::ScheduleFormat { row: 0, .. })
        ));
    }

    #[test]
    fn test_read_rejects_bad_timestamp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "Number,Name,Position,Age,CleaningDate\n1,A,,20,next monday\n",
        )
        .unwrap();
        assert!(matches!(
            read_schedule_csv(&path),
            Err(AppError::ScheduleFormat { row: 1, .. })
        ));
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path_for(Path::new("/data/schedule.csv")),
            PathBuf::from("/data/.schedule.csv.tmp")
        );
    }
}
