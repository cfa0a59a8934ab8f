use crate::errors::TrackerError;
use crate::models::{DayRecord, ExportRow, RangeKind, TaskLog};
use crate::navigator::parse_date;
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::debug;

pub const SHEET_NAME: &str = "Tasks";
pub const HEADER: [&str; 3] = ["Date", "Count", "Comments"];
/// Longest string Excel accepts in one cell.
pub const MAX_CELL_CHARS: usize = 32_767;

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub rows: Vec<ExportRow>,
}

/// Sunday-based week index: `ceil((day_of_year + jan1_weekday) / 7)`.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_yo_opt(date.year(), 1).unwrap_or(date);
    let offset = jan1.weekday().num_days_from_sunday();
    (date.ordinal() + offset).div_ceil(7)
}

pub fn in_range(date: NaiveDate, current: NaiveDate, range: RangeKind) -> bool {
    // Week and month do not compare the year.
    match range {
        RangeKind::Week => week_number(date) == week_number(current),
        RangeKind::Month => date.month() == current.month(),
        RangeKind::Year => date.year() == current.year(),
    }
}

pub fn select_rows(
    log: &TaskLog,
    current: &str,
    range: RangeKind,
) -> Result<Vec<ExportRow>, TrackerError> {
    let current = parse_date(current)?;
    let rows = log
        .iter()
        .filter(|(key, _)| match parse_date(key) {
            Ok(date) => in_range(date, current, range),
            Err(_) => {
                debug!(key = %key, "skipping undated task entry");
                false
            }
        })
        .map(|(key, record)| to_row(key, record))
        .collect();
    Ok(rows)
}

fn to_row(date: &str, record: &DayRecord) -> ExportRow {
    let comments = record
        .comments
        .iter()
        .map(|comment| format!("{} ({})", comment.text, comment.time))
        .collect::<Vec<_>>()
        .join("; ");
    ExportRow {
        date: date.to_string(),
        count: record.count,
        comments,
    }
}

/// Cuts `text` to at most [`MAX_CELL_CHARS`] characters.
pub fn clamp_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub fn file_name(range: RangeKind, user: &str) -> String {
    format!("tasks-{}-{user}.xlsx", range.as_str())
}

pub fn export_range(
    log: &TaskLog,
    current: &str,
    range: RangeKind,
    user: &str,
) -> Result<ExportFile, TrackerError> {
    Ok(ExportFile {
        file_name: file_name(range, user),
        rows: select_rows(log, current, range)?,
    })
}

impl ExportFile {
    pub fn to_workbook(&self) -> Result<Workbook, TrackerError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).map_err(TrackerError::export)?;

        for (col, title) in (0u16..).zip(HEADER) {
            sheet.write_string(0, col, title).map_err(TrackerError::export)?;
        }
        for (row, entry) in (1u32..).zip(&self.rows) {
            sheet
                .write_string(row, 0, &entry.date)
                .map_err(TrackerError::export)?;
            sheet
                .write_number(row, 1, entry.count as f64)
                .map_err(TrackerError::export)?;
            sheet
                .write_string(row, 2, clamp_cell(&entry.comments))
                .map_err(TrackerError::export)?;
        }
        Ok(workbook)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TrackerError> {
        self.to_workbook()?
            .save_to_buffer()
            .map_err(TrackerError::export)
    }

    pub fn save(&self, dir: &Path) -> Result<(), TrackerError> {
        self.to_workbook()?
            .save(dir.join(&self.file_name))
            .map_err(TrackerError::export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Comment;

    fn day(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    fn record(count: u64, comments: &[(&str, &str)]) -> DayRecord {
        DayRecord {
            count,
            comments: comments
                .iter()
                .map(|(text, time)| Comment {
                    text: text.to_string(),
                    time: time.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn week_numbers_start_on_sunday() {
        assert_eq!(week_number(day("2024-01-01")), 1);
        assert_eq!(week_number(day("2024-01-06")), 1);
        assert_eq!(week_number(day("2024-01-07")), 2);
        assert_eq!(week_number(day("2024-06-08")), 23);
        assert_eq!(week_number(day("2024-06-09")), 24);
        assert_eq!(week_number(day("2024-06-10")), 24);
    }

    #[test]
    fn week_and_month_ignore_year() {
        let current = day("2024-06-10");
        assert!(in_range(day("2023-06-11"), current, RangeKind::Week));
        assert!(!in_range(day("2024-06-08"), current, RangeKind::Week));
        assert!(in_range(day("2019-06-30"), current, RangeKind::Month));
        assert!(!in_range(day("2024-07-01"), current, RangeKind::Month));
    }

    #[test]
    fn year_export_keeps_same_year_rows_only() {
        let mut log = TaskLog::new();
        log.insert("2024-03-01".into(), record(1, &[]));
        log.insert("2024-11-20".into(), record(3, &[("x", "10:00 AM")]));
        log.insert("2023-11-20".into(), record(9, &[]));

        let rows = select_rows(&log, "2024-06-10", RangeKind::Year).unwrap();
        let dates: Vec<_> = rows.iter().map(|row| row.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-01", "2024-11-20"]);
    }

    #[test]
    fn comments_are_joined_with_times() {
        let mut log = TaskLog::new();
        log.insert(
            "2024-06-10".into(),
            record(2, &[("water", "08:00 AM"), ("tea", "04:30 PM")]),
        );

        let rows = select_rows(&log, "2024-06-10", RangeKind::Week).unwrap();
        assert_eq!(
            rows,
            vec![ExportRow {
                date: "2024-06-10".into(),
                count: 2,
                comments: "water (08:00 AM); tea (04:30 PM)".into(),
            }]
        );
    }

    #[test]
    fn undated_keys_are_skipped_and_bad_current_date_fails() {
        let mut log = TaskLog::new();
        log.insert("not-a-date".into(), record(1, &[]));
        assert!(select_rows(&log, "2024-06-10", RangeKind::Year).unwrap().is_empty());
        assert!(matches!(
            select_rows(&log, "garbage", RangeKind::Year),
            Err(TrackerError::InvalidDate(_))
        ));
    }

    #[test]
    fn clamp_cell_cuts_on_char_boundary() {
        let short = "tea (08:00 AM)";
        assert_eq!(clamp_cell(short), short);

        let long = "é".repeat(MAX_CELL_CHARS + 10);
        let clamped = clamp_cell(&long);
        assert_eq!(clamped.chars().count(), MAX_CELL_CHARS);
        assert!(long.starts_with(clamped));
    }

    #[test]
    fn oversized_comments_still_export() {
        let long = "x".repeat(40_000);
        let mut log = TaskLog::new();
        log.insert("2024-06-10".into(), record(1, &[(long.as_str(), "09:00 AM")]));

        let file = export_range(&log, "2024-06-10", RangeKind::Week, "alice").unwrap();
        assert!(file.rows[0].comments.chars().count() > MAX_CELL_CHARS);
        let bytes = file.to_bytes().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn file_name_embeds_range_and_user() {
        assert_eq!(file_name(RangeKind::Month, "alice"), "tasks-month-alice.xlsx");
    }

    #[test]
    fn empty_export_still_writes_workbook() {
        let file = export_range(&TaskLog::new(), "2024-06-10", RangeKind::Week, "alice").unwrap();
        assert!(file.rows.is_empty());
        let bytes = file.to_bytes().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn save_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = TaskLog::new();
        log.insert("2024-06-10".into(), record(1, &[("a", "t")]));
        let file = export_range(&log, "2024-06-10", RangeKind::Year, "alice").unwrap();
        file.save(dir.path()).unwrap();
        assert!(dir.path().join("tasks-year-alice.xlsx").exists());
    }
}
