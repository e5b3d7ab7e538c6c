use chrono::NaiveDate;
use serde_json::json;
use shifttrack::core::filter::{ReportFilter, StatusFilter};
use shifttrack::core::reports::sort_newest_first;
use shifttrack::errors::AppError;
use shifttrack::export::logic::default_file_name;
use shifttrack::export::range::parse_range;
use shifttrack::export::{ExportFormat, ExportLogic, ShiftExport, get_headers, render_csv};
use shifttrack::models::{Shift, build_shift};
use shifttrack::utils::time::DisplayZone;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn shifts() -> Vec<Shift> {
    let zone = DisplayZone::default();
    [
        json!({ "id": "a", "user_name": "Ana Lopez", "start_time": "2025-03-10T00:00:00", "status": "completed", "end_time": "2025-03-10T08:00:00" }),
        json!({ "id": "b", "user_name": "Bruno", "start_time": "2025-03-09T23:59:00" }),
        json!({ "id": "c", "user_name": "ana maria", "start_time": "2025-03-12T09:00:00" }),
        json!({ "id": "d", "user_name": "Carla", "start_time": "garbage" }),
        json!({ "id": "e", "user_name": "Dario", "start_time": "2025-03-13T09:00:00", "status": "Cerrado" }),
    ]
    .iter()
    .map(|r| build_shift(r, &zone))
    .collect()
}

fn ids(selected: &[&Shift]) -> Vec<String> {
    selected.iter().map(|s| s.id.clone()).collect()
}

#[test]
fn test_date_range_is_inclusive_by_day() {
    let tz = DisplayZone::default().tz;
    let all = shifts();
    let filter = ReportFilter {
        start_date: Some(day(2025, 3, 10)),
        end_date: Some(day(2025, 3, 12)),
        ..Default::default()
    };

    // "d" has no readable start and is kept
    assert_eq!(ids(&filter.apply(&all, tz)), vec!["a", "c", "d"]);
}

#[test]
fn test_search_and_status_filters() {
    let tz = DisplayZone::default().tz;
    let all = shifts();

    let filter = ReportFilter {
        search: "ANA".into(),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&all, tz)), vec!["a", "c"]);

    let filter = ReportFilter {
        status: StatusFilter::Active,
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&all, tz)), vec!["b", "c", "d"]);

    let filter = ReportFilter {
        status: StatusFilter::Completed,
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&all, tz)), vec!["a", "e"]);

    assert_eq!(ReportFilter::default().apply(&all, tz).len(), all.len());
}

#[test]
fn test_reports_sorted_newest_first() {
    let mut all = shifts();
    sort_newest_first(&mut all, DisplayZone::default().tz);
    let order: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["e", "c", "a", "b", "d"]);
}

#[test]
fn test_csv_has_one_row_per_shift_and_doubles_quotes() {
    let zone = DisplayZone::default();
    let quoted = build_shift(
        &json!({ "user_name": "Ana", "comentario_inicio": "He said \"hi\"", "seconds": 3600 }),
        &zone,
    );
    let all = vec![quoted, shifts().remove(0)];
    let rows: Vec<ShiftExport> = all.iter().map(ShiftExport::from).collect();

    let text = render_csv(&rows).expect("csv");
    assert!(text.contains(r#""He said ""hi""""#));
    assert!(text.contains(",3600,"));
    assert!(text.starts_with(r#""Employee","Role","Email","Start Date""#));

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), get_headers().to_vec());
    assert_eq!(reader.records().count(), rows.len());
}

#[test]
fn test_empty_export_is_refused_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");

    let res = ExportLogic::export(
        &[],
        ExportFormat::Csv,
        Some(path.to_str().unwrap()),
        day(2025, 3, 10),
        false,
    );
    assert!(matches!(res, Err(AppError::NothingToExport)));
    assert!(!path.exists());
}

#[test]
fn test_export_writes_filtered_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("report.csv");
    let all = shifts();
    let selected: Vec<&Shift> = all.iter().take(2).collect();

    let written = ExportLogic::export(
        &selected,
        ExportFormat::Csv,
        Some(path.to_str().unwrap()),
        day(2025, 3, 10),
        false,
    )
    .expect("export");
    assert_eq!(written, path);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("Ana Lopez"));

}

#[test]
fn test_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let all = shifts();
    let selected: Vec<&Shift> = all.iter().collect();

    ExportLogic::export(
        &selected,
        ExportFormat::Json,
        Some(path.to_str().unwrap()),
        day(2025, 3, 10),
        true,
    )
    .expect("export");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(5));
    assert_eq!(parsed[0]["employee"], "Ana Lopez");
}

#[test]
fn test_default_file_name_and_ranges() {
    assert_eq!(
        default_file_name(ExportFormat::Csv, day(2025, 3, 10)),
        "ShiftTrack_Report_2025-03-10.csv"
    );
    assert_eq!(
        parse_range("2024-02").unwrap(),
        (day(2024, 2, 1), day(2024, 2, 29))
    );
    assert_eq!(
        parse_range("2025-01:2025-03").unwrap(),
        (day(2025, 1, 1), day(2025, 3, 31))
    );
    assert_eq!(
        parse_range("2025").unwrap(),
        (day(2025, 1, 1), day(2025, 12, 31))
    );
    assert!(parse_range("2025-03:2025").is_err());
    assert!(parse_range("2025-03:2025-01").is_err());
}
