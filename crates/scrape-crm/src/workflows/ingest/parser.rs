use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::io::Read;

/// Reads a spreadsheet export into row maps keyed by column header.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<Map<String, Value>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let mut row = Map::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), Value::String(field.to_string()));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Rewrites spreadsheet dates to DD/MM/YYYY.
///
/// Exports arrive as M/D/YYYY (sometimes with a two-digit year, meaning
/// 20xx). Values that do not parse are left for the caller to pass through
/// unchanged.
pub(crate) fn normalize_spreadsheet_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    if let [month, day, year] = parts.as_slice() {
        if let (Ok(m), Ok(d), Ok(mut y)) = (
            month.parse::<u32>(),
            day.parse::<u32>(),
            year.parse::<i32>(),
        ) {
            if (0..100).contains(&y) {
                y += 2000;
            }
            if NaiveDate::from_ymd_opt(y, m, d).is_some() {
                return Some(format!("{d:02}/{m:02}/{y}"));
            }
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rows_are_keyed_by_header() {
        let rows = parse_rows(Cursor::new("A,B\n1, 2 \n")).expect("parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("A"), Some(&Value::String("1".to_string())));
        assert_eq!(rows[0].get("B"), Some(&Value::String("2".to_string())));
    }

    #[test]
    fn dates_are_rewritten_day_first() {
        assert_eq!(
            normalize_spreadsheet_date("7/8/2025").as_deref(),
            Some("08/07/2025")
        );
        assert_eq!(
            normalize_spreadsheet_date("12/30/2025").as_deref(),
            Some("30/12/2025")
        );
        assert_eq!(
            normalize_spreadsheet_date("1/2/23").as_deref(),
            Some("02/01/2023")
        );
        assert_eq!(
            normalize_spreadsheet_date("2023-05-20").as_deref(),
            Some("20/05/2023")
        );
    }

    #[test]
    fn unparseable_dates_are_left_alone() {
        assert_eq!(normalize_spreadsheet_date("soon"), None);
        assert_eq!(normalize_spreadsheet_date("13/32/2025"), None);
        assert_eq!(normalize_spreadsheet_date("  "), None);
    }
}
