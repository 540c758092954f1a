//! Downloadable text exports: the history CSV and placeholder reports.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::models::HistoricalRecord;

// ---

pub const CSV_HEADER: [&str; 7] = [
    "Timestamp",
    "Field",
    "Soil Moisture (%)",
    "Temperature (°C)",
    "Humidity (%)",
    "Water Level (%)",
    "Pump Status",
];

/// Render records as comma-separated text with a header row.
///
/// Rows are joined with `\n` and there is no trailing newline. Timestamps
/// are UTC with millisecond precision, e.g. `2026-01-31T10:25:00.000Z`.
pub fn history_csv(records: &[HistoricalRecord]) -> String {
    // ---
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for record in records {
        lines.push(
            [
                record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                record.field_name.clone(),
                record.soil_moisture.to_string(),
                record.temperature.to_string(),
                record.humidity.to_string(),
                record.water_level.to_string(),
                record.pump_status.label().to_string(),
            ]
            .join(","),
        );
    }

    lines.join("\n")
}

pub fn history_file_name(now: DateTime<Utc>) -> String {
    format!("sensor_history_{}.csv", now.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Summary,
    Detailed,
    Alerts,
    Automation,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        // ---
        match self {
            ReportKind::Summary => "Summary Report",
            ReportKind::Detailed => "Detailed Analysis Report",
            ReportKind::Alerts => "Alerts Report",
            ReportKind::Automation => "Automation Log Report",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::Detailed => "detailed",
            ReportKind::Alerts => "alerts",
            ReportKind::Automation => "automation",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum DateRange {
    #[default]
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "90days")]
    NinetyDays,
    #[serde(rename = "custom")]
    Custom,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateRange::SevenDays => "7days",
            DateRange::ThirtyDays => "30days",
            DateRange::NinetyDays => "90days",
            DateRange::Custom => "custom",
        };
        f.write_str(label)
    }
}

/// Requested download format. The placeholder body is plain text whatever
/// the choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Csv,
    Excel,
}

const REPORT_BODY: &str = "\
=====================================

This is a sample report document.
In a production environment, this would contain:

- Sensor data summaries and averages
- Device usage statistics
- Alert history and response times
- Automation rule effectiveness
- Recommendations for optimization

=====================================

Thank you for using AgriSmart IoT Dashboard.";

/// Placeholder report text for `kind` over `range`.
pub fn report_content(kind: ReportKind, range: DateRange, now: DateTime<Utc>) -> String {
    // ---
    format!(
        "AgriSmart IoT Dashboard\n{}\nGenerated: {}\nDate Range: {}\n\n{}",
        kind.title(),
        now.format("%Y-%m-%d %H:%M:%S UTC"),
        range,
        REPORT_BODY
    )
}

pub fn report_file_name(kind: ReportKind, now: DateTime<Utc>) -> String {
    format!("{}_report_{}.txt", kind.slug(), now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::PumpStatus;
    use chrono::TimeZone;

    fn fixture() -> Vec<HistoricalRecord> {
        vec![
            HistoricalRecord {
                id: "record-1-8-0".to_string(),
                timestamp: Utc.with_ymd_and_hms(2026, 1, 30, 8, 0, 0).unwrap(),
                field_name: "North Field".to_string(),
                soil_moisture: 45.0,
                temperature: 22.0,
                humidity: 60.0,
                water_level: 80.0,
                pump_status: PumpStatus::Active,
            },
            HistoricalRecord {
                id: "record-0-12-2".to_string(),
                timestamp: Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap(),
                field_name: "East Field".to_string(),
                soil_moisture: 31.5,
                temperature: 35.0,
                humidity: 41.0,
                water_level: 55.0,
                pump_status: PumpStatus::Inactive,
            },
        ]
    }

    #[test]
    fn test_history_csv_exact_output() {
        // ---
        let expected = "Timestamp,Field,Soil Moisture (%),Temperature (°C),Humidity (%),Water Level (%),Pump Status\n\
2026-01-30T08:00:00.000Z,North Field,45,22,60,80,Active\n\
2026-01-31T12:00:00.000Z,East Field,31.5,35,41,55,Inactive";

        assert_eq!(history_csv(&fixture()), expected);
    }

    #[test]
    fn test_history_csv_empty_is_header_only() {
        // ---
        assert_eq!(history_csv(&[]), CSV_HEADER.join(","));
    }

    #[test]
    fn test_report_content_per_kind() {
        // ---
        let now = Utc.with_ymd_and_hms(2026, 2, 3, 9, 5, 0).unwrap();
        let report = report_content(ReportKind::Alerts, DateRange::ThirtyDays, now);

        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("AgriSmart IoT Dashboard"));
        assert_eq!(lines.next(), Some("Alerts Report"));
        assert_eq!(lines.next(), Some("Generated: 2026-02-03 09:05:00 UTC"));
        assert_eq!(lines.next(), Some("Date Range: 30days"));
        assert!(report.ends_with("Thank you for using AgriSmart IoT Dashboard."));

        assert_eq!(ReportKind::Detailed.title(), "Detailed Analysis Report");
        assert_eq!(ReportKind::Automation.title(), "Automation Log Report");
    }

    #[test]
    fn test_file_names_carry_date() {
        // ---
        let now = Utc.with_ymd_and_hms(2026, 2, 3, 23, 59, 0).unwrap();
        assert_eq!(history_file_name(now), "sensor_history_2026-02-03.csv");
        assert_eq!(report_file_name(ReportKind::Summary, now), "summary_report_2026-02-03.txt");
    }

    #[test]
    fn test_query_values_deserialize() {
        // ---
        let range: DateRange = serde_json::from_str("\"90days\"").unwrap();
        assert_eq!(range, DateRange::NinetyDays);
        let kind: ReportKind = serde_json::from_str("\"automation\"").unwrap();
        assert_eq!(kind, ReportKind::Automation);
        assert!(serde_json::from_str::<ReportKind>("\"weekly\"").is_err());
    }
}
