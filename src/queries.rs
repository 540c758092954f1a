//! Derived read queries over store snapshots.
//!
//! These are recomputed on every request; nothing is cached.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Alert, AutomationRule, Device, HistoricalRecord, SensorKind, SensorSample, Severity};

// ---

/// Difference between the last two samples below which a metric is stable.
const TREND_DEADBAND: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub trend: TrendDirection,
    /// Relative change, e.g. `"4.2%"`.
    pub value: String,
}

/// Compare the last two samples of `series` for one metric.
pub fn trend(series: &[SensorSample], kind: SensorKind) -> Trend {
    // ---
    let [.., previous, current] = series else {
        return Trend {
            trend: TrendDirection::Stable,
            value: "0%".to_string(),
        };
    };

    let previous = previous.value(kind);
    let diff = current.value(kind) - previous;

    let value = if previous != 0.0 {
        format!("{:.1}%", (diff / previous * 100.0).abs())
    } else {
        "0%".to_string()
    };

    let trend = if diff > TREND_DEADBAND {
        TrendDirection::Up
    } else if diff < -TREND_DEADBAND {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    Trend { trend, value }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Normal,
    Warning,
    Critical,
}

pub fn moisture_status(value: f64) -> ReadingStatus {
    // ---
    if value < 25.0 {
        ReadingStatus::Critical
    } else if value < 40.0 {
        ReadingStatus::Warning
    } else {
        ReadingStatus::Normal
    }
}

pub fn temperature_status(value: f64) -> ReadingStatus {
    // ---
    if value > 38.0 || value < 10.0 {
        ReadingStatus::Critical
    } else if value > 35.0 || value < 15.0 {
        ReadingStatus::Warning
    } else {
        ReadingStatus::Normal
    }
}

/// Status badge for any metric. Humidity has no thresholds.
pub fn reading_status(kind: SensorKind, value: f64) -> ReadingStatus {
    // ---
    match kind {
        SensorKind::SoilMoisture => moisture_status(value),
        SensorKind::Temperature => temperature_status(value),
        SensorKind::Humidity => ReadingStatus::Normal,
        SensorKind::WaterLevel if value < 30.0 => ReadingStatus::Warning,
        SensorKind::WaterLevel => ReadingStatus::Normal,
    }
}

/// Unacknowledged alerts first, each group newest first.
pub fn sorted_alerts(alerts: &[Alert]) -> Vec<Alert> {
    // ---
    let mut sorted = alerts.to_vec();
    sorted.sort_by_key(|a| (a.acknowledged, Reverse(a.timestamp)));
    sorted
}

/// Up to `limit` unacknowledged alerts in stored order.
pub fn active_alerts(alerts: &[Alert], limit: usize) -> Vec<Alert> {
    alerts.iter().filter(|a| !a.acknowledged).take(limit).cloned().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    // ---
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub acknowledged: usize,
}

impl AlertSummary {
    pub fn active(&self) -> usize {
        self.critical + self.warning + self.info
    }
}

pub fn alert_summary(alerts: &[Alert]) -> AlertSummary {
    // ---
    alerts.iter().fold(AlertSummary::default(), |mut summary, alert| {
        if alert.acknowledged {
            summary.acknowledged += 1;
        } else {
            match alert.severity {
                Severity::Critical => summary.critical += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
            }
        }
        summary
    })
}

pub fn rules_for_field(rules: &[AutomationRule], field_id: &str) -> Vec<AutomationRule> {
    rules.iter().filter(|r| r.field_id == field_id).cloned().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStats {
    pub total: usize,
    pub enabled: usize,
    pub triggered_today: usize,
}

/// Counts for one field's rules. "Today" is the UTC calendar date of `now`.
pub fn rule_stats(rules: &[AutomationRule], field_id: &str, now: DateTime<Utc>) -> RuleStats {
    // ---
    let today = now.date_naive();
    let field_rules: Vec<&AutomationRule> = rules.iter().filter(|r| r.field_id == field_id).collect();

    RuleStats {
        total: field_rules.len(),
        enabled: field_rules.iter().filter(|r| r.enabled).count(),
        triggered_today: field_rules
            .iter()
            .filter(|r| r.last_triggered.is_some_and(|t| t.date_naive() == today))
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceStats {
    pub total: usize,
    pub active: usize,
}

pub fn device_stats(devices: &[Device]) -> DeviceStats {
    DeviceStats {
        total: devices.len(),
        active: devices.iter().filter(|d| d.status).count(),
    }
}

/// Keep records for one field name. `None` or `"all"` keeps everything.
pub fn filter_history(records: Vec<HistoricalRecord>, field_name: Option<&str>) -> Vec<HistoricalRecord> {
    // ---
    match field_name {
        None | Some("all") => records,
        Some(name) => records.into_iter().filter(|r| r.field_name == name).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    // ---
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice out 1-based `page`. Page 0 is treated as page 1; pages past the end
/// are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    // ---
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_items: items.len(),
        total_pages: items.len().div_ceil(page_size),
    }
}
