//! Data models for the field dashboard.
//!
//! Every entity serializes with camelCase field names, which is the JSON
//! shape the dashboard client reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Kind of actuator attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Pump,
    Motor,
    Valve,
    Sprinkler,
}

/// A simulated on/off actuator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    // ---
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceType,
    pub status: bool,
    pub last_updated: DateTime<Utc>,
    pub field_id: String,
}

/// A managed farm plot and the devices it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    // ---
    pub id: String,
    pub name: String,
    pub location: String,
    pub crop_type: String,
    pub area: f64,
    pub devices: Vec<Device>,
}

/// One timestamped reading of the four environmental metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSample {
    // ---
    pub timestamp: DateTime<Utc>,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub water_level: f64,
}

/// The four metrics without a timestamp, as shown on the overview cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    // ---
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub water_level: f64,
}

/// Selects one of the four metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensorKind {
    SoilMoisture,
    Temperature,
    Humidity,
    WaterLevel,
}

impl SensorKind {
    pub const ALL: [SensorKind; 4] = [
        SensorKind::SoilMoisture,
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::WaterLevel,
    ];
}

impl SensorSample {
    pub fn value(&self, kind: SensorKind) -> f64 {
        // ---
        match kind {
            SensorKind::SoilMoisture => self.soil_moisture,
            SensorKind::Temperature => self.temperature,
            SensorKind::Humidity => self.humidity,
            SensorKind::WaterLevel => self.water_level,
        }
    }
}

impl SensorSnapshot {
    pub fn value(&self, kind: SensorKind) -> f64 {
        // ---
        match kind {
            SensorKind::SoilMoisture => self.soil_moisture,
            SensorKind::Temperature => self.temperature,
            SensorKind::Humidity => self.humidity,
            SensorKind::WaterLevel => self.water_level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Notification of an out-of-range condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    // ---
    pub id: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub sensor_type: String,
    pub value: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
    pub field_id: String,
    pub acknowledged: bool,
}

/// Alert payload before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    // ---
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub sensor_type: String,
    pub value: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
    pub field_id: String,
    #[serde(default)]
    pub acknowledged: bool,
}

impl NewAlert {
    pub fn into_alert(self, id: String) -> Alert {
        // ---
        Alert {
            id,
            severity: self.severity,
            message: self.message,
            sensor_type: self.sensor_type,
            value: self.value,
            threshold: self.threshold,
            timestamp: self.timestamp,
            field_id: self.field_id,
            acknowledged: self.acknowledged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    LessThan,
    GreaterThan,
    Equals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    // ---
    pub sensor: SensorKind,
    pub operator: Comparison,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    // ---
    pub device_id: String,
    pub device_name: String,
    pub state: bool,
}

/// Stored condition → action mapping. Rules are configuration only; nothing
/// evaluates them against live readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRule {
    // ---
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub condition: RuleCondition,
    pub action: RuleAction,
    pub field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered: Option<DateTime<Utc>>,
}

/// Rule payload before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRule {
    // ---
    pub name: String,
    pub enabled: bool,
    pub condition: RuleCondition,
    pub action: RuleAction,
    pub field_id: String,
    #[serde(default)]
    pub last_triggered: Option<DateTime<Utc>>,
}

impl NewRule {
    pub fn into_rule(self, id: String) -> AutomationRule {
        // ---
        AutomationRule {
            id,
            name: self.name,
            enabled: self.enabled,
            condition: self.condition,
            action: self.action,
            field_id: self.field_id,
            last_triggered: self.last_triggered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PumpStatus {
    Active,
    Inactive,
}

impl PumpStatus {
    pub fn label(self) -> &'static str {
        match self {
            PumpStatus::Active => "Active",
            PumpStatus::Inactive => "Inactive",
        }
    }
}

/// One row of the synthetic history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    // ---
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub field_name: String,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub water_level: f64,
    pub pump_status: PumpStatus,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_device_serializes_with_client_field_names() {
        // ---
        let device = Device {
            id: "pump-1".to_string(),
            name: "Main Pump".to_string(),
            kind: DeviceType::Pump,
            status: true,
            last_updated: Utc.with_ymd_and_hms(2026, 1, 31, 10, 30, 0).unwrap(),
            field_id: "field-1".to_string(),
        };

        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["type"], "pump");
        assert_eq!(json["fieldId"], "field-1");
        assert_eq!(json["lastUpdated"], "2026-01-31T10:30:00Z");
    }

    #[test]
    fn test_rule_condition_enums_use_wire_names() {
        // ---
        let condition = RuleCondition {
            sensor: SensorKind::WaterLevel,
            operator: Comparison::LessThan,
            value: 20.0,
        };

        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["sensor"], "waterLevel");
        assert_eq!(json["operator"], "less_than");
    }

    #[test]
    fn test_new_alert_defaults_to_unacknowledged() {
        // ---
        let payload = r#"{
            "type": "warning",
            "message": "Humidity dropping",
            "sensorType": "Humidity",
            "value": 22,
            "threshold": 25,
            "timestamp": "2026-02-01T08:00:00Z",
            "fieldId": "field-3"
        }"#;

        let alert: NewAlert = serde_json::from_str(payload).unwrap();
        assert!(!alert.acknowledged);
        assert_eq!(alert.severity, Severity::Warning);

        let alert = alert.into_alert("alert-7".to_string());
        assert_eq!(alert.id, "alert-7");
        assert_eq!(alert.field_id, "field-3");
    }

    #[test]
    fn test_sample_value_lookup() {
        // ---
        let sample = SensorSample {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap(),
            soil_moisture: 1.0,
            temperature: 2.0,
            humidity: 3.0,
            water_level: 4.0,
        };

        let values: Vec<f64> = SensorKind::ALL.iter().map(|k| sample.value(*k)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
