//! Static seed data loaded once when a store is constructed.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    Alert, AutomationRule, Comparison, Device, DeviceType, Field, RuleAction, RuleCondition,
    SensorKind, SensorSnapshot, Severity,
};

// ---

/// Field selected when a session starts.
pub const DEFAULT_FIELD_ID: &str = "field-1";

/// Seed timestamps all fall on the morning of 2026-01-31 (UTC).
fn seed_time(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 31, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn device(id: &str, name: &str, kind: DeviceType, status: bool, at: (u32, u32), field_id: &str) -> Device {
    // ---
    Device {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        status,
        last_updated: seed_time(at.0, at.1),
        field_id: field_id.to_string(),
    }
}

pub fn fields() -> Vec<Field> {
    // ---
    vec![
        Field {
            id: "field-1".to_string(),
            name: "North Field".to_string(),
            location: "Section A".to_string(),
            crop_type: "Wheat".to_string(),
            area: 50.0,
            devices: vec![
                device("pump-1", "Main Pump", DeviceType::Pump, true, (10, 30), "field-1"),
                device("motor-1", "Irrigation Motor", DeviceType::Motor, false, (9, 15), "field-1"),
                device("valve-1", "Water Valve", DeviceType::Valve, true, (10, 0), "field-1"),
            ],
        },
        Field {
            id: "field-2".to_string(),
            name: "South Field".to_string(),
            location: "Section B".to_string(),
            crop_type: "Corn".to_string(),
            area: 75.0,
            devices: vec![
                device("pump-2", "Secondary Pump", DeviceType::Pump, false, (8, 45), "field-2"),
                device("sprinkler-1", "Sprinkler System", DeviceType::Sprinkler, true, (10, 20), "field-2"),
            ],
        },
        Field {
            id: "field-3".to_string(),
            name: "East Field".to_string(),
            location: "Section C".to_string(),
            crop_type: "Soybeans".to_string(),
            area: 40.0,
            devices: vec![
                device("pump-3", "Drip Pump", DeviceType::Pump, true, (10, 10), "field-3"),
                device("motor-2", "Distribution Motor", DeviceType::Motor, true, (9, 50), "field-3"),
            ],
        },
    ]
}

pub fn alerts() -> Vec<Alert> {
    // ---
    vec![
        Alert {
            id: "alert-1".to_string(),
            severity: Severity::Critical,
            message: "Soil moisture critically low".to_string(),
            sensor_type: "Soil Moisture".to_string(),
            value: 15.0,
            threshold: 25.0,
            timestamp: seed_time(10, 25),
            field_id: "field-1".to_string(),
            acknowledged: false,
        },
        Alert {
            id: "alert-2".to_string(),
            severity: Severity::Warning,
            message: "Temperature above optimal range".to_string(),
            sensor_type: "Temperature".to_string(),
            value: 38.0,
            threshold: 35.0,
            timestamp: seed_time(10, 15),
            field_id: "field-2".to_string(),
            acknowledged: false,
        },
        Alert {
            id: "alert-3".to_string(),
            severity: Severity::Info,
            message: "Water tank level restored".to_string(),
            sensor_type: "Water Level".to_string(),
            value: 85.0,
            threshold: 80.0,
            timestamp: seed_time(9, 45),
            field_id: "field-3".to_string(),
            acknowledged: true,
        },
    ]
}

pub fn automation_rules() -> Vec<AutomationRule> {
    // ---
    vec![
        AutomationRule {
            id: "rule-1".to_string(),
            name: "Auto Irrigation".to_string(),
            enabled: true,
            condition: RuleCondition {
                sensor: SensorKind::SoilMoisture,
                operator: Comparison::LessThan,
                value: 30.0,
            },
            action: RuleAction {
                device_id: "pump-1".to_string(),
                device_name: "Main Pump".to_string(),
                state: true,
            },
            field_id: "field-1".to_string(),
            last_triggered: Some(seed_time(10, 25)),
        },
        AutomationRule {
            id: "rule-2".to_string(),
            name: "Heat Protection".to_string(),
            enabled: true,
            condition: RuleCondition {
                sensor: SensorKind::Temperature,
                operator: Comparison::GreaterThan,
                value: 35.0,
            },
            action: RuleAction {
                device_id: "sprinkler-1".to_string(),
                device_name: "Sprinkler System".to_string(),
                state: true,
            },
            field_id: "field-2".to_string(),
            last_triggered: Some(seed_time(10, 15)),
        },
        AutomationRule {
            id: "rule-3".to_string(),
            name: "Water Conservation".to_string(),
            enabled: false,
            condition: RuleCondition {
                sensor: SensorKind::WaterLevel,
                operator: Comparison::LessThan,
                value: 20.0,
            },
            action: RuleAction {
                device_id: "pump-2".to_string(),
                device_name: "Secondary Pump".to_string(),
                state: false,
            },
            field_id: "field-2".to_string(),
            last_triggered: None,
        },
    ]
}

/// Fixed per-field baseline readings. Unknown ids fall back to field-1.
///
/// This table is deliberately independent of the rolling sensor series.
pub fn baseline_snapshot(field_id: &str) -> SensorSnapshot {
    // ---
    let (soil_moisture, temperature, humidity, water_level) = match field_id {
        "field-2" => (45.0, 38.0, 48.0, 65.0),
        "field-3" => (52.0, 29.0, 62.0, 88.0),
        _ => (28.0, 32.0, 55.0, 72.0),
    };

    SensorSnapshot {
        soil_moisture,
        temperature,
        humidity,
        water_level,
    }
}
