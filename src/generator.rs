//! Synthetic sensor data.
//!
//! Nothing here keeps state. Each generator has a `*_with` form that takes
//! the random source and the clock explicitly; the plain form uses
//! `thread_rng()` and `Utc::now()`.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::Rng;

use crate::models::{HistoricalRecord, PumpStatus, SensorKind, SensorSample};

// ---

/// Field names used by the history table, in generation index order.
pub const HISTORY_FIELD_NAMES: [&str; 3] = ["North Field", "South Field", "East Field"];

/// Number of records `generate_history` keeps.
pub const HISTORY_LIMIT: usize = 20;

const HISTORY_DAYS: i64 = 7;
const HISTORY_STEP_HOURS: u32 = 4;

/// Random-walk limits for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkLimits {
    pub min: f64,
    pub max: f64,
    /// Width of the uniform perturbation applied on each tick.
    pub step: f64,
}

impl WalkLimits {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub fn walk_limits(kind: SensorKind) -> WalkLimits {
    // ---
    match kind {
        SensorKind::SoilMoisture => WalkLimits { min: 10.0, max: 90.0, step: 5.0 },
        SensorKind::Temperature => WalkLimits { min: 15.0, max: 45.0, step: 2.0 },
        SensorKind::Humidity => WalkLimits { min: 20.0, max: 90.0, step: 4.0 },
        SensorKind::WaterLevel => WalkLimits { min: 10.0, max: 100.0, step: 3.0 },
    }
}

/// Backfill `hours + 1` hourly samples ending at now.
pub fn generate_series(hours: u32) -> Vec<SensorSample> {
    generate_series_with(&mut rand::thread_rng(), Utc::now(), hours)
}

pub fn generate_series_with<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    hours: u32,
) -> Vec<SensorSample> {
    // ---
    (0..=hours)
        .rev()
        .map(|offset| {
            let i = f64::from(offset);
            let soil_moisture = 25.0 + rng.gen_range(0.0..35.0_f64) + (i / 4.0).sin() * 10.0;
            let temperature = 20.0 + rng.gen_range(0.0..15.0_f64) + (i / 6.0).cos() * 5.0;
            let humidity = 40.0 + rng.gen_range(0.0..30.0_f64) + (i / 5.0).sin() * 10.0;
            let water_level = 60.0 + rng.gen_range(0.0..30.0_f64) - i * 0.5;

            // Long windows would let the water-level drift escape its range.
            SensorSample {
                timestamp: now - Duration::hours(i64::from(offset)),
                soil_moisture: walk_limits(SensorKind::SoilMoisture).clamp(soil_moisture.round()),
                temperature: walk_limits(SensorKind::Temperature).clamp(temperature.round()),
                humidity: walk_limits(SensorKind::Humidity).clamp(humidity.round()),
                water_level: walk_limits(SensorKind::WaterLevel).clamp(water_level.round()),
            }
        })
        .collect()
}

/// One random-walk step from `previous`.
///
/// The new timestamp is `now`, or one millisecond past `previous` when the
/// clock has not moved forward, so a series stays strictly ascending.
pub fn next_sample_with<R: Rng + ?Sized>(
    rng: &mut R,
    previous: &SensorSample,
    now: DateTime<Utc>,
) -> SensorSample {
    // ---
    let mut perturb = |kind: SensorKind| {
        let limits = walk_limits(kind);
        limits.clamp(previous.value(kind) + (rng.gen::<f64>() - 0.5) * limits.step)
    };

    let soil_moisture = perturb(SensorKind::SoilMoisture);
    let temperature = perturb(SensorKind::Temperature);
    let humidity = perturb(SensorKind::Humidity);
    let water_level = perturb(SensorKind::WaterLevel);

    let floor = previous.timestamp + Duration::milliseconds(1);
    SensorSample {
        timestamp: now.max(floor),
        soil_moisture,
        temperature,
        humidity,
        water_level,
    }
}

/// Synthetic history for the trailing week, last `HISTORY_LIMIT` records.
pub fn generate_history() -> Vec<HistoricalRecord> {
    generate_history_with(&mut rand::thread_rng(), Utc::now())
}

/// Generates one record per 4-hour slot over the last seven days, then keeps
/// the tail of the generation order. The tail is not re-sorted by timestamp.
pub fn generate_history_with<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<HistoricalRecord> {
    // ---
    let today = now.date_naive();
    let mut records = Vec::new();

    for day in (0..HISTORY_DAYS).rev() {
        let midnight = (today - Duration::days(day)).and_time(NaiveTime::MIN).and_utc();

        for hour in (0..24u32).step_by(HISTORY_STEP_HOURS as usize) {
            let field_index = rng.gen_range(0..HISTORY_FIELD_NAMES.len());
            let pump_status = if rng.gen::<f64>() > 0.5 {
                PumpStatus::Active
            } else {
                PumpStatus::Inactive
            };

            records.push(HistoricalRecord {
                id: format!("record-{}-{}-{}", day, hour, field_index),
                timestamp: midnight + Duration::hours(i64::from(hour)),
                field_name: HISTORY_FIELD_NAMES[field_index].to_string(),
                soil_moisture: (20.0 + rng.gen_range(0.0..50.0_f64)).round(),
                temperature: (18.0 + rng.gen_range(0.0..20.0_f64)).round(),
                humidity: (35.0 + rng.gen_range(0.0..40.0_f64)).round(),
                water_level: (50.0 + rng.gen_range(0.0..45.0_f64)).round(),
                pump_status,
            });
        }
    }

    let skip = records.len().saturating_sub(HISTORY_LIMIT);
    records.split_off(skip)
}
