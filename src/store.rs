//! Central in-memory state for the dashboard.
//!
//! `DashboardStore` is the only owner of mutable application state. It is
//! built once at startup and shared as `Arc<DashboardStore>` with the HTTP
//! handlers and the ticker. Each mutation runs under a single write lock and
//! then broadcasts a [`StoreEvent`] to subscribers.
//!
//! Every operation is total over its id space: an id that matches nothing
//! leaves the state untouched and emits no event.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::generator;
use crate::models::{
    Alert, AutomationRule, Device, Field, HistoricalRecord, NewAlert, NewRule, SensorSample, SensorSnapshot,
};
use crate::seed;

const EVENT_CHANNEL_SIZE: usize = 64;

// ---

/// Change notification sent after every effective mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    FieldSelected { field_id: String },
    DeviceToggled { device_id: String, status: bool },
    AlertAcknowledged { alert_id: String },
    AlertAdded { alert_id: String },
    RuleToggled { rule_id: String, enabled: bool },
    RuleAdded { rule_id: String },
    RuleDeleted { rule_id: String },
    ThemeChanged { dark: bool },
    SensorTick { timestamp: DateTime<Utc> },
    HistoryRegenerated { records: usize },
}

/// Full state snapshot. Cloned out of the store for reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    // ---
    pub fields: Vec<Field>,
    pub selected_field_id: String,
    pub sensor_data: Vec<SensorSample>,
    pub alerts: Vec<Alert>,
    pub automation_rules: Vec<AutomationRule>,
    pub is_dark_mode: bool,
    /// One draw of the history table, shared by every page and the CSV export.
    pub history: Vec<HistoricalRecord>,
}

impl DashboardState {
    /// Seed state with the given sensor series and history table.
    pub fn seeded(sensor_data: Vec<SensorSample>, history: Vec<HistoricalRecord>) -> Self {
        // ---
        Self {
            fields: seed::fields(),
            selected_field_id: seed::DEFAULT_FIELD_ID.to_string(),
            sensor_data,
            alerts: seed::alerts(),
            automation_rules: seed::automation_rules(),
            is_dark_mode: false,
            history,
        }
    }
}

pub struct DashboardStore {
    state: RwLock<DashboardState>,
    events: broadcast::Sender<StoreEvent>,
    last_id_millis: Mutex<i64>,
}

impl DashboardStore {
    /// Seed the store, backfill `window_hours + 1` hourly samples and draw
    /// the history table.
    pub fn new(window_hours: u32) -> Self {
        Self::from_state(DashboardState::seeded(
            generator::generate_series(window_hours),
            generator::generate_history(),
        ))
    }

    pub fn from_state(state: DashboardState) -> Self {
        // ---
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            state: RwLock::new(state),
            events,
            last_id_millis: Mutex::new(0),
        }
    }

    /// Receive a [`StoreEvent`] for every subsequent mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.read().clone()
    }

    fn notify(&self, event: StoreEvent) {
        // ---
        // No subscribers is fine; the event is simply dropped.
        let _ = self.events.send(event);
    }

    /// Time-based id, `<prefix>-<unix millis>`, never repeated by this store.
    fn next_id(&self, prefix: &str) -> String {
        // ---
        let mut last = self.last_id_millis.lock();
        let millis = Utc::now().timestamp_millis().max(*last + 1);
        *last = millis;
        format!("{}-{}", prefix, millis)
    }

    // ── Fields & devices ─────────────────────────────────────────────

    pub fn fields(&self) -> Vec<Field> {
        self.state.read().fields.clone()
    }

    /// Point the dashboard at `field_id`. The id is not validated.
    pub fn select_field(&self, field_id: &str) {
        // ---
        self.state.write().selected_field_id = field_id.to_string();
        debug!(field_id, "selected field");
        self.notify(StoreEvent::FieldSelected {
            field_id: field_id.to_string(),
        });
    }

    pub fn selected_field_id(&self) -> String {
        self.state.read().selected_field_id.clone()
    }

    /// The selected field, or `None` when the pointer dangles.
    pub fn selected_field(&self) -> Option<Field> {
        // ---
        let state = self.state.read();
        state
            .fields
            .iter()
            .find(|f| f.id == state.selected_field_id)
            .cloned()
    }

    pub fn devices_for_field(&self, field_id: &str) -> Vec<Device> {
        // ---
        self.state
            .read()
            .fields
            .iter()
            .find(|f| f.id == field_id)
            .map(|f| f.devices.clone())
            .unwrap_or_default()
    }

    /// Flip a device on or off and stamp it with the current time.
    ///
    /// Returns the updated device, or `None` if no field owns `device_id`.
    pub fn toggle_device(&self, device_id: &str) -> Option<Device> {
        self.toggle_device_at(device_id, Utc::now())
    }

    pub fn toggle_device_at(&self, device_id: &str, now: DateTime<Utc>) -> Option<Device> {
        // ---
        let updated = {
            let mut state = self.state.write();
            let device = state
                .fields
                .iter_mut()
                .flat_map(|f| f.devices.iter_mut())
                .find(|d| d.id == device_id)?;
            device.status = !device.status;
            device.last_updated = now;
            device.clone()
        };

        debug!(device_id, status = updated.status, "toggled device");
        self.notify(StoreEvent::DeviceToggled {
            device_id: device_id.to_string(),
            status: updated.status,
        });
        Some(updated)
    }

    // ── Sensors ──────────────────────────────────────────────────────

    pub fn sensor_series(&self) -> Vec<SensorSample> {
        self.state.read().sensor_data.clone()
    }

    /// Baseline reading for a field. This does not look at the rolling
    /// series; see `seed::baseline_snapshot`.
    pub fn current_sensor_snapshot(&self, field_id: &str) -> SensorSnapshot {
        seed::baseline_snapshot(field_id)
    }

    /// Advance the rolling window by one random-walk sample.
    pub fn tick(&self) {
        self.tick_with(&mut rand::thread_rng(), Utc::now());
    }

    /// Append one sample derived from the last and evict the oldest. An
    /// empty series is left as is.
    pub fn tick_with<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) {
        // ---
        let timestamp = {
            let mut state = self.state.write();
            let Some(last) = state.sensor_data.last() else {
                return;
            };
            let next = generator::next_sample_with(rng, last, now);
            let timestamp = next.timestamp;
            state.sensor_data.remove(0);
            state.sensor_data.push(next);
            timestamp
        };

        trace!(%timestamp, "sensor window advanced");
        self.notify(StoreEvent::SensorTick { timestamp });
    }

    // ── History ──────────────────────────────────────────────────────

    pub fn history(&self) -> Vec<HistoricalRecord> {
        self.state.read().history.clone()
    }

    /// Replace the history table with a fresh draw.
    pub fn regenerate_history(&self) -> Vec<HistoricalRecord> {
        self.regenerate_history_with(&mut rand::thread_rng(), Utc::now())
    }

    pub fn regenerate_history_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Vec<HistoricalRecord> {
        // ---
        let history = generator::generate_history_with(rng, now);
        self.state.write().history = history.clone();

        debug!(records = history.len(), "regenerated history");
        self.notify(StoreEvent::HistoryRegenerated {
            records: history.len(),
        });
        history
    }

    // ── Alerts ───────────────────────────────────────────────────────

    /// Alerts in stored order, newest additions first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.state.read().alerts.clone()
    }

    /// Mark an alert as acknowledged. Already-acknowledged or unknown
    /// alerts are left alone.
    pub fn acknowledge_alert(&self, alert_id: &str) {
        // ---
        {
            let mut state = self.state.write();
            match state
                .alerts
                .iter_mut()
                .find(|a| a.id == alert_id && !a.acknowledged)
            {
                Some(alert) => alert.acknowledged = true,
                None => return,
            }
        }

        debug!(alert_id, "acknowledged alert");
        self.notify(StoreEvent::AlertAcknowledged {
            alert_id: alert_id.to_string(),
        });
    }

    /// Store a new alert at the front of the list and return it.
    pub fn add_alert(&self, alert: NewAlert) -> Alert {
        // ---
        let alert = alert.into_alert(self.next_id("alert"));
        self.state.write().alerts.insert(0, alert.clone());

        debug!(alert_id = %alert.id, severity = ?alert.severity, "added alert");
        self.notify(StoreEvent::AlertAdded {
            alert_id: alert.id.clone(),
        });
        alert
    }

    // ── Automation rules ─────────────────────────────────────────────

    pub fn automation_rules(&self) -> Vec<AutomationRule> {
        self.state.read().automation_rules.clone()
    }

    pub fn toggle_rule(&self, rule_id: &str) {
        // ---
        let enabled = {
            let mut state = self.state.write();
            let Some(rule) = state.automation_rules.iter_mut().find(|r| r.id == rule_id) else {
                return;
            };
            rule.enabled = !rule.enabled;
            rule.enabled
        };

        debug!(rule_id, enabled, "toggled rule");
        self.notify(StoreEvent::RuleToggled {
            rule_id: rule_id.to_string(),
            enabled,
        });
    }

    /// Append a new rule to the end of the list and return it.
    pub fn add_rule(&self, rule: NewRule) -> AutomationRule {
        // ---
        let rule = rule.into_rule(self.next_id("rule"));
        self.state.write().automation_rules.push(rule.clone());

        debug!(rule_id = %rule.id, name = %rule.name, "added rule");
        self.notify(StoreEvent::RuleAdded {
            rule_id: rule.id.clone(),
        });
        rule
    }

    pub fn delete_rule(&self, rule_id: &str) {
        // ---
        {
            let mut state = self.state.write();
            let before = state.automation_rules.len();
            state.automation_rules.retain(|r| r.id != rule_id);
            if state.automation_rules.len() == before {
                return;
            }
        }

        debug!(rule_id, "deleted rule");
        self.notify(StoreEvent::RuleDeleted {
            rule_id: rule_id.to_string(),
        });
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn is_dark_mode(&self) -> bool {
        self.state.read().is_dark_mode
    }

    /// Flip the display theme. Subscribers apply the presentation change.
    pub fn toggle_theme(&self) -> bool {
        // ---
        let dark = {
            let mut state = self.state.write();
            state.is_dark_mode = !state.is_dark_mode;
            state.is_dark_mode
        };

        debug!(dark, "toggled theme");
        self.notify(StoreEvent::ThemeChanged { dark });
        dark
    }
}
