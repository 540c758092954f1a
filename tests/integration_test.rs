use std::sync::Arc;

use agrismart_dashboard::{routes, Config, DashboardStore};
use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Mount the router on an ephemeral port and return its base URL.
async fn spawn_app() -> Result<String> {
    // ---
    let store = Arc::new(DashboardStore::new(24));
    let app = routes::router(store, Config::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{}", addr))
}

fn device<'a>(dashboard: &'a Value, id: &str) -> &'a Value {
    dashboard["fields"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|f| f["devices"].as_array().unwrap())
        .find(|d| d["id"] == id)
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let body: Value = Client::new().get(format!("{base}/health")).send().await?.json().await?;
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn toggling_a_device_flips_status_and_stamps_time() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let before: Value = client.get(format!("{base}/api/dashboard")).send().await?.json().await?;
    let pump = device(&before, "pump-1");
    assert_eq!(pump["status"], true);

    let toggled: Value = client
        .post(format!("{base}/api/devices/pump-1/toggle"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(toggled["status"], false);

    let old: chrono::DateTime<chrono::Utc> = serde_json::from_value(pump["lastUpdated"].clone())?;
    let new: chrono::DateTime<chrono::Utc> = serde_json::from_value(toggled["lastUpdated"].clone())?;
    assert!(new > old, "timestamp not refreshed: {old} -> {new}");

    let devices: Value = client
        .get(format!("{base}/api/fields/field-1/devices"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(devices["stats"], json!({ "total": 3, "active": 1 }));
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_silent_noops() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let before: Value = client.get(format!("{base}/api/dashboard")).send().await?.json().await?;

    let resp = client.post(format!("{base}/api/devices/pump-99/toggle")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?, Value::Null);

    for url in [
        format!("{base}/api/alerts/alert-99/acknowledge"),
        format!("{base}/api/rules/rule-99/toggle"),
    ] {
        assert_eq!(client.post(url).send().await?.status(), StatusCode::OK);
    }
    let resp = client.delete(format!("{base}/api/rules/rule-99")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let devices: Value = client
        .get(format!("{base}/api/fields/field-77/devices"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(devices["devices"], json!([]));

    // The ticker is not running here, so the whole snapshot must be identical.
    let after: Value = client.get(format!("{base}/api/dashboard")).send().await?.json().await?;
    assert_eq!(after, before);
    Ok(())
}

#[tokio::test]
async fn acknowledging_twice_is_same_as_once() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();
    let url = format!("{base}/api/alerts/alert-1/acknowledge");

    let once: Value = client.post(&url).send().await?.json().await?;
    let twice: Value = client.post(&url).send().await?.json().await?;
    assert_eq!(once, twice);

    let alert = once.as_array().unwrap().iter().find(|a| a["id"] == "alert-1").unwrap();
    assert_eq!(alert["acknowledged"], true);

    let summary: Value = client.get(format!("{base}/api/alerts/summary")).send().await?.json().await?;
    assert_eq!(
        summary,
        json!({ "critical": 0, "warning": 1, "info": 0, "acknowledged": 2 })
    );
    Ok(())
}

#[tokio::test]
async fn added_rule_gets_fresh_id_at_end() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let payload = json!({
        "name": "Night Humidity",
        "enabled": true,
        "condition": { "sensor": "humidity", "operator": "greater_than", "value": 85 },
        "action": { "deviceId": "valve-1", "deviceName": "Water Valve", "state": false },
        "fieldId": "field-1"
    });

    let resp = client.post(format!("{base}/api/rules")).json(&payload).send().await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let rule: Value = resp.json().await?;
    let id = rule["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("rule-"));

    let list: Value = client.get(format!("{base}/api/rules")).send().await?.json().await?;
    let ids: Vec<&str> = list["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["rule-1", "rule-2", "rule-3", id.as_str()]);

    let field_rules: Value = client
        .get(format!("{base}/api/rules?fieldId=field-1"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(field_rules["rules"].as_array().unwrap().len(), 2);
    assert_eq!(field_rules["stats"]["enabled"], 2);

    let bad = client
        .post(format!("{base}/api/rules"))
        .json(&json!({ "name": "missing everything" }))
        .send()
        .await?;
    assert!(bad.status().is_client_error());
    Ok(())
}

#[tokio::test]
async fn history_pages_and_csv_export() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let page: Value = client.get(format!("{base}/api/history?page=2")).send().await?.json().await?;
    assert_eq!(page["totalItems"], 20);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 10);

    let resp = client.get(format!("{base}/api/history/export")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers()["content-disposition"].to_str()?.to_string();
    assert!(disposition.contains("sensor_history_"));

    let csv = resp.text().await?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 21);
    assert_eq!(
        lines[0],
        "Timestamp,Field,Soil Moisture (%),Temperature (°C),Humidity (%),Water Level (%),Pump Status"
    );
    for line in &lines[1..] {
        let cols: Vec<&str> = line.split(',').collect();
        assert_eq!(cols.len(), 7);
        assert!(cols[0].ends_with(".000Z"));
        assert!(cols[6] == "Active" || cols[6] == "Inactive");
    }

    let east: Value = client
        .get(format!("{base}/api/history?field=East%20Field"))
        .send()
        .await?
        .json()
        .await?;
    for record in east["items"].as_array().unwrap() {
        assert_eq!(record["fieldName"], "East Field");
    }
    Ok(())
}

#[tokio::test]
async fn history_pages_and_export_share_one_draw() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let mut shown = Vec::new();
    for page in 1..=2 {
        let body: Value = client
            .get(format!("{base}/api/history?page={page}"))
            .send()
            .await?
            .json()
            .await?;
        shown.extend(body["items"].as_array().unwrap().iter().cloned());
    }
    assert_eq!(shown.len(), 20);

    let csv = client.get(format!("{base}/api/history/export")).send().await?.text().await?;
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), shown.len());

    for (row, record) in rows.iter().zip(&shown) {
        let cols: Vec<&str> = row.split(',').collect();
        let csv_time: chrono::DateTime<chrono::Utc> = cols[0].parse()?;
        let json_time: chrono::DateTime<chrono::Utc> = serde_json::from_value(record["timestamp"].clone())?;
        assert_eq!(csv_time, json_time);
        assert_eq!(cols[1], record["fieldName"]);
        assert_eq!(cols[2].parse::<f64>()?, record["soilMoisture"].as_f64().unwrap());
        assert_eq!(cols[3].parse::<f64>()?, record["temperature"].as_f64().unwrap());
        assert_eq!(cols[4].parse::<f64>()?, record["humidity"].as_f64().unwrap());
        assert_eq!(cols[5].parse::<f64>()?, record["waterLevel"].as_f64().unwrap());
        assert_eq!(cols[6], record["pumpStatus"]);
    }

    // A filtered view is stable across identical requests.
    let url = format!("{base}/api/history?field=East%20Field&page=1");
    let first: Value = client.get(&url).send().await?.json().await?;
    let second: Value = client.get(&url).send().await?.json().await?;
    assert_eq!(first, second);

    let fresh: Value = client
        .post(format!("{base}/api/history/regenerate"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fresh.as_array().unwrap().len(), 20);
    let page: Value = client.get(format!("{base}/api/history")).send().await?.json().await?;
    assert_eq!(page["items"].as_array().unwrap()[..], fresh.as_array().unwrap()[..10]);
    Ok(())
}

#[tokio::test]
async fn reports_download_placeholder_text() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let resp = client
        .get(format!("{base}/api/reports/detailed?range=90days&format=csv"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()["content-disposition"]
        .to_str()?
        .contains("detailed_report_"));

    let text = resp.text().await?;
    assert!(text.starts_with("AgriSmart IoT Dashboard\nDetailed Analysis Report\n"));
    assert!(text.contains("Date Range: 90days"));

    let bad = client.get(format!("{base}/api/reports/weekly")).send().await?;
    assert!(bad.status().is_client_error());
    Ok(())
}

#[tokio::test]
async fn selecting_a_field_drives_the_overview() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let resp = client
        .put(format!("{base}/api/fields/selected"))
        .json(&json!({ "fieldId": "field-2" }))
        .send()
        .await?;
    let selected: Value = resp.json().await?;
    assert_eq!(selected["field"]["name"], "South Field");

    let overview: Value = client.get(format!("{base}/api/overview")).send().await?.json().await?;
    assert_eq!(overview["selectedFieldId"], "field-2");
    assert_eq!(
        overview["current"],
        json!({ "soilMoisture": 45.0, "temperature": 38.0, "humidity": 48.0, "waterLevel": 65.0 })
    );
    let metrics = overview["metrics"].as_array().unwrap();
    assert_eq!(metrics.len(), 4);
    assert_eq!(metrics[1]["sensor"], "temperature");
    assert_eq!(metrics[1]["status"], "warning");

    // A dangling selection falls back to the first field's baseline.
    client
        .put(format!("{base}/api/fields/selected"))
        .json(&json!({ "fieldId": "field-404" }))
        .send()
        .await?;
    let overview: Value = client.get(format!("{base}/api/overview")).send().await?.json().await?;
    assert_eq!(overview["field"], Value::Null);
    assert_eq!(overview["current"]["soilMoisture"], 28.0);
    Ok(())
}

#[tokio::test]
async fn theme_toggle_round_trip() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let client = Client::new();

    let first: Value = client.post(format!("{base}/api/theme/toggle")).send().await?.json().await?;
    assert_eq!(first, json!({ "isDarkMode": true }));

    let current: Value = client.get(format!("{base}/api/theme")).send().await?.json().await?;
    assert_eq!(current, first);
    Ok(())
}
