use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::dates;

#[derive(Debug, Clone, Default)]
pub struct TimerRecord {
    pub identifier: Option<u64>,
    pub notes: Option<String>,
    pub client_name: Option<String>,
    pub project_identifier: Option<String>,
    pub project_name: Option<String>,
    pub task_identifier: Option<String>,
    pub task_name: Option<String>,
    pub active: bool,
    pub hours: Option<f64>,
    pub hours_without_timer: Option<f64>,
    pub external_reference: Map<String, Value>,
    pub spent_at: Option<NaiveDate>,
}

impl TimerRecord {
    // Returns None only when the payload is not an object. A missing key or a
    // value of the wrong type leaves that one field unset; decode never fails
    // for any other reason.
    pub fn from_value(value: &Value) -> Option<Self> {
        let payload = value.as_object()?;

        let external_reference = payload
            .get("external_ref")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Some(TimerRecord {
            identifier: payload.get("id").and_then(Value::as_u64),
            notes: string_field(payload, "notes"),
            client_name: string_field(payload, "client"),
            project_identifier: string_field(payload, "project_id"),
            project_name: string_field(payload, "project"),
            task_identifier: string_field(payload, "task_id"),
            task_name: string_field(payload, "task"),
            active: matches!(payload.get("timer_started_at"), Some(Value::String(_))),
            hours: payload.get("hours").and_then(Value::as_f64),
            hours_without_timer: payload.get("hours_without_timer").and_then(Value::as_f64),
            external_reference,
            spent_at: payload
                .get("spent_at")
                .and_then(Value::as_str)
                .and_then(dates::parse_day),
        })
    }
}

fn string_field(payload: &Map<String, Value>, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}
