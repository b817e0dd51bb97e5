use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Datelike, NaiveDate};
use reqwest::blocking::{Client, Response};
use serde_json::Value;

use crate::dates;
use crate::models::TimerRecord;
use crate::storage::Credentials;

#[derive(Debug, Clone)]
pub enum HarvestError {
    Unauthorized,
    RateLimited,
    ServerError(String),
    Network(String),
}

impl std::fmt::Display for HarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarvestError::Unauthorized => write!(f, "Invalid Harvest credentials"),
            HarvestError::RateLimited => write!(f, "Harvest API rate limit reached"),
            HarvestError::ServerError(message) => write!(f, "Server error: {message}"),
            HarvestError::Network(message) => write!(f, "Network error: {message}"),
        }
    }
}

impl std::error::Error for HarvestError {}

#[derive(Debug, Clone, Default)]
pub struct Daily {
    pub for_day: Option<NaiveDate>,
    pub entries: Vec<TimerRecord>,
}

#[derive(Clone)]
pub struct HarvestClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl HarvestClient {
    pub fn new(credentials: Credentials) -> Self {
        let client = Client::builder()
            .user_agent("harvtrack")
            .build()
            .expect("Failed to build HTTP client");
        let base_url = format!("https://{}.harvestapp.com", credentials.account);
        Self {
            client,
            base_url,
            credentials,
        }
    }

    pub fn fetch_daily(&self) -> Result<Daily, HarvestError> {
        let url = format!("{}/daily", self.base_url);
        let body = self.get_json(url)?;
        Ok(daily_from_value(&body))
    }

    pub fn fetch_daily_for(&self, date: NaiveDate) -> Result<Daily, HarvestError> {
        let url = format!("{}{}", self.base_url, daily_path(date));
        let body = self.get_json(url)?;
        Ok(daily_from_value(&body))
    }

    pub fn toggle_timer(&self, identifier: u64) -> Result<Option<TimerRecord>, HarvestError> {
        let url = format!("{}/daily/timer/{}", self.base_url, identifier);
        let body = self.get_json(url)?;
        Ok(TimerRecord::from_value(&body))
    }

    pub fn delete_timer(&self, identifier: u64) -> Result<(), HarvestError> {
        let url = format!("{}/daily/delete/{}", self.base_url, identifier);
        let response = self
            .client
            .delete(url)
            .header("Accept", "application/json")
            .header("Authorization", self.auth_header())
            .send()
            .map_err(|err| HarvestError::Network(err.to_string()))?;
        check_status(response)?;
        Ok(())
    }

    fn get_json(&self, url: String) -> Result<Value, HarvestError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Authorization", self.auth_header())
            .send()
            .map_err(|err| HarvestError::Network(err.to_string()))?;

        let response = check_status(response)?;

        response
            .json::<Value>()
            .map_err(|err| HarvestError::Network(err.to_string()))
    }

    fn auth_header(&self) -> String {
        let credentials = STANDARD.encode(format!(
            "{}:{}",
            self.credentials.username, self.credentials.password
        ));
        format!("Basic {credentials}")
    }
}

fn check_status(response: Response) -> Result<Response, HarvestError> {
    if response.status() == 401 || response.status() == 403 {
        return Err(HarvestError::Unauthorized);
    }

    if response.status() == 429 {
        return Err(HarvestError::RateLimited);
    }

    if response.status().is_server_error() {
        return Err(HarvestError::ServerError(format!(
            "Harvest API error: {}",
            response.status()
        )));
    }

    if !response.status().is_success() {
        return Err(HarvestError::Network(format!(
            "Harvest API error: {}",
            response.status()
        )));
    }

    Ok(response)
}

// The daily endpoint addresses a day as day-of-year plus year.
fn daily_path(date: NaiveDate) -> String {
    format!("/daily/{}/{}", date.ordinal(), date.year())
}

fn daily_from_value(value: &Value) -> Daily {
    let entries = value
        .get("day_entries")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(TimerRecord::from_value).collect())
        .unwrap_or_default();

    let for_day = value
        .get("for_day")
        .and_then(Value::as_str)
        .and_then(dates::parse_day);

    Daily { for_day, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn daily_path_uses_day_of_year() {
        let date = NaiveDate::from_ymd_opt(2015, 11, 19).unwrap();
        assert_eq!(daily_path(date), "/daily/323/2015");

        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(daily_path(first), "/daily/1/2024");
    }

    #[test]
    fn daily_decodes_entries_and_day() {
        let daily = daily_from_value(&json!({
            "for_day": "2024-05-01",
            "day_entries": [
                {"id": 1, "hours": 2.0},
                {"id": 2, "timer_started_at": "2024-05-01T10:00:00Z"}
            ]
        }));
        assert_eq!(daily.for_day, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(daily.entries.len(), 2);
        assert_eq!(daily.entries[0].identifier, Some(1));
        assert!(daily.entries[1].active);
    }

    #[test]
    fn daily_skips_non_object_entries() {
        let daily = daily_from_value(&json!({
            "day_entries": [{"id": 1}, "junk", null, 7]
        }));
        assert_eq!(daily.entries.len(), 1);
        assert_eq!(daily.entries[0].identifier, Some(1));
    }

    #[test]
    fn daily_tolerates_missing_or_malformed_body() {
        let empty = daily_from_value(&json!({}));
        assert!(empty.for_day.is_none());
        assert!(empty.entries.is_empty());

        let malformed = daily_from_value(&json!({
            "for_day": "yesterday",
            "day_entries": "none"
        }));
        assert!(malformed.for_day.is_none());
        assert!(malformed.entries.is_empty());
    }
}
