use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub account: String,
    pub username: String,
    pub password: String,
}

pub fn read_credentials() -> Option<Credentials> {
    if let Some(credentials) = credentials_from_env() {
        return Some(credentials);
    }

    let path = credentials_path()?;
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

pub fn write_credentials(credentials: &Credentials) -> Result<(), io::Error> {
    let path = credentials_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))?;
    let json = serde_json::to_string_pretty(credentials)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    fs::write(path, json)
}

fn credentials_from_env() -> Option<Credentials> {
    let account = non_blank(env::var("HARVEST_ACCOUNT").ok()?)?;
    let username = non_blank(env::var("HARVEST_USERNAME").ok()?)?;
    let password = non_blank(env::var("HARVEST_PASSWORD").ok()?)?;
    Some(Credentials {
        account,
        username,
        password,
    })
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn credentials_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".harvtrack.json");
    Some(path)
}
