use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    /// JSON array of grids served by `/api/levels`; built-in levels when unset.
    pub levels_path: Option<PathBuf>,
    /// JSON mirror of the leaderboard; memory only when unset.
    pub leaderboard_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            levels_path: None,
            leaderboard_path: Some(PathBuf::from("leaderboard.json")),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("levels_path") {
        settings.levels_path = optional_path(v);
    }
    if let Some(v) = file_cfg.get("leaderboard_path") {
        settings.leaderboard_path = optional_path(v);
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__LEVELS_PATH") {
        settings.levels_path = optional_path(&v);
    }
    if let Some(v) = var("APP__LEADERBOARD_PATH") {
        settings.leaderboard_path = optional_path(&v);
    }
}

/// An empty value switches the file off.
fn optional_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| PathBuf::from(raw))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
