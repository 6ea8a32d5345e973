use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "studio.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub api_key: Option<String>,
    pub download_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:54321/functions/v1/generate-fashion-design".into(),
            api_key: None,
            download_dir: None,
        }
    }
}

impl Settings {
    /// Configured download directory, else the OS download folder, else cwd.
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    service_url: Option<String>,
    api_key: Option<String>,
    download_dir: Option<PathBuf>,
}

/// Defaults, then the TOML file at `path` if it exists, then the environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(path, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg);
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
    }

    apply_env_overrides(&mut settings, lookup);
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = non_empty(file_cfg.service_url) {
        settings.service_url = v;
    }
    if let Some(v) = non_empty(file_cfg.api_key) {
        settings.api_key = Some(v);
    }
    if let Some(v) = file_cfg.download_dir {
        settings.download_dir = Some(v);
    }
}

/// Later names win, so `APP__*` overrides the plain variable.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for name in ["DESIGN_SERVICE_URL", "APP__SERVICE_URL"] {
        if let Some(v) = non_empty(lookup(name)) {
            settings.service_url = v;
        }
    }
    for name in ["DESIGN_SERVICE_API_KEY", "APP__API_KEY"] {
        if let Some(v) = non_empty(lookup(name)) {
            settings.api_key = Some(v);
        }
    }
    if let Some(v) = non_empty(lookup("APP__DOWNLOAD_DIR")) {
        settings.download_dir = Some(PathBuf::from(v));
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
