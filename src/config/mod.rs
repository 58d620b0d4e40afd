use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where `set<N>.txt` files live. Unset means the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_label_font_max")]
    pub label_font_max: f32,
    #[serde(default = "default_label_font_min")]
    pub label_font_min: f32,
    #[serde(default = "default_true")]
    pub show_window: bool,
}

fn default_label_font_max() -> f32 {
    8.0
}

fn default_label_font_min() -> f32 {
    6.0
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            label_font_max: default_label_font_max(),
            label_font_min: default_label_font_min(),
            show_window: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            Self::from_json(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "timetable", "timetable")
    }

    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = Self::project_dirs()
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Directory holding saved sets. Falls back to `timetable_data` in the
    /// working directory when the platform has no data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("sets"))
            .unwrap_or_else(|| PathBuf::from("timetable_data"))
    }

    /// Font range for entry labels, with the bounds put in order
    pub fn label_font_range(&self) -> (f32, f32) {
        let max = self.label_font_max.max(self.label_font_min);
        let min = self.label_font_max.min(self.label_font_min);
        (max, min)
    }
}
