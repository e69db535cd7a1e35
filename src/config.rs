use anyhow::Result;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::{ReportFormat, ReportLayout};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub project_name: String,
    pub panel_name: String,
    pub report_title: String,
    pub include_header: bool,
    pub report_format: ReportFormat,
    pub theme: Theme,
    pub export_dir: Option<PathBuf>,
    pub report: ReportLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            panel_name: String::new(),
            report_title: "Panel schedule".to_string(),
            include_header: true,
            report_format: ReportFormat::Pdf,
            theme: Theme::Light,
            export_dir: None,
            report: ReportLayout::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("se", "panel-sheet", "panel-sheet")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Where exports land: the configured directory, else Downloads, else
    /// the working directory.
    pub fn resolved_export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export_dir {
            return dir.clone();
        }

        UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Title printed on the report; falls back to the project name.
    pub fn effective_title(&self) -> String {
        let title = self.report_title.trim();
        if !title.is_empty() {
            title.to_string()
        } else if !self.project_name.trim().is_empty() {
            self.project_name.trim().to_string()
        } else {
            AppConfig::default().report_title
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.report.validate();

        if let Some(dir) = &self.export_dir {
            if dir.as_os_str().is_empty() {
                errors.push("Export directory cannot be empty".to_string());
            } else if dir.exists() && !dir.is_dir() {
                errors.push(format!("Export path '{}' is not a directory", dir.display()));
            }
        }

        errors
    }
}
