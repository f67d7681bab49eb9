//! Application settings and config import/export types.

use serde::{Deserialize, Serialize};

/// What the window close button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CloseBehavior {
    /// Keep running in the tray.
    #[default]
    Tray,
    /// Exit the application.
    Exit,
}

impl CloseBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tray => "tray",
            Self::Exit => "exit",
        }
    }
}

impl From<String> for CloseBehavior {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("exit") {
            Self::Exit
        } else {
            Self::Tray
        }
    }
}

impl From<CloseBehavior> for String {
    fn from(value: CloseBehavior) -> Self {
        value.as_str().to_string()
    }
}

/// Persisted application settings, as served by the settings service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub close_behavior: CloseBehavior,
    pub silent_start: bool,
    pub auto_start: bool,
    pub lightweight_mode: bool,
}

/// How to resolve name conflicts when importing a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStrategy {
    /// Keep both: imported jobs get fresh identities.
    #[default]
    Coexist,
    /// Imported jobs replace same-named existing jobs.
    Overwrite,
}

impl ImportStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coexist => "coexist",
            Self::Overwrite => "overwrite",
        }
    }
}

/// Flags for exporting the config document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Include application settings in the export.
    pub export_settings: bool,
    /// Export only enabled jobs.
    pub only_enabled: bool,
}
