//! Localization seam.
//!
//! The core never hardcodes user-facing copy; it asks a [`Localizer`] to
//! render a message for a key plus named parameters. Hosts plug in their
//! own catalog; [`EnglishMessages`] is the built-in fallback.

/// Renders localized text for a message key.
pub trait Localizer: Send + Sync {
    /// Render the message for `key`, substituting `{name}` placeholders
    /// from `params`. Unknown keys render as the key itself.
    fn render(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Built-in English message catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl EnglishMessages {
    fn template(key: &str) -> Option<&'static str> {
        let template = match key {
            "toast.saving" => "Saving...",
            "toast.saved" => "Saved",
            "toast.clearing" => "Clearing...",
            "toast.cleared" => "Cleared",
            "toast.exporting" => "Exporting...",
            "toast.exported" => "Exported",
            "toast.exported_with_path" => "Exported: {path}",
            "toast.export_cancelled" => "Export cancelled",
            "toast.importing" => "Importing...",
            "toast.imported" => "Imported",
            "toast.opened_data_dir" => "Opened data directory",
            "toast.opened_data_dir_with_path" => "Opened data directory: {dir}",
            "toast.deleted_with_name" => "Deleted {name}",
            "toast.draft_available" => "Unsaved draft found",
            "toast.run_ok" => "{name}: OK",
            "toast.run_failed" => "{name}: FAIL (exit={code})",
            "global.enabled" => "WinCron enabled",
            "global.disabled" => "WinCron disabled",
            "common.undo" => "Undo",
            "common.resume" => "Resume",
            "errors.failed_to_save_job" => "failed to save job",
            "errors.failed_to_update_job" => "failed to update job",
            "errors.failed_to_run_job" => "failed to run job",
            "errors.failed_to_run_preview" => "failed to run preview",
            _ => return None,
        };
        Some(template)
    }
}

impl Localizer for EnglishMessages {
    fn render(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = Self::template(key).unwrap_or(key);
        interpolate(template, params)
    }
}

/// Substitute `{name}` placeholders in `template` from `params`.
fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in params {
        rendered = rendered.replace(&format!("{{{name}}}"), value);
    }
    rendered
}
