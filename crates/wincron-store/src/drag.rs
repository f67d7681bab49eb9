//! Drag identity codec.
//!
//! A dragged entity is either a job or a folder, never both. Its identity
//! is written into the drag payload twice for transport compatibility: a
//! typed slot (`application/x-wincron-job` / `application/x-wincron-folder`)
//! and a `text/plain` fallback with a literal prefix. Some environments do
//! not preserve custom payload types mid-drag, so the codec also tracks an
//! ambient "currently dragging" value outside the payload.

use parking_lot::Mutex;

/// Typed payload slot for a dragged job id.
pub const JOB_MEDIA_TYPE: &str = "application/x-wincron-job";
/// Typed payload slot for a dragged folder name.
pub const FOLDER_MEDIA_TYPE: &str = "application/x-wincron-folder";
/// Plain-text slot shared by both subjects.
pub const TEXT_MEDIA_TYPE: &str = "text/plain";
/// Plain-text prefix marking a job payload.
pub const JOB_TEXT_PREFIX: &str = "wincron-job:";
/// Plain-text prefix marking a folder payload.
pub const FOLDER_TEXT_PREFIX: &str = "wincron-folder:";

/// Host-agnostic view of a drag payload: ordered media-type slots.
#[derive(Debug, Clone, Default)]
pub struct DragData {
    slots: Vec<(String, String)>,
}

impl DragData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a slot, replacing any previous value for the same type.
    pub fn set_data(&mut self, media_type: &str, value: &str) {
        if let Some(slot) = self.slots.iter_mut().find(|(t, _)| t == media_type) {
            slot.1 = value.to_string();
        } else {
            self.slots.push((media_type.to_string(), value.to_string()));
        }
    }

    /// Read a slot; empty when absent.
    pub fn get_data(&self, media_type: &str) -> &str {
        self.slots
            .iter()
            .find(|(t, _)| t == media_type)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Whether a slot of this type is present.
    pub fn has_type(&self, media_type: &str) -> bool {
        self.slots.iter().any(|(t, _)| t == media_type)
    }
}

#[derive(Default)]
struct ActiveDrag {
    job_id: String,
    folder: String,
}

/// Encodes and decodes drag identities.
pub struct DragTransfer {
    normalize_folder: Box<dyn Fn(&str) -> String + Send + Sync>,
    active: Mutex<ActiveDrag>,
}

impl Default for DragTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTransfer {
    /// Codec with the default folder normalizer (trim).
    pub fn new() -> Self {
        Self::with_normalizer(|name| name.trim().to_string())
    }

    /// Codec with an injected folder-name normalizer, applied before any
    /// comparison or storage.
    pub fn with_normalizer<F>(normalize_folder: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            normalize_folder: Box::new(normalize_folder),
            active: Mutex::new(ActiveDrag::default()),
        }
    }

    /// Begin dragging a job; encodes its id into the payload.
    pub fn start_job_drag(&self, data: Option<&mut DragData>, job_id: &str) {
        if job_id.is_empty() {
            return;
        }
        {
            let mut active = self.active.lock();
            active.job_id = job_id.to_string();
            active.folder.clear();
        }
        if let Some(data) = data {
            data.set_data(JOB_MEDIA_TYPE, job_id);
            data.set_data(TEXT_MEDIA_TYPE, &format!("{JOB_TEXT_PREFIX}{job_id}"));
        }
    }

    /// Begin dragging a folder; encodes its normalized name.
    pub fn start_folder_drag(&self, data: Option<&mut DragData>, folder: &str) {
        let name = (self.normalize_folder)(folder);
        if name.is_empty() {
            return;
        }
        {
            let mut active = self.active.lock();
            active.folder = name.clone();
            active.job_id.clear();
        }
        if let Some(data) = data {
            data.set_data(FOLDER_MEDIA_TYPE, &name);
            data.set_data(TEXT_MEDIA_TYPE, &format!("{FOLDER_TEXT_PREFIX}{name}"));
        }
    }

    /// Decode the dragged job id; empty when the drag is a folder or
    /// nothing decodes.
    pub fn job_id(&self, data: Option<&DragData>) -> String {
        let Some(data) = data else {
            return self.active.lock().job_id.clone();
        };
        // Folders and jobs are mutually exclusive drag subjects.
        if data.has_type(FOLDER_MEDIA_TYPE) {
            return String::new();
        }
        if data.has_type(JOB_MEDIA_TYPE) {
            let id = data.get_data(JOB_MEDIA_TYPE);
            if !id.is_empty() {
                return id.to_string();
            }
            return self.active.lock().job_id.clone();
        }

        let raw = data.get_data(TEXT_MEDIA_TYPE);
        if raw.starts_with(FOLDER_TEXT_PREFIX) {
            return String::new();
        }
        if let Some(id) = raw.strip_prefix(JOB_TEXT_PREFIX) {
            return id.to_string();
        }
        if !raw.is_empty() {
            return raw.to_string();
        }
        self.active.lock().job_id.clone()
    }

    /// Decode the dragged folder name, normalized; empty when the drag is
    /// a job or nothing decodes.
    pub fn folder_name(&self, data: Option<&DragData>) -> String {
        let Some(data) = data else {
            return (self.normalize_folder)(&self.active.lock().folder);
        };
        if data.has_type(FOLDER_MEDIA_TYPE) {
            let name = (self.normalize_folder)(data.get_data(FOLDER_MEDIA_TYPE));
            if !name.is_empty() {
                return name;
            }
            return (self.normalize_folder)(&self.active.lock().folder);
        }

        let raw = data.get_data(TEXT_MEDIA_TYPE);
        if let Some(name) = raw.strip_prefix(FOLDER_TEXT_PREFIX) {
            return (self.normalize_folder)(name);
        }
        (self.normalize_folder)(&self.active.lock().folder)
    }

    /// Forget the ambient drag state once the drag ends.
    pub fn clear(&self) {
        let mut active = self.active.lock();
        active.job_id.clear();
        active.folder.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_drag_round_trip() {
        let transfer = DragTransfer::new();
        let mut data = DragData::new();
        transfer.start_job_drag(Some(&mut data), "j1");

        assert_eq!(transfer.job_id(Some(&data)), "j1");
        assert_eq!(transfer.folder_name(Some(&data)), "");
        assert_eq!(data.get_data(TEXT_MEDIA_TYPE), "wincron-job:j1");
    }

    #[test]
    fn test_folder_drag_is_normalized_and_excludes_job() {
        let transfer = DragTransfer::new();
        let mut data = DragData::new();
        transfer.start_folder_drag(Some(&mut data), " Ops ");

        assert_eq!(transfer.folder_name(Some(&data)), "Ops");
        // A folder payload forces an empty job read on the same drag.
        assert_eq!(transfer.job_id(Some(&data)), "");
        assert_eq!(data.get_data(TEXT_MEDIA_TYPE), "wincron-folder:Ops");
    }

    #[test]
    fn test_text_fallback_decoding() {
        let transfer = DragTransfer::new();
        let mut data = DragData::new();
        // Typed slots stripped by the environment; only text/plain survives.
        data.set_data(TEXT_MEDIA_TYPE, "wincron-job:j7");
        assert_eq!(transfer.job_id(Some(&data)), "j7");

        let mut data = DragData::new();
        data.set_data(TEXT_MEDIA_TYPE, "wincron-folder:Reports");
        assert_eq!(transfer.folder_name(Some(&data)), "Reports");
        assert_eq!(transfer.job_id(Some(&data)), "");
    }

    #[test]
    fn test_bare_text_is_taken_as_job_id() {
        let transfer = DragTransfer::new();
        let mut data = DragData::new();
        data.set_data(TEXT_MEDIA_TYPE, "raw-id");
        assert_eq!(transfer.job_id(Some(&data)), "raw-id");
    }

    #[test]
    fn test_ambient_fallback_when_payload_is_lost() {
        let transfer = DragTransfer::new();
        transfer.start_job_drag(None, "j9");

        // The environment dropped the payload entirely.
        assert_eq!(transfer.job_id(None), "j9");
        assert_eq!(transfer.job_id(Some(&DragData::new())), "j9");

        transfer.clear();
        assert_eq!(transfer.job_id(None), "");
    }

    #[test]
    fn test_starting_folder_drag_clears_ambient_job() {
        let transfer = DragTransfer::new();
        transfer.start_job_drag(None, "j1");
        transfer.start_folder_drag(None, "Ops");

        assert_eq!(transfer.job_id(None), "");
        assert_eq!(transfer.folder_name(None), "Ops");
    }

    #[test]
    fn test_empty_subjects_are_ignored() {
        let transfer = DragTransfer::new();
        let mut data = DragData::new();
        transfer.start_job_drag(Some(&mut data), "");
        transfer.start_folder_drag(Some(&mut data), "   ");

        assert!(!data.has_type(JOB_MEDIA_TYPE));
        assert!(!data.has_type(FOLDER_MEDIA_TYPE));
        assert_eq!(transfer.job_id(Some(&data)), "");
    }

    #[test]
    fn test_injected_normalizer_applies_everywhere() {
        let transfer = DragTransfer::with_normalizer(|name| name.trim().to_lowercase());
        let mut data = DragData::new();
        transfer.start_folder_drag(Some(&mut data), " OPS ");

        assert_eq!(data.get_data(FOLDER_MEDIA_TYPE), "ops");
        assert_eq!(transfer.folder_name(Some(&data)), "ops");
    }
}
