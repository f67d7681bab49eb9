//! Out-of-band signals for the embedding UI.

/// Signals emitted by the store on a broadcast channel, separate from the
/// notification slot so the UI can react even while a toast is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    /// A save attempt finished; the editor can flash success or failure
    /// independently of toast visibility.
    SavePulse { success: bool },
    /// The user accepted draft recovery; the editor view should be shown.
    OpenEditor,
}
