//! # WinCron Protocols
//!
//! Shared data model and interface seams for the wincron UI core.
//! Contains the wire types exchanged with the remote service and the
//! localization seam - no business logic.

pub mod localize;
pub mod types;

pub use localize::{EnglishMessages, Localizer};
pub use types::*;
