use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::protocol::WindowId;

/// Failures inside the privileged process. None of them are fatal; each is
/// reported to the one window whose request produced it.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Failed to open file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to save file: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Window {window} could not be created: {reason}")]
    Window { window: WindowId, reason: String },

    #[error("Event for window {window} could not be delivered: {reason}")]
    Emit { window: WindowId, reason: String },
}

pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
