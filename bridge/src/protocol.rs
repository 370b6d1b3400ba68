use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the single host → surface event every [`BridgeEvent`] travels on.
pub const BRIDGE_EVENT: &str = "bridge://event";

/// Stable identity of one editor window.
///
/// Identities are the webview labels (`editor-1`, `editor-2`, ...) and are
/// never handed out twice by the same [`crate::windows::WindowManager`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Requests a rendering surface sends to the privileged process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BridgeCommand {
    RequestNewWindow,
    RequestOpenDialog,
    RequestSaveAs { content: String, suggested_name: String },
    RequestOverwrite { content: String, path: String },
    RequestTitleUpdate { title: String },
}

/// Notifications the privileged process delivers to exactly one window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BridgeEvent {
    ContentReady {
        text: String,
        display_name: String,
        path: String,
    },
    StatusUpdate {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    MenuOpenTriggered,
    MenuSaveTriggered,
    MenuExportTriggered,
}

impl BridgeEvent {
    pub fn status(message: impl Into<String>) -> Self {
        Self::StatusUpdate {
            message: message.into(),
            path: None,
            display_name: None,
        }
    }
}
