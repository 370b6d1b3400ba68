use editor_bridge::sink::EventSink;
use editor_bridge::windows::WindowHost;
use editor_bridge::{BridgeError, BridgeEvent, Result, WindowId, BRIDGE_EVENT};
use tauri::{AppHandle, Emitter, EventTarget, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::config::AppConfig;

/// Tauri side of the bridge: real webview windows and window-targeted events.
#[derive(Clone)]
pub struct TauriHost {
    app: AppHandle,
    config: AppConfig,
}

impl TauriHost {
    pub fn new(app: AppHandle, config: AppConfig) -> Self {
        Self { app, config }
    }
}

impl EventSink for TauriHost {
    fn emit(&self, window: &WindowId, event: BridgeEvent) -> Result<()> {
        self.app
            .emit_to(EventTarget::webview_window(window.as_str()), BRIDGE_EVENT, event)
            .map_err(|e| BridgeError::Emit {
                window: window.clone(),
                reason: e.to_string(),
            })
    }
}

impl WindowHost for TauriHost {
    fn open_window(&self, window: &WindowId, title: &str) -> Result<()> {
        WebviewWindowBuilder::new(&self.app, window.as_str(), WebviewUrl::App("index.html".into()))
            .title(title)
            .inner_size(self.config.window_width, self.config.window_height)
            .build()
            .map(drop)
            .map_err(|e| BridgeError::Window {
                window: window.clone(),
                reason: e.to_string(),
            })
    }

    fn set_title(&self, window: &WindowId, title: &str) -> Result<()> {
        let Some(webview) = self.app.get_webview_window(window.as_str()) else {
            return Err(BridgeError::Window {
                window: window.clone(),
                reason: "no such window".to_string(),
            });
        };
        webview.set_title(title).map_err(|e| BridgeError::Window {
            window: window.clone(),
            reason: e.to_string(),
        })
    }
}
