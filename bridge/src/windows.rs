use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::document::{window_title, UNTITLED_NAME};
use crate::error::Result;
use crate::protocol::WindowId;
use crate::registry::FileOwnershipRegistry;

pub const WINDOW_LABEL_PREFIX: &str = "editor-";

/// The platform side of window lifecycle.
pub trait WindowHost: Send + Sync {
    /// Mounts a fresh rendering surface for `window`.
    fn open_window(&self, window: &WindowId, title: &str) -> Result<()>;

    fn set_title(&self, window: &WindowId, title: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct WindowState {
    live: BTreeSet<WindowId>,
    next_index: u64,
    focused: Option<WindowId>,
    last_focused: Option<WindowId>,
}

/// Tracks live editor windows and their focus.
///
/// The host is never called with the state lock held: platform window
/// creation can synchronously fire focus events back into this manager.
pub struct WindowManager<H> {
    host: H,
    registry: Arc<FileOwnershipRegistry>,
    state: Mutex<WindowState>,
}

impl<H: WindowHost> WindowManager<H> {
    pub fn new(host: H, registry: Arc<FileOwnershipRegistry>) -> Self {
        Self {
            host,
            registry,
            state: Mutex::new(WindowState::default()),
        }
    }

    pub fn create_window(&self) -> Result<WindowId> {
        let window = {
            let mut state = self.state.lock();
            state.next_index += 1;
            let window = WindowId::new(format!("{WINDOW_LABEL_PREFIX}{}", state.next_index));
            state.live.insert(window.clone());
            window
        };

        if let Err(err) = self.host.open_window(&window, &window_title(UNTITLED_NAME)) {
            log::warn!("{err}");
            self.state.lock().live.remove(&window);
            return Err(err);
        }
        log::info!("created window {window}");
        Ok(window)
    }

    /// Returns whether the window was still live. Safe to call twice.
    pub fn on_window_closed(&self, window: &WindowId) -> bool {
        let was_live = {
            let mut state = self.state.lock();
            if state.focused.as_ref() == Some(window) {
                state.focused = None;
            }
            if state.last_focused.as_ref() == Some(window) {
                state.last_focused = None;
            }
            state.live.remove(window)
        };
        self.registry.release(window);
        if was_live {
            log::info!("closed window {window}");
        }
        was_live
    }

    /// Dock-click reactivation: make sure at least one window exists.
    pub fn activate_or_create(&self) -> Result<Option<WindowId>> {
        if self.state.lock().live.is_empty() {
            return self.create_window().map(Some);
        }
        Ok(None)
    }

    pub fn set_title(&self, window: &WindowId, title: &str) -> Result<()> {
        if !self.is_live(window) {
            log::debug!("ignoring title for closed window {window}");
            return Ok(());
        }
        self.host.set_title(window, title)
    }

    pub fn on_window_focused(&self, window: &WindowId, focused: bool) {
        let mut state = self.state.lock();
        if !state.live.contains(window) {
            return;
        }
        if focused {
            state.focused = Some(window.clone());
            state.last_focused = Some(window.clone());
        } else if state.focused.as_ref() == Some(window) {
            state.focused = None;
        }
    }

    /// Where a menu command goes: the focused window, else the window that
    /// was focused most recently and is still open.
    pub fn menu_target(&self) -> Option<WindowId> {
        let state = self.state.lock();
        state
            .focused
            .clone()
            .or_else(|| state.last_focused.clone())
    }

    pub fn is_live(&self, window: &WindowId) -> bool {
        self.state.lock().live.contains(window)
    }

    pub fn live_windows(&self) -> Vec<WindowId> {
        self.state.lock().live.iter().cloned().collect()
    }
}
