#![allow(dead_code)]

use editor_bridge::dialogs::{FileDialogs, FileFilter};
use editor_bridge::windows::WindowHost;
use editor_bridge::{Result, WindowId};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Notify;

/// Prompt answers scripted per window. A window with no script cancels.
#[derive(Default)]
pub struct FakeDialogs {
    answers: Mutex<HashMap<WindowId, VecDeque<Option<PathBuf>>>>,
    gate: Option<(WindowId, Arc<Notify>)>,
}

impl FakeDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, window: &WindowId, path: Option<PathBuf>) -> Self {
        self.answers
            .lock()
            .entry(window.clone())
            .or_default()
            .push_back(path);
        self
    }

    /// Prompts for `window` stay open until `gate` is notified.
    pub fn gated(mut self, window: &WindowId, gate: Arc<Notify>) -> Self {
        self.gate = Some((window.clone(), gate));
        self
    }

    async fn next(&self, window: &WindowId) -> Option<PathBuf> {
        if let Some((gated, gate)) = &self.gate {
            if gated == window {
                gate.notified().await;
            }
        }
        self.answers
            .lock()
            .get_mut(window)
            .and_then(VecDeque::pop_front)
            .flatten()
    }
}

impl FileDialogs for FakeDialogs {
    async fn pick_open(&self, window: &WindowId, _filters: &'static [FileFilter]) -> Option<PathBuf> {
        self.next(window).await
    }

    async fn pick_save(
        &self,
        window: &WindowId,
        _suggested_name: &str,
        _filters: &'static [FileFilter],
    ) -> Option<PathBuf> {
        self.next(window).await
    }
}

#[derive(Clone, Default)]
pub struct FakeHost {
    pub opened: Arc<Mutex<Vec<WindowId>>>,
    pub titles: Arc<Mutex<Vec<(WindowId, String)>>>,
}

impl WindowHost for FakeHost {
    fn open_window(&self, window: &WindowId, _title: &str) -> Result<()> {
        self.opened.lock().push(window.clone());
        Ok(())
    }

    fn set_title(&self, window: &WindowId, title: &str) -> Result<()> {
        self.titles.lock().push((window.clone(), title.to_string()));
        Ok(())
    }
}
