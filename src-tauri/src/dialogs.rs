use editor_bridge::dialogs::{FileDialogs, FileFilter};
use editor_bridge::WindowId;
use rfd::FileDialog;
use std::path::PathBuf;
use tauri::{AppHandle, Manager};

/// Native prompts through `rfd`, modal to the asking window and run on the
/// blocking pool so an open prompt never stalls the event loop or another
/// window's I/O.
#[derive(Clone)]
pub struct RfdDialogs {
    app: AppHandle,
}

impl RfdDialogs {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn dialog(&self, window: &WindowId, title: &str, filters: &[FileFilter]) -> FileDialog {
        let mut dialog = FileDialog::new().set_title(title);
        match self.app.get_webview_window(window.as_str()) {
            Some(parent) => dialog = dialog.set_parent(&parent),
            None => log::debug!("{window}: no webview to parent the prompt on"),
        }
        for filter in filters {
            dialog = dialog.add_filter(filter.name, filter.extensions);
        }
        dialog
    }
}

impl FileDialogs for RfdDialogs {
    async fn pick_open(&self, window: &WindowId, filters: &'static [FileFilter]) -> Option<PathBuf> {
        let dialog = self.dialog(window, "Open File", filters);
        prompt(window, move || dialog.pick_file()).await
    }

    async fn pick_save(
        &self,
        window: &WindowId,
        suggested_name: &str,
        filters: &'static [FileFilter],
    ) -> Option<PathBuf> {
        let dialog = self
            .dialog(window, "Save File", filters)
            .set_file_name(suggested_name);
        prompt(window, move || dialog.save_file()).await
    }
}

async fn prompt<F>(window: &WindowId, show: F) -> Option<PathBuf>
where
    F: FnOnce() -> Option<PathBuf> + Send + 'static,
{
    match tauri::async_runtime::spawn_blocking(show).await {
        Ok(path) => path,
        Err(e) => {
            log::warn!("{}: file dialog failed: {}", window, e);
            None
        }
    }
}
