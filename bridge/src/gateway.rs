use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dialogs::{save_filters_for, FileDialogs, OPEN_FILTERS};
use crate::document::file_name;
use crate::error::{BridgeError, Result};
use crate::protocol::{BridgeEvent, WindowId};
use crate::registry::FileOwnershipRegistry;
use crate::sink::EventSink;

pub const SAVE_AS_CANCELLED: &str = "Save As operation cancelled.";

/// Dialogs and file I/O performed on behalf of one window at a time.
///
/// Every operation reports back through the sink to the window that asked,
/// and only after the read or write has finished. The `Err` side of the
/// returned `Result` is reserved for delivery failures; I/O failures become
/// status events.
pub struct FileAccessGateway<D, S> {
    dialogs: D,
    sink: S,
    registry: Arc<FileOwnershipRegistry>,
}

impl<D: FileDialogs, S: EventSink> FileAccessGateway<D, S> {
    pub fn new(dialogs: D, sink: S, registry: Arc<FileOwnershipRegistry>) -> Self {
        Self {
            dialogs,
            sink,
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<FileOwnershipRegistry> {
        &self.registry
    }

    /// The asking window's own binding.
    pub fn binding(&self, window: &WindowId) -> Option<PathBuf> {
        self.registry.binding(window)
    }

    pub async fn prompt_open(&self, window: &WindowId) -> Result<()> {
        let Some(path) = self.dialogs.pick_open(window, OPEN_FILTERS).await else {
            log::debug!("{window}: open cancelled");
            return Ok(());
        };
        self.read_file(window, path).await
    }

    pub async fn read_file(&self, window: &WindowId, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let event = match read_text(path).await {
            Ok((text, shown)) => {
                self.registry.bind(window, path);
                log::info!("{window}: opened {shown}");
                BridgeEvent::ContentReady {
                    text,
                    display_name: file_name(shown).to_string(),
                    path: shown.to_string(),
                }
            }
            Err(source) => {
                let err = BridgeError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                log::warn!("{window}: reading {} failed: {err}", path.display());
                BridgeEvent::status(err.to_string())
            }
        };
        self.sink.emit(window, event)
    }

    pub async fn prompt_save_as(
        &self,
        window: &WindowId,
        content: &str,
        suggested_name: &str,
    ) -> Result<()> {
        let filters = save_filters_for(suggested_name);
        let Some(path) = self.dialogs.pick_save(window, suggested_name, filters).await else {
            log::debug!("{window}: save-as cancelled");
            return self.sink.emit(window, BridgeEvent::status(SAVE_AS_CANCELLED));
        };

        let event = match write_file(&path, content).await {
            Ok(shown) => {
                self.registry.bind(window, &path);
                let display_name = file_name(shown).to_string();
                log::info!("{window}: saved as {shown}");
                BridgeEvent::StatusUpdate {
                    message: saved_message(&display_name),
                    path: Some(shown.to_string()),
                    display_name: Some(display_name),
                }
            }
            Err(err) => {
                log::warn!("{window}: {err}");
                BridgeEvent::status(err.to_string())
            }
        };
        self.sink.emit(window, event)
    }

    /// Writes to a path the window already knows. The binding is left alone.
    pub async fn overwrite(
        &self,
        window: &WindowId,
        content: &str,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        if !self.registry.is_bound_to(window, path) {
            log::debug!(
                "{window}: overwriting {} which is not its bound file",
                path.display()
            );
        }
        let event = match write_file(path, content).await {
            Ok(shown) => {
                log::info!("{window}: saved {shown}");
                BridgeEvent::status(saved_message(file_name(shown)))
            }
            Err(err) => {
                log::warn!("{window}: {err}");
                BridgeEvent::status(err.to_string())
            }
        };
        self.sink.emit(window, event)
    }
}

fn saved_message(display_name: &str) -> String {
    format!("File saved successfully: {display_name}")
}

/// Surfaces hold paths as strings and send them back on Save, so a path
/// that does not survive that round trip is refused up front.
fn utf8_path(path: &Path) -> io::Result<&str> {
    path.to_str().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "file path is not valid UTF-8")
    })
}

async fn read_text(path: &Path) -> io::Result<(String, &str)> {
    let shown = utf8_path(path)?;
    Ok((tokio::fs::read_to_string(path).await?, shown))
}

async fn write_file<'a>(path: &'a Path, content: &str) -> Result<&'a str> {
    let write = async {
        let shown = utf8_path(path)?;
        tokio::fs::write(path, content).await?;
        Ok::<_, io::Error>(shown)
    };
    write.await.map_err(|source| BridgeError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::FileFilter;
    use crate::sink::EventHub;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Answers prompts from a script; an empty script means "cancel".
    #[derive(Default)]
    struct ScriptedDialogs {
        answers: Mutex<VecDeque<Option<PathBuf>>>,
        suggested: Mutex<Vec<String>>,
    }

    impl ScriptedDialogs {
        fn answering(answers: impl IntoIterator<Item = Option<PathBuf>>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().collect()),
                ..Self::default()
            }
        }
    }

    impl FileDialogs for ScriptedDialogs {
        async fn pick_open(
            &self,
            _window: &WindowId,
            _filters: &'static [FileFilter],
        ) -> Option<PathBuf> {
            self.answers.lock().pop_front().flatten()
        }

        async fn pick_save(
            &self,
            _window: &WindowId,
            suggested_name: &str,
            _filters: &'static [FileFilter],
        ) -> Option<PathBuf> {
            self.suggested.lock().push(suggested_name.to_string());
            self.answers.lock().pop_front().flatten()
        }
    }

    fn gateway(
        dialogs: ScriptedDialogs,
    ) -> (FileAccessGateway<ScriptedDialogs, EventHub>, EventHub) {
        let hub = EventHub::new();
        let gateway = FileAccessGateway::new(
            dialogs,
            hub.clone(),
            Arc::new(FileOwnershipRegistry::new()),
        );
        (gateway, hub)
    }

    #[tokio::test]
    async fn open_binds_and_delivers_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "# A\r\nline").unwrap();

        let (gateway, hub) = gateway(ScriptedDialogs::answering([Some(path.clone())]));
        let w1 = WindowId::from("editor-1");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.prompt_open(&w1).await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            BridgeEvent::ContentReady {
                text: "# A\r\nline".to_string(),
                display_name: "a.md".to_string(),
                path: path.to_string_lossy().into_owned(),
            }
        );
        assert_eq!(gateway.binding(&w1), Some(path));
    }

    #[tokio::test]
    async fn cancelled_open_is_silent() {
        let (gateway, hub) = gateway(ScriptedDialogs::default());
        let w1 = WindowId::from("editor-1");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.prompt_open(&w1).await.unwrap();

        assert!(rx.try_recv().is_err());
        assert_eq!(gateway.binding(&w1), None);
    }

    #[tokio::test]
    async fn failed_read_reports_status_and_keeps_binding() {
        let dir = tempfile::tempdir().unwrap();
        let (gateway, hub) = gateway(ScriptedDialogs::default());
        let w1 = WindowId::from("editor-1");
        gateway.registry().bind(&w1, dir.path().join("old.md"));
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway
            .read_file(&w1, dir.path().join("missing.md"))
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            BridgeEvent::StatusUpdate { message, path, .. } => {
                assert!(message.starts_with("Failed to open file:"), "{message}");
                assert_eq!(path, None);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(gateway.binding(&w1), Some(dir.path().join("old.md")));
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let (gateway, hub) = gateway(ScriptedDialogs::default());
        let w1 = WindowId::from("editor-1");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.read_file(&w1, &path).await.unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            BridgeEvent::StatusUpdate { ref message, .. } if message.starts_with("Failed to open file:")
        ));
        assert_eq!(gateway.binding(&w1), None);
    }

    #[tokio::test]
    async fn save_as_writes_binds_and_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("notes.md");
        let (gateway, hub) = gateway(ScriptedDialogs::answering([Some(target.clone())]));
        let w1 = WindowId::from("editor-1");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway
            .prompt_save_as(&w1, "hello\n", "Untitled.md")
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "hello\n");
        assert_eq!(gateway.binding(&w1), Some(target.clone()));
        assert_eq!(
            rx.try_recv().unwrap(),
            BridgeEvent::StatusUpdate {
                message: "File saved successfully: notes.md".to_string(),
                path: Some(target.to_string_lossy().into_owned()),
                display_name: Some("notes.md".to_string()),
            }
        );
        assert_eq!(gateway.dialogs.suggested.lock().as_slice(), ["Untitled.md"]);
    }

    #[tokio::test]
    async fn cancelled_save_as_emits_one_bare_status() {
        let (gateway, hub) = gateway(ScriptedDialogs::default());
        let w1 = WindowId::from("editor-1");
        gateway.registry().bind(&w1, "/docs/a.md");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.prompt_save_as(&w1, "x", "a.md").await.unwrap();

        assert_eq!(rx.try_recv().unwrap(), BridgeEvent::status(SAVE_AS_CANCELLED));
        assert!(rx.try_recv().is_err());
        assert_eq!(gateway.binding(&w1), Some(PathBuf::from("/docs/a.md")));
    }

    #[tokio::test]
    async fn failed_save_as_leaves_binding() {
        let dir = tempfile::tempdir().unwrap();
        let unwritable = dir.path().join("no-such-dir").join("a.md");
        let (gateway, hub) = gateway(ScriptedDialogs::answering([Some(unwritable)]));
        let w1 = WindowId::from("editor-1");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.prompt_save_as(&w1, "x", "a.md").await.unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            BridgeEvent::StatusUpdate { ref message, path: None, .. } if message.starts_with("Failed to save file:")
        ));
        assert_eq!(gateway.binding(&w1), None);
    }

    #[tokio::test]
    async fn failed_overwrite_reports_status_and_keeps_binding() {
        let dir = tempfile::tempdir().unwrap();
        let bound = dir.path().join("a.md");
        let unwritable = dir.path().join("no-such-dir").join("a.md");
        let (gateway, hub) = gateway(ScriptedDialogs::default());
        let w1 = WindowId::from("editor-1");
        gateway.registry().bind(&w1, &bound);
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.overwrite(&w1, "x", &unwritable).await.unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            BridgeEvent::StatusUpdate { ref message, path: None, display_name: None }
                if message.starts_with("Failed to save file:")
        ));
        assert!(rx.try_recv().is_err());
        assert_eq!(gateway.binding(&w1), Some(bound));
        assert!(!unwritable.exists());
    }

    #[cfg(target_os = "linux")]
    fn non_utf8_name(dir: &Path) -> PathBuf {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        dir.join(OsStr::from_bytes(b"caf\xE9.md"))
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_path_is_not_opened_or_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = non_utf8_name(dir.path());
        std::fs::write(&path, "original").unwrap();
        let (gateway, hub) = gateway(ScriptedDialogs::answering([Some(path)]));
        let w1 = WindowId::from("editor-1");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.prompt_open(&w1).await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            BridgeEvent::status("Failed to open file: file path is not valid UTF-8")
        );
        assert_eq!(gateway.binding(&w1), None);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_save_as_target_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = non_utf8_name(dir.path());
        let (gateway, hub) = gateway(ScriptedDialogs::answering([Some(path.clone())]));
        let w1 = WindowId::from("editor-1");
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.prompt_save_as(&w1, "x", "a.md").await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            BridgeEvent::status("Failed to save file: file path is not valid UTF-8")
        );
        assert_eq!(gateway.binding(&w1), None);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn overwrite_reports_base_name_without_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "old").unwrap();
        let (gateway, hub) = gateway(ScriptedDialogs::default());
        let w1 = WindowId::from("editor-1");
        gateway.registry().bind(&w1, &path);
        let (_sub, mut rx) = hub.subscribe(&w1);

        gateway.overwrite(&w1, "new", &path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(
            rx.try_recv().unwrap(),
            BridgeEvent::status("File saved successfully: a.md")
        );
        assert_eq!(gateway.binding(&w1), Some(path));
    }
}
