//! Document state held by a rendering surface.
//!
//! The privileged process never sees a [`Document`]; it only moves bytes.
//! Everything here is pure so the surface and the tests share one model of
//! "what does Save do right now".

use crate::protocol::{BridgeCommand, BridgeEvent};
use pulldown_cmark::{Options, Parser};
use regex::Regex;
use std::sync::OnceLock;

pub const APP_NAME: &str = "Markdown Editor";

pub const UNTITLED_NAME: &str = "Untitled.md";

pub const DEFAULT_TEMPLATE: &str = "# Welcome to Markdown Editor\n\n\
Write markdown on the left, see the preview on the right.\n\n\
- **Open** a `.md`, `.markdown` or `.txt` file from the File menu\n\
- **Save** writes back to the file you opened\n\
- **Export HTML** saves the rendered preview as a standalone page\n";

/// What the surface asks the host to do after an incoming event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceAction {
    None,
    OpenFile,
    SaveFile,
    ExportHtml,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub html: String,
    pub display_name: String,
    /// Path of the file this window is bound to, if any.
    pub path: Option<String>,
    pub status: Option<String>,
    /// Set while an export's save-as is outstanding.
    pub export_pending: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
            html: render_html(DEFAULT_TEMPLATE),
            display_name: UNTITLED_NAME.to_string(),
            path: None,
            status: None,
            export_pending: false,
        }
    }

    pub fn set_text(&mut self, text: String) {
        if self.text == text {
            return;
        }
        self.html = render_html(&text);
        self.text = text;
    }

    /// "New Document": back to the welcome template, unbound.
    pub fn reset(&mut self) {
        *self = Self {
            status: Some("New document created.".to_string()),
            ..Self::new()
        };
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }

    pub fn window_title(&self) -> String {
        window_title(&self.display_name)
    }

    /// Folds a host event into the document and reports any follow-up the
    /// surface has to issue itself.
    pub fn apply_event(&mut self, event: BridgeEvent) -> SurfaceAction {
        match event {
            BridgeEvent::ContentReady {
                text,
                display_name,
                path,
            } => {
                self.status = Some(format!("Opened {display_name}"));
                self.html = render_html(&text);
                self.text = text;
                self.display_name = display_name;
                self.path = Some(path);
                SurfaceAction::None
            }
            BridgeEvent::StatusUpdate {
                message,
                path,
                display_name,
            } => {
                self.status = Some(message);
                // Only a completed save-as carries a path. The answer to an
                // export names the exported page, not this document.
                let exported = std::mem::take(&mut self.export_pending);
                if let Some(path) = path.filter(|_| !exported) {
                    self.display_name =
                        display_name.unwrap_or_else(|| file_name(&path).to_string());
                    self.path = Some(path);
                }
                SurfaceAction::None
            }
            BridgeEvent::MenuOpenTriggered => SurfaceAction::OpenFile,
            BridgeEvent::MenuSaveTriggered => SurfaceAction::SaveFile,
            BridgeEvent::MenuExportTriggered => SurfaceAction::ExportHtml,
        }
    }

    /// Overwrite when the window already owns a path, save-as otherwise.
    pub fn save_command(&self) -> BridgeCommand {
        match &self.path {
            Some(path) => BridgeCommand::RequestOverwrite {
                content: self.text.clone(),
                path: path.clone(),
            },
            None => self.save_as_command(),
        }
    }

    pub fn save_as_command(&self) -> BridgeCommand {
        BridgeCommand::RequestSaveAs {
            content: self.text.clone(),
            suggested_name: self.display_name.clone(),
        }
    }

    /// Export is a save-as of the rendered page. The document stays bound
    /// to its markdown file.
    pub fn export_command(&mut self) -> BridgeCommand {
        let name = export_file_name(&self.display_name);
        self.export_pending = true;
        BridgeCommand::RequestSaveAs {
            content: export_html(&self.text, &name),
            suggested_name: name,
        }
    }
}

pub fn window_title(display_name: &str) -> String {
    format!("{display_name} - {APP_NAME}")
}

/// Final path segment, accepting both separators since the host may be Windows.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(trimmed)
}

/// `report.md` → `report.html`, `Notes.MARKDOWN` → `notes.html`.
pub fn export_file_name(display_name: &str) -> String {
    static RE_MD_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let re = RE_MD_SUFFIX.get_or_init(|| Regex::new(r"\.(?:md|markdown)$").unwrap());
    let name = display_name.to_lowercase();
    if re.is_match(&name) {
        re.replace(&name, ".html").into_owned()
    } else {
        format!("{name}.html")
    }
}

pub fn render_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Standalone page written by Export HTML.
pub fn export_html(source: &str, file_name: &str) -> String {
    let title = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        render_html(source)
    )
}
