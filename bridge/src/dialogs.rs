use std::future::Future;
use std::path::PathBuf;

use crate::protocol::WindowId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const OPEN_FILTERS: &[FileFilter] = &[FileFilter {
    name: "Markdown & Text",
    extensions: &["md", "markdown", "txt"],
}];

pub const SAVE_FILTERS: &[FileFilter] = &[
    FileFilter {
        name: "Markdown",
        extensions: &["md", "markdown"],
    },
    FileFilter {
        name: "Text",
        extensions: &["txt"],
    },
];

pub const EXPORT_FILTERS: &[FileFilter] = &[FileFilter {
    name: "HTML",
    extensions: &["html"],
}];

/// Exports reuse save-as, so the suggested name decides which filters apply.
pub fn save_filters_for(suggested_name: &str) -> &'static [FileFilter] {
    let lower = suggested_name.to_ascii_lowercase();
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        EXPORT_FILTERS
    } else {
        SAVE_FILTERS
    }
}

/// Native file prompts, resolved asynchronously.
///
/// `None` means the user cancelled. Implementations must not block the
/// caller's executor thread while the prompt is open.
pub trait FileDialogs: Send + Sync {
    fn pick_open(
        &self,
        window: &WindowId,
        filters: &'static [FileFilter],
    ) -> impl Future<Output = Option<PathBuf>> + Send;

    fn pick_save(
        &self,
        window: &WindowId,
        suggested_name: &str,
        filters: &'static [FileFilter],
    ) -> impl Future<Output = Option<PathBuf>> + Send;
}
