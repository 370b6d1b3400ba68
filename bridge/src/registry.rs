use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::protocol::WindowId;

/// Which window owns which file.
///
/// An owned instance is shared (`Arc`) between the gateway, which binds, and
/// the window manager, which releases on close. Lookups always go through the
/// asking window's own id, so one window can never read another's path.
#[derive(Debug, Default)]
pub struct FileOwnershipRegistry {
    bindings: RwLock<HashMap<WindowId, PathBuf>>,
}

impl FileOwnershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous binding for `window`.
    pub fn bind(&self, window: &WindowId, path: impl Into<PathBuf>) {
        let path = path.into();
        log::debug!("binding {} -> {}", window, path.display());
        self.bindings.write().insert(window.clone(), path);
    }

    pub fn binding(&self, window: &WindowId) -> Option<PathBuf> {
        self.bindings.read().get(window).cloned()
    }

    pub fn is_bound_to(&self, window: &WindowId, path: &Path) -> bool {
        self.bindings
            .read()
            .get(window)
            .is_some_and(|bound| bound == path)
    }

    /// Drops the binding for a closed window. Returns the released path.
    pub fn release(&self, window: &WindowId) -> Option<PathBuf> {
        let released = self.bindings.write().remove(window);
        if let Some(path) = &released {
            log::debug!("released {} (was {})", window, path.display());
        }
        released
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}
