use crate::error::Result;
use crate::protocol::{BridgeEvent, WindowId};
use crate::sink::EventSink;

/// Application menu entries that carry editor semantics. Standard edit,
/// window and app roles are handled by the platform and never reach here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    OpenFile,
    SaveFile,
    ExportHtml,
    VisitWebsite,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 4] = [
        MenuCommand::OpenFile,
        MenuCommand::SaveFile,
        MenuCommand::ExportHtml,
        MenuCommand::VisitWebsite,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MenuCommand::OpenFile => "open-file",
            MenuCommand::SaveFile => "save-file",
            MenuCommand::ExportHtml => "export-html",
            MenuCommand::VisitWebsite => "visit-website",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::OpenFile => "Open File...",
            MenuCommand::SaveFile => "Save File",
            MenuCommand::ExportHtml => "Export HTML...",
            MenuCommand::VisitWebsite => "Visit Website",
        }
    }

    pub fn accelerator(self) -> Option<&'static str> {
        match self {
            MenuCommand::OpenFile => Some("CmdOrCtrl+O"),
            MenuCommand::SaveFile => Some("CmdOrCtrl+S"),
            MenuCommand::ExportHtml => Some("CmdOrCtrl+Shift+E"),
            MenuCommand::VisitWebsite => None,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }

    /// The event a surface receives for this entry, if it is window-scoped.
    pub fn event(self) -> Option<BridgeEvent> {
        match self {
            MenuCommand::OpenFile => Some(BridgeEvent::MenuOpenTriggered),
            MenuCommand::SaveFile => Some(BridgeEvent::MenuSaveTriggered),
            MenuCommand::ExportHtml => Some(BridgeEvent::MenuExportTriggered),
            MenuCommand::VisitWebsite => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    Delivered(WindowId),
    /// No window could take the command.
    Dropped,
    /// Not window-scoped; the host acts on it directly.
    External,
}

/// Turns menu selections into events for a single target window.
pub struct MenuCommandSource<S> {
    sink: S,
}

impl<S: EventSink> MenuCommandSource<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn dispatch(&self, command: MenuCommand, target: Option<WindowId>) -> Result<MenuOutcome> {
        let Some(event) = command.event() else {
            return Ok(MenuOutcome::External);
        };
        let Some(window) = target else {
            log::debug!("menu {} dropped: no window to receive it", command.id());
            return Ok(MenuOutcome::Dropped);
        };
        self.sink.emit(&window, event)?;
        Ok(MenuOutcome::Delivered(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::EventHub;

    #[test]
    fn ids_round_trip() {
        for command in MenuCommand::ALL {
            assert_eq!(MenuCommand::from_id(command.id()), Some(command));
        }
        assert_eq!(MenuCommand::from_id("quit"), None);
    }

    #[test]
    fn delivers_to_target_only() {
        let hub = EventHub::new();
        let w1 = WindowId::from("editor-1");
        let w2 = WindowId::from("editor-2");
        let (_s1, mut rx1) = hub.subscribe(&w1);
        let (_s2, mut rx2) = hub.subscribe(&w2);
        let menu = MenuCommandSource::new(hub);

        let outcome = menu
            .dispatch(MenuCommand::ExportHtml, Some(w2.clone()))
            .unwrap();

        assert_eq!(outcome, MenuOutcome::Delivered(w2));
        assert_eq!(rx2.try_recv().unwrap(), BridgeEvent::MenuExportTriggered);
        assert!(rx1.try_recv().is_err());
    }

    #[test]
    fn drops_without_target() {
        let menu = MenuCommandSource::new(EventHub::new());
        assert_eq!(
            menu.dispatch(MenuCommand::SaveFile, None).unwrap(),
            MenuOutcome::Dropped
        );
    }

    #[test]
    fn website_is_handled_by_host() {
        let menu = MenuCommandSource::new(EventHub::new());
        assert_eq!(
            menu.dispatch(MenuCommand::VisitWebsite, Some(WindowId::from("editor-1")))
                .unwrap(),
            MenuOutcome::External
        );
    }
}
