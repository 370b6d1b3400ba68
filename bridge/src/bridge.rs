use std::sync::Arc;

use crate::dialogs::FileDialogs;
use crate::error::Result;
use crate::gateway::FileAccessGateway;
use crate::menu::{MenuCommand, MenuCommandSource, MenuOutcome};
use crate::protocol::{BridgeCommand, WindowId};
use crate::registry::FileOwnershipRegistry;
use crate::sink::EventSink;
use crate::windows::{WindowHost, WindowManager};

/// Routes surface commands to the gateway or the window manager, and menu
/// selections to one window. Results always return to the originating
/// window through the shared sink.
pub struct CommandBridge<D, S, H> {
    gateway: FileAccessGateway<D, S>,
    windows: WindowManager<H>,
    menu: MenuCommandSource<S>,
}

impl<D, S, H> CommandBridge<D, S, H>
where
    D: FileDialogs,
    S: EventSink + Clone,
    H: WindowHost,
{
    pub fn new(dialogs: D, sink: S, host: H) -> Self {
        Self::with_registry(dialogs, sink, host, Arc::new(FileOwnershipRegistry::new()))
    }

    pub fn with_registry(
        dialogs: D,
        sink: S,
        host: H,
        registry: Arc<FileOwnershipRegistry>,
    ) -> Self {
        Self {
            gateway: FileAccessGateway::new(dialogs, sink.clone(), registry.clone()),
            windows: WindowManager::new(host, registry),
            menu: MenuCommandSource::new(sink),
        }
    }

    pub fn gateway(&self) -> &FileAccessGateway<D, S> {
        &self.gateway
    }

    pub fn windows(&self) -> &WindowManager<H> {
        &self.windows
    }

    pub async fn handle(&self, origin: &WindowId, command: BridgeCommand) -> Result<()> {
        log::debug!("{origin}: {}", command_name(&command));
        match command {
            BridgeCommand::RequestNewWindow => self.windows.create_window().map(drop),
            BridgeCommand::RequestOpenDialog => self.gateway.prompt_open(origin).await,
            BridgeCommand::RequestSaveAs {
                content,
                suggested_name,
            } => {
                self.gateway
                    .prompt_save_as(origin, &content, &suggested_name)
                    .await
            }
            BridgeCommand::RequestOverwrite { content, path } => {
                self.gateway.overwrite(origin, &content, path).await
            }
            BridgeCommand::RequestTitleUpdate { title } => self.windows.set_title(origin, &title),
        }
    }

    pub fn menu_selected(&self, command: MenuCommand) -> Result<MenuOutcome> {
        self.menu.dispatch(command, self.windows.menu_target())
    }
}

fn command_name(command: &BridgeCommand) -> &'static str {
    match command {
        BridgeCommand::RequestNewWindow => "requestNewWindow",
        BridgeCommand::RequestOpenDialog => "requestOpenDialog",
        BridgeCommand::RequestSaveAs { .. } => "requestSaveAs",
        BridgeCommand::RequestOverwrite { .. } => "requestOverwrite",
        BridgeCommand::RequestTitleUpdate { .. } => "requestTitleUpdate",
    }
}
