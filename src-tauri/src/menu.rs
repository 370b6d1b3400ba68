use editor_bridge::menu::{MenuCommand, MenuOutcome};
use tauri::menu::{Menu, MenuBuilder, MenuEvent, MenuItem, MenuItemBuilder, SubmenuBuilder};
use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_opener::OpenerExt;

use crate::EditorState;

pub fn build_menu<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let file = SubmenuBuilder::new(app, "File")
        .item(&command_item(app, MenuCommand::OpenFile)?)
        .item(&command_item(app, MenuCommand::SaveFile)?)
        .separator()
        .item(&command_item(app, MenuCommand::ExportHtml)?)
        .build()?;
    let edit = SubmenuBuilder::new(app, "Edit")
        .undo()
        .redo()
        .separator()
        .cut()
        .copy()
        .paste()
        .select_all()
        .build()?;
    let window = SubmenuBuilder::new(app, "Window")
        .minimize()
        .close_window()
        .build()?;
    let help = SubmenuBuilder::new(app, "Help")
        .item(&command_item(app, MenuCommand::VisitWebsite)?)
        .build()?;

    let menu = MenuBuilder::new(app);
    // macOS puts app-level commands in a leading menu named after the app.
    #[cfg(target_os = "macos")]
    let menu = menu.item(
        &SubmenuBuilder::new(app, "Markdown Editor")
            .about(None)
            .separator()
            .hide()
            .hide_others()
            .show_all()
            .separator()
            .quit()
            .build()?,
    );
    menu.item(&file)
        .item(&edit)
        .item(&window)
        .item(&help)
        .build()
}

fn command_item<R: Runtime>(app: &AppHandle<R>, command: MenuCommand) -> tauri::Result<MenuItem<R>> {
    let mut item = MenuItemBuilder::with_id(command.id(), command.label());
    if let Some(accelerator) = command.accelerator() {
        item = item.accelerator(accelerator);
    }
    item.build(app)
}

pub fn handle_menu_event(app: &AppHandle, event: MenuEvent) {
    let Some(command) = MenuCommand::from_id(event.id().as_ref()) else {
        return;
    };
    let Some(state) = app.try_state::<EditorState>() else {
        return;
    };
    match state.bridge.menu_selected(command) {
        Ok(MenuOutcome::External) => {
            if let Err(e) = app.opener().open_url(&state.config.help_url, None::<&str>) {
                log::warn!("Failed to open {}: {}", state.config.help_url, e);
            }
        }
        Ok(MenuOutcome::Delivered(window)) => log::debug!("menu {} -> {}", command.id(), window),
        Ok(MenuOutcome::Dropped) => {}
        Err(e) => log::warn!("menu {}: {}", command.id(), e),
    }
}
