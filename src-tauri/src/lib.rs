mod commands;
mod config;
mod dialogs;
mod host;
mod menu;

use editor_bridge::{CommandBridge, WindowId};
use tauri::{Manager, RunEvent, WindowEvent};

use crate::config::AppConfig;
use crate::dialogs::RfdDialogs;
use crate::host::TauriHost;

pub type Bridge = CommandBridge<RfdDialogs, TauriHost, TauriHost>;

pub struct EditorState {
    pub bridge: Bridge,
    pub config: AppConfig,
}

fn on_window_event(window: &tauri::Window, event: &WindowEvent) {
    let Some(state) = window.try_state::<EditorState>() else {
        return;
    };
    let id = WindowId::new(window.label());
    match event {
        WindowEvent::Focused(focused) => state.bridge.windows().on_window_focused(&id, *focused),
        WindowEvent::Destroyed => {
            state.bridge.windows().on_window_closed(&id);
        }
        _ => {}
    }
}

#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
fn on_run_event(app: &tauri::AppHandle, event: RunEvent) {
    match event {
        // Dock click with every window closed.
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            if let Some(state) = app.try_state::<EditorState>() {
                if let Err(e) = state.bridge.windows().activate_or_create() {
                    log::warn!("Failed to reopen a window: {}", e);
                }
            }
        }
        RunEvent::Exit => log::info!("Exiting"),
        _ => {}
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .menu(menu::build_menu)
        .on_menu_event(menu::handle_menu_event)
        .on_window_event(on_window_event)
        .setup(|app| {
            let config = AppConfig::load(app.handle());
            let host = TauriHost::new(app.handle().clone(), config.clone());
            app.manage(EditorState {
                bridge: CommandBridge::new(
                    RfdDialogs::new(app.handle().clone()),
                    host.clone(),
                    host,
                ),
                config,
            });
            app.state::<EditorState>().bridge.windows().create_window()?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::request_new_window,
            commands::request_open_dialog,
            commands::request_save_as,
            commands::request_overwrite,
            commands::request_title_update
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(on_run_event);
}
