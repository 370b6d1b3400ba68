use editor_bridge::{BridgeCommand, WindowId};
use tauri::{State, WebviewWindow};

use crate::EditorState;

/// Every command is answered through events on the calling window; the
/// `Err` side only carries failures of the bridge itself.
async fn dispatch(
    window: &WebviewWindow,
    state: &EditorState,
    command: BridgeCommand,
) -> Result<(), String> {
    let origin = WindowId::new(window.label());
    state.bridge.handle(&origin, command).await.map_err(|e| {
        log::warn!("{}: {}", origin, e);
        e.to_string()
    })
}

#[tauri::command]
pub async fn request_new_window(
    window: WebviewWindow,
    state: State<'_, EditorState>,
) -> Result<(), String> {
    dispatch(&window, &state, BridgeCommand::RequestNewWindow).await
}

#[tauri::command]
pub async fn request_open_dialog(
    window: WebviewWindow,
    state: State<'_, EditorState>,
) -> Result<(), String> {
    dispatch(&window, &state, BridgeCommand::RequestOpenDialog).await
}

#[tauri::command]
pub async fn request_save_as(
    window: WebviewWindow,
    state: State<'_, EditorState>,
    content: String,
    suggested_name: String,
) -> Result<(), String> {
    let command = BridgeCommand::RequestSaveAs {
        content,
        suggested_name,
    };
    dispatch(&window, &state, command).await
}

#[tauri::command]
pub async fn request_overwrite(
    window: WebviewWindow,
    state: State<'_, EditorState>,
    content: String,
    path: String,
) -> Result<(), String> {
    dispatch(&window, &state, BridgeCommand::RequestOverwrite { content, path }).await
}

#[tauri::command]
pub async fn request_title_update(
    window: WebviewWindow,
    state: State<'_, EditorState>,
    title: String,
) -> Result<(), String> {
    dispatch(&window, &state, BridgeCommand::RequestTitleUpdate { title }).await
}
