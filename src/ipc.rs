use editor_bridge::{BridgeCommand, BridgeEvent, BRIDGE_EVENT};
use js_sys::{Function, Object, Reflect};
use leptos::logging::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(
        event: &str,
        handler: &Closure<dyn FnMut(JsValue)>,
        options: JsValue,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "webviewWindow"], js_name = getCurrentWebviewWindow)]
    fn current_webview_window() -> JsValue;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveAsArgs<'a> { content: &'a str, suggested_name: &'a str }
#[derive(Serialize)]
struct OverwriteArgs<'a> { content: &'a str, path: &'a str }
#[derive(Serialize)]
struct TitleArgs<'a> { title: &'a str }

fn to_args<T: Serialize>(args: &T) -> JsValue {
    serde_wasm_bindgen::to_value(args).unwrap_or(JsValue::NULL)
}

/// Sends one command for this window. Results come back as events.
pub async fn send(command: BridgeCommand) {
    let (cmd, args) = match &command {
        BridgeCommand::RequestNewWindow => ("request_new_window", JsValue::NULL),
        BridgeCommand::RequestOpenDialog => ("request_open_dialog", JsValue::NULL),
        BridgeCommand::RequestSaveAs { content, suggested_name } => (
            "request_save_as",
            to_args(&SaveAsArgs { content, suggested_name }),
        ),
        BridgeCommand::RequestOverwrite { content, path } => {
            ("request_overwrite", to_args(&OverwriteArgs { content, path }))
        }
        BridgeCommand::RequestTitleUpdate { title } => {
            ("request_title_update", to_args(&TitleArgs { title }))
        }
    };
    if let Err(e) = invoke(cmd, args).await {
        warn!("{cmd} failed: {e:?}");
    }
}

/// A registered bridge listener. Dropping it unregisters the listener.
pub struct Subscription {
    unlisten: Function,
    _handler: Closure<dyn FnMut(JsValue)>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Err(e) = self.unlisten.call0(&JsValue::NULL) {
            warn!("unlisten failed: {e:?}");
        }
    }
}

/// Listens for events addressed to this webview window only.
pub async fn subscribe(mut on_event: impl FnMut(BridgeEvent) + 'static) -> Result<Subscription, JsValue> {
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        let payload = Reflect::get(&raw, &JsValue::from_str("payload")).unwrap_or(JsValue::UNDEFINED);
        match serde_wasm_bindgen::from_value::<BridgeEvent>(payload) {
            Ok(event) => on_event(event),
            Err(e) => warn!("unreadable bridge event: {e}"),
        }
    });

    let label = Reflect::get(&current_webview_window(), &JsValue::from_str("label"))?;
    let target = Object::new();
    Reflect::set(&target, &JsValue::from_str("kind"), &JsValue::from_str("WebviewWindow"))?;
    Reflect::set(&target, &JsValue::from_str("label"), &label)?;
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("target"), &target)?;

    let unlisten = listen(BRIDGE_EVENT, &handler, options.into()).await?;
    Ok(Subscription {
        unlisten: unlisten.dyn_into()?,
        _handler: handler,
    })
}
