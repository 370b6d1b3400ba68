use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

use editor_bridge::{BridgeCommand, BridgeEvent, Document, SurfaceAction};

use crate::ipc::{self, Subscription};

const STATUS_TTL: Duration = Duration::from_secs(4);

fn send_command(command: BridgeCommand) {
    spawn_local(ipc::send(command));
}

#[component]
pub fn App() -> impl IntoView {
    let (doc, set_doc) = signal(Document::new());
    let subscription = StoredValue::new_local(None::<Subscription>);

    let open_file = move || send_command(BridgeCommand::RequestOpenDialog);
    let save_file = move || send_command(doc.with_untracked(Document::save_command));
    let save_as = move || send_command(doc.with_untracked(Document::save_as_command));
    let export_html = move || {
        let mut command = None;
        set_doc.update(|d| command = Some(d.export_command()));
        if let Some(command) = command {
            send_command(command);
        }
    };
    let new_window = move || send_command(BridgeCommand::RequestNewWindow);
    let new_document = move || set_doc.update(Document::reset);

    spawn_local(async move {
        let on_event = move |event: BridgeEvent| {
            let mut action = SurfaceAction::None;
            set_doc.update(|d| action = d.apply_event(event));
            match action {
                SurfaceAction::OpenFile => open_file(),
                SurfaceAction::SaveFile => save_file(),
                SurfaceAction::ExportHtml => export_html(),
                SurfaceAction::None => {}
            }
        };
        match ipc::subscribe(on_event).await {
            Ok(sub) => subscription.set_value(Some(sub)),
            Err(e) => warn!("bridge listener not registered: {e:?}"),
        }
    });
    on_cleanup(move || subscription.set_value(None));

    // Only a display-name change produces a new title.
    let title = Memo::new(move |_| doc.with(Document::window_title));
    Effect::new(move |_| {
        send_command(BridgeCommand::RequestTitleUpdate { title: title.get() });
    });

    let status = Memo::new(move |_| doc.with(|d| d.status.clone()));
    Effect::new(move |_| {
        if let Some(message) = status.get() {
            set_timeout(
                move || {
                    set_doc.update(|d| {
                        if d.status.as_deref() == Some(message.as_str()) {
                            d.status = None;
                        }
                    })
                },
                STATUS_TTL,
            );
        }
    });

    let update_content = move |ev| {
        let new_text = event_target_value(&ev);
        set_doc.update(|d| d.set_text(new_text));
    };

    view! {
        <main class="app-layout" style="display: flex; flex-direction: column; height: 100vh; width: 100vw;">
            <header class="toolbar" style="height: var(--topbar-height); display: flex; align-items: center; gap: 0.5rem; padding: 0 1rem; border-bottom: 1px solid var(--border-color); background: var(--bg-secondary);">
                <button on:click=move |_| new_document() title="Reset to the welcome document">"New Document"</button>
                <button on:click=move |_| new_window()>"New Window"</button>
                <button on:click=move |_| open_file()>"Open"</button>
                <button on:click=move |_| save_file()>"Save"</button>
                <button on:click=move |_| save_as()>"Save As"</button>
                <button on:click=move |_| export_html()>"Export HTML"</button>
                <span class="doc-name" style="margin-left: auto; color: var(--text-muted); font-size: 0.9rem;">
                    {move || doc.with(|d| d.display_name.clone())}
                </span>
            </header>
            <section class="panes" style="flex: 1; display: flex; min-height: 0;">
                <textarea
                    class="raw-editor"
                    style="flex: 1; padding: 2rem; font-family: var(--font-editor); font-size: var(--editor-font-size); line-height: 1.6; border: none; border-right: 1px solid var(--border-color); outline: none; resize: none; box-sizing: border-box;"
                    prop:value=move || doc.with(|d| d.text.clone())
                    on:input=update_content
                    placeholder="Start writing markdown..."
                    spellcheck="false"
                ></textarea>
                <article
                    class="preview"
                    style="flex: 1; padding: 2rem; overflow-y: auto; box-sizing: border-box;"
                    inner_html=move || doc.with(|d| d.html.clone())
                ></article>
            </section>
            <footer class="status" style="height: 1.75rem; display: flex; align-items: center; padding: 0 1rem; font-size: 0.8rem; color: var(--text-muted); border-top: 1px solid var(--border-color);">
                {move || status.get().unwrap_or_default()}
            </footer>
        </main>
    }
}
