//! File Manager
//!
//! Folder tree over the storage bucket. Folders are rows only; files carry
//! a stored object addressed by their sanitized path.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::files;
use crate::context::use_session;
use crate::models::FileEntry;

#[component]
pub fn FilesPanel() -> impl IntoView {
    let session = use_session();
    let backend = StoredValue::new(session.backend().clone());

    let path = RwSignal::new(String::new());
    let entries = RwSignal::new(Vec::<FileEntry>::new());
    let new_folder = RwSignal::new(String::new());
    let renaming = RwSignal::new(None::<(String, String)>);
    // Bumped after every mutation to re-run the listing effect.
    let version = RwSignal::new(0u32);

    Effect::new(move |_| {
        let parent = path.get();
        version.get();
        spawn_local(async move {
            match files::list_dir(&backend.get_value(), &parent).await {
                Ok(rows) => entries.set(rows),
                Err(e) => log::error!("listing files failed: {e}"),
            }
        });
    });

    let crumbs = move || {
        let mut out = vec![(String::from("Documents"), String::new())];
        let mut acc = String::new();
        for part in path.get().split('/').filter(|p| !p.is_empty()) {
            if !acc.is_empty() {
                acc.push('/');
            }
            acc.push_str(part);
            out.push((part.to_string(), acc.clone()));
        }
        out
    };

    let on_create_folder = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_folder.get_untracked().trim().to_string();
        if name.is_empty() {
            return;
        }
        let parent = path.get_untracked();
        spawn_local(async move {
            match files::create_folder(&backend.get_value(), &name, &parent).await {
                Ok(()) => {
                    new_folder.set(String::new());
                    version.update(|v| *v += 1);
                }
                Err(e) => log::error!("creating folder failed: {e}"),
            }
        });
    };

    let on_upload = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        input.set_value("");
        let parent = path.get_untracked();
        spawn_local(async move {
            let name = file.name();
            let mime = file.type_();
            let buffer = match JsFuture::from(file.array_buffer()).await {
                Ok(buf) => buf,
                Err(_) => {
                    log::error!("reading picked file failed");
                    return;
                }
            };
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
            match files::upload_file(&backend.get_value(), &name, &parent, &mime, bytes).await {
                Ok(()) => version.update(|v| *v += 1),
                Err(e) => log::error!("upload failed: {e}"),
            }
        });
    };

    let on_delete = move |entry: FileEntry| {
        spawn_local(async move {
            match files::delete_entry(&backend.get_value(), &entry).await {
                Ok(()) => version.update(|v| *v += 1),
                Err(e) => log::error!("deleting entry failed: {e}"),
            }
        });
    };

    let on_rename_commit = move || {
        let Some((id, name)) = renaming.get_untracked() else {
            return;
        };
        let name = name.trim().to_string();
        renaming.set(None);
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            match files::rename_entry(&backend.get_value(), &id, &name).await {
                Ok(()) => version.update(|v| *v += 1),
                Err(e) => log::error!("rename failed: {e}"),
            }
        });
    };

    view! {
        <div class="panel files">
            <div class="panel-header">
                <h2>"Documents"</h2>
                <form class="new-folder" on:submit=on_create_folder>
                    <input
                        type="text"
                        placeholder="New folder"
                        prop:value=move || new_folder.get()
                        on:input=move |ev| new_folder.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn-secondary">
                        "Create"
                    </button>
                </form>
                <label class="btn-primary upload-label">
                    "Upload"
                    <input type="file" class="upload-input" on:change=on_upload />
                </label>
            </div>
            <div class="breadcrumbs">
                <For
                    each=crumbs
                    key=|(_, target)| target.clone()
                    children=move |(label, target)| {
                        view! {
                            <button class="crumb" on:click=move |_| path.set(target.clone())>
                                {label}
                            </button>
                        }
                    }
                />
            </div>
            <div class="file-list">
                <For
                    each=move || entries.get()
                    key=|e| (e.id.clone(), e.name.clone())
                    children=move |entry| {
                        let id = entry.id.clone();
                        let is_renaming = {
                            let id = id.clone();
                            move || renaming.get().is_some_and(|(rid, _)| rid == id)
                        };
                        let open_entry = {
                            let entry = entry.clone();
                            move |_| {
                                if entry.is_folder() {
                                    path.set(entry.path.clone());
                                } else if let Some(win) = web_sys::window() {
                                    let url =
                                        files::public_url(&backend.get_value(), &entry.path);
                                    let _ = win.open_with_url_and_target(&url, "_blank");
                                }
                            }
                        };
                        let start_rename = {
                            let id = id.clone();
                            let name = entry.name.clone();
                            move |ev: web_sys::MouseEvent| {
                                ev.stop_propagation();
                                renaming.set(Some((id.clone(), name.clone())));
                            }
                        };
                        let delete_entry = {
                            let entry = entry.clone();
                            move |ev: web_sys::MouseEvent| {
                                ev.stop_propagation();
                                on_delete(entry.clone());
                            }
                        };
                        let size_label = entry
                            .file_size
                            .map(format_size)
                            .unwrap_or_default();
                        view! {
                            <div class="file-row" on:click=open_entry>
                                <span class="file-icon">
                                    {if entry.is_folder() { "📁" } else { "📄" }}
                                </span>
                                <Show
                                    when=is_renaming.clone()
                                    fallback={
                                        let name = entry.name.clone();
                                        move || view! { <span class="file-name">{name.clone()}</span> }
                                    }
                                >
                                    <input
                                        type="text"
                                        class="rename-input"
                                        prop:value=move || {
                                            renaming.get().map(|(_, n)| n).unwrap_or_default()
                                        }
                                        on:click=|ev| ev.stop_propagation()
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            renaming.update(|slot| {
                                                if let Some((_, name)) = slot.as_mut() {
                                                    *name = value;
                                                }
                                            });
                                        }
                                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                                            if ev.key() == "Enter" {
                                                on_rename_commit();
                                            } else if ev.key() == "Escape" {
                                                renaming.set(None);
                                            }
                                        }
                                    />
                                </Show>
                                <span class="file-size">{size_label}</span>
                                <div class="file-actions">
                                    <button class="btn-ghost" on:click=start_rename>
                                        "Rename"
                                    </button>
                                    <button class="btn-ghost" on:click=delete_entry>
                                        "Delete"
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
