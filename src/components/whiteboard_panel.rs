//! Whiteboard
//!
//! Freehand strokes on a canvas, persisted as one shared scene row. Saves
//! are debounced so a long stroke doesn't hammer the backend.

use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::whiteboard;
use crate::context::use_session;
use crate::models::{Stroke, WhiteboardScene};
use crate::store::{store_mark_saved, use_app_store};

const CANVAS_WIDTH: u32 = 960;
const CANVAS_HEIGHT: u32 = 600;
const SAVE_DEBOUNCE_MS: u32 = 1_200;

const PALETTE: [&str; 6] = [
    "#1f2937", "#dc2626", "#2563eb", "#16a34a", "#d97706", "#9333ea",
];

fn context_2d(canvas: &web_sys::HtmlCanvasElement) -> Option<web_sys::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
}

fn draw_stroke(ctx: &web_sys::CanvasRenderingContext2d, stroke: &Stroke) {
    let mut points = stroke.points.iter();
    let Some(&(x, y)) = points.next() else {
        return;
    };
    ctx.begin_path();
    ctx.set_stroke_style_str(&stroke.color);
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.move_to(x, y);
    for &(x, y) in points {
        ctx.line_to(x, y);
    }
    ctx.stroke();
}

fn redraw(canvas: &web_sys::HtmlCanvasElement, scene: &WhiteboardScene, live: Option<&Stroke>) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    for stroke in &scene.strokes {
        draw_stroke(&ctx, stroke);
    }
    if let Some(stroke) = live {
        draw_stroke(&ctx, stroke);
    }
}

#[component]
pub fn WhiteboardPanel() -> impl IntoView {
    let session = use_session();
    let backend = StoredValue::new(session.backend().clone());
    let store = use_app_store();

    let canvas_ref = NodeRef::<html::Canvas>::new();
    let scene = RwSignal::new(WhiteboardScene::default());
    let live = RwSignal::new(None::<Stroke>);
    let color = RwSignal::new(String::from(PALETTE[0]));
    let width = RwSignal::new(3.0f64);
    // Each edit bumps this; only the newest pending save actually writes.
    let dirty = RwSignal::new(0u32);

    spawn_local(async move {
        match whiteboard::load_scene(&backend.get_value()).await {
            Ok(loaded) => scene.set(loaded),
            Err(e) => log::error!("loading whiteboard failed: {e}"),
        }
    });

    Effect::new(move |_| {
        let current = scene.get();
        let stroke = live.get();
        if let Some(canvas) = canvas_ref.get() {
            redraw(&canvas, &current, stroke.as_ref());
        }
    });

    let schedule_save = move || {
        let ticket = dirty.get_untracked() + 1;
        dirty.set(ticket);
        spawn_local(async move {
            TimeoutFuture::new(SAVE_DEBOUNCE_MS).await;
            if dirty.get_untracked() != ticket {
                return;
            }
            let snapshot = scene.get_untracked();
            match whiteboard::save_scene(&backend.get_value(), &snapshot).await {
                Ok(()) => store_mark_saved(&store),
                Err(e) => log::error!("saving whiteboard failed: {e}"),
            }
        });
    };

    let point_of = move |ev: &web_sys::MouseEvent| {
        (ev.offset_x() as f64, ev.offset_y() as f64)
    };

    let on_mousedown = move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        live.set(Some(Stroke {
            color: color.get_untracked(),
            width: width.get_untracked(),
            points: vec![point_of(&ev)],
        }));
    };

    let on_mousemove = move |ev: web_sys::MouseEvent| {
        let point = point_of(&ev);
        live.update(|slot| {
            if let Some(stroke) = slot.as_mut() {
                stroke.points.push(point);
            }
        });
    };

    let finish_stroke = move || {
        let Some(stroke) = live.get_untracked() else {
            return;
        };
        live.set(None);
        if stroke.points.len() > 1 {
            scene.update(|s| s.strokes.push(stroke));
            schedule_save();
        }
    };

    let on_clear = move |_| {
        scene.set(WhiteboardScene::default());
        live.set(None);
        schedule_save();
    };

    let on_undo = move |_| {
        let mut changed = false;
        scene.update(|s| changed = s.strokes.pop().is_some());
        if changed {
            schedule_save();
        }
    };

    view! {
        <div class="panel whiteboard">
            <div class="panel-header">
                <h2>"Whiteboard"</h2>
                <div class="whiteboard-tools">
                    {PALETTE
                        .iter()
                        .map(|&swatch| {
                            view! {
                                <button
                                    class="swatch"
                                    class:active=move || color.get() == swatch
                                    style:background-color=swatch
                                    on:click=move |_| color.set(swatch.to_string())
                                ></button>
                            }
                        })
                        .collect_view()}
                    <input
                        type="range"
                        min="1"
                        max="12"
                        prop:value=move || width.get().to_string()
                        on:input=move |ev| {
                            if let Ok(w) = event_target_value(&ev).parse::<f64>() {
                                width.set(w);
                            }
                        }
                    />
                    <button class="btn-secondary" on:click=on_undo>
                        "Undo"
                    </button>
                    <button class="btn-secondary" on:click=on_clear>
                        "Clear"
                    </button>
                </div>
            </div>
            <canvas
                node_ref=canvas_ref
                width=CANVAS_WIDTH
                height=CANVAS_HEIGHT
                class="whiteboard-canvas"
                on:mousedown=on_mousedown
                on:mousemove=on_mousemove
                on:mouseup=move |_| finish_stroke()
                on:mouseleave=move |_| finish_stroke()
            ></canvas>
        </div>
    }
}
