//! StripFrame - a container element wired to a hotline driver
//!
//! Mouse presses start on the container; while a drag is running a
//! full-page overlay takes the moves and the release so the gesture
//! survives the pointer leaving the strip. Touches stay with the element
//! they started on, so they need no overlay.

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use hotline::{DomStrip, GlooScheduler, Hotline, Options, Pointer};
use wasm_bindgen::JsCast;

/// Driver type used by every demo page
pub type DomHotline = Hotline<DomStrip, GlooScheduler>;

const OVERLAY_ID: &str = "hotline-drag-overlay";
const LOG_LENGTH: usize = 8;

/// Build a driver for the element `container` once it is mounted, and
/// stop it when the page goes away. Event names land in `log`.
pub fn use_hotline(
    container: &'static str,
    options: Options,
    log: Signal<Vec<String>>,
) -> Signal<Option<DomHotline>> {
    let mut hotline = use_signal(|| None::<DomHotline>);

    use_effect(move || {
        if hotline.peek().is_some() {
            return;
        }
        let Some(strip) = DomStrip::by_id(container) else {
            tracing::warn!("no strip container #{}", container);
            return;
        };
        let driver = Hotline::with_options(strip, GlooScheduler::new(), options.clone());
        driver.on(move |event| {
            let mut log = log;
            let mut entries = log.write();
            entries.insert(0, event.name().to_string());
            entries.truncate(LOG_LENGTH);
        });
        if let Err(err) = driver.start() {
            tracing::warn!("#{} not started: {}", container, err);
        }
        hotline.set(Some(driver));
    });

    use_drop(move || {
        if let Some(driver) = hotline.peek().as_ref() {
            driver.stop();
        }
    });

    hotline
}

fn button_index(button: Option<MouseButton>) -> u16 {
    match button {
        Some(MouseButton::Auxiliary) => 1,
        Some(MouseButton::Secondary) => 2,
        Some(MouseButton::Fourth) => 3,
        Some(MouseButton::Fifth) => 4,
        _ => 0,
    }
}

fn mouse_pointer(e: &MouseEvent) -> Pointer {
    let at = e.client_coordinates();
    Pointer::mouse(at.x, at.y).with_button(button_index(e.trigger_button()))
}

/// Topmost element under a point, looking through the drag overlay
fn element_under(x: f64, y: f64) -> Option<web_sys::Element> {
    let document = web_sys::window()?.document()?;
    document
        .elements_from_point(x as f32, y as f32)
        .iter()
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .find(|element| element.id() != OVERLAY_ID)
}

fn driver(hotline: Signal<Option<DomHotline>>) -> Option<DomHotline> {
    hotline.peek().clone()
}

/// The strip container. `children` become the items.
#[component]
pub fn StripFrame(
    id: &'static str,
    hotline: Signal<Option<DomHotline>>,
    style: String,
    children: Element,
) -> Element {
    let mut dragging = use_signal(|| false);

    rsx! {
        div {
            id: "{id}",
            style: "{style}",
            onmouseenter: move |_| {
                if let Some(h) = driver(hotline) {
                    h.hover_enter();
                }
            },
            onmouseleave: move |_| {
                if let Some(h) = driver(hotline) {
                    h.hover_leave();
                }
            },
            onmousedown: move |e: MouseEvent| {
                e.prevent_default();
                if let Some(h) = driver(hotline) {
                    if h.press(mouse_pointer(&e)) {
                        dragging.set(true);
                    }
                }
            },
            ontouchstart: move |e: TouchEvent| {
                if let (Some(h), Some(touch)) = (driver(hotline), e.touches().first()) {
                    let at = touch.client_coordinates();
                    h.press(Pointer::touch(at.x, at.y));
                }
            },
            ontouchmove: move |e: TouchEvent| {
                if let (Some(h), Some(touch)) = (driver(hotline), e.touches().first()) {
                    let at = touch.client_coordinates();
                    h.drag(Pointer::touch(at.x, at.y));
                }
            },
            ontouchend: move |e: TouchEvent| {
                if let (Some(h), Some(touch)) = (driver(hotline), e.touches_changed().first()) {
                    let at = touch.client_coordinates();
                    h.release(Pointer::touch(at.x, at.y), element_under(at.x, at.y));
                }
            },
            onwheel: move |e: WheelEvent| {
                let delta = e.delta().strip_units();
                let native = if delta.y != 0.0 { delta.y } else { delta.x };
                if let Some(h) = driver(hotline) {
                    if h.wheel(native).is_some() {
                        e.prevent_default();
                    }
                }
            },
            {children}
        }

        if dragging() {
            div {
                id: OVERLAY_ID,
                style: "position: fixed; inset: 0; z-index: 100; cursor: grabbing;",
                onmousemove: move |e: MouseEvent| {
                    if let Some(h) = driver(hotline) {
                        h.drag(mouse_pointer(&e));
                    }
                },
                onmouseup: move |e: MouseEvent| {
                    let pointer = mouse_pointer(&e);
                    if let Some(h) = driver(hotline) {
                        h.release(pointer, element_under(pointer.x, pointer.y));
                    }
                    dragging.set(false);
                },
            }
        }
    }
}

/// Most recent notifications, newest first
#[component]
pub fn EventLog(log: Signal<Vec<String>>) -> Element {
    rsx! {
        div {
            style: "margin-top: 24px; width: 100%; max-width: 720px; background: #1a1a2e; border: 1px solid #2a2a4a; border-radius: 8px; padding: 12px 16px; font-family: monospace; font-size: 13px; color: #9ca3af; min-height: 180px;",
            for (i, name) in log().into_iter().enumerate() {
                div {
                    key: "{i}",
                    style: if i == 0 { "color: #22c55e;" } else { "" },
                    "{name}"
                }
            }
        }
    }
}
