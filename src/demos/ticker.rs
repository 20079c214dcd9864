//! Vertical news ticker configured through container attributes.
//!
//! The speed buttons only rewrite `data-hotline-step` on the container;
//! the attribute observer carries the change into the running strip.

use dioxus::prelude::*;
use hotline::{Axis, Options};

use super::{DemoPage, EventLog, StripFrame, random_cards, use_hotline};

const CONTAINER: &str = "ticker";
const SPEEDS: &[(&str, &str)] = &[("Slow", "0.5"), ("Normal", "1"), ("Fast", "3")];

fn set_container_attribute(name: &str, value: &str) {
    let Some(container) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONTAINER))
    else {
        return;
    };
    if let Err(err) = container.set_attribute(name, value) {
        tracing::warn!("ticker: cannot set {}: {:?}", name, err);
    }
}

#[component]
pub fn Ticker() -> Element {
    let headlines = use_hook(|| random_cards(12, 0, 0));
    let log = use_signal(Vec::<String>::new);
    let hotline = use_hotline(
        CONTAINER,
        Options {
            axis: Axis::Vertical,
            observe: true,
            ..Options::default()
        },
        log,
    );
    let mut frozen = use_signal(|| false);

    rsx! {
        DemoPage {
            title: "Ticker",
            subtitle: "vertical strip driven by data attributes",

            StripFrame {
                id: CONTAINER,
                hotline,
                style: "width: 480px; height: 220px; overflow: hidden; background: #1a1a2e; border: 1px solid #2a2a4a; border-radius: 10px; box-sizing: border-box; user-select: none;".to_string(),
                for (i, card) in headlines.iter().enumerate() {
                    div {
                        key: "{i}",
                        style: "height: 44px; margin-bottom: 8px; padding: 0 16px; display: flex; align-items: center; gap: 12px; border-left: 4px solid {card.color}; color: #e5e7eb; font-size: 14px;",
                        span { style: "font-weight: 700; min-width: 80px;", "{card.title}" }
                        span { style: "color: #9ca3af;", "{card.detail}" }
                    }
                }
            }

            div {
                style: "display: flex; gap: 12px; margin-top: 16px;",
                for (label, step) in SPEEDS.iter().copied() {
                    button {
                        key: "{label}",
                        style: "padding: 8px 20px; background: #374151; color: white; border: none; border-radius: 6px; font-size: 14px; cursor: pointer;",
                        onclick: move |_| set_container_attribute("data-hotline-step", step),
                        "{label}"
                    }
                }
                button {
                    style: "padding: 8px 20px; background: #4f46e5; color: white; border: none; border-radius: 6px; font-size: 14px; cursor: pointer;",
                    onclick: move |_| {
                        let Some(h) = hotline.peek().clone() else {
                            return;
                        };
                        if frozen() {
                            h.unfreeze();
                            frozen.set(false);
                        } else {
                            frozen.set(h.freeze());
                        }
                    },
                    if frozen() { "Unfreeze" } else { "Freeze" }
                }
            }

            EventLog { log }
        }
    }
}
