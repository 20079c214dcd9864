use dioxus::prelude::*;
use hotline::{Options, Phase};

use super::{DemoPage, EventLog, StripFrame, random_cards, use_hotline};

const CONTAINER: &str = "marquee";

#[component]
pub fn Marquee() -> Element {
    let cards = use_hook(|| random_cards(9, 140, 220));
    let log = use_signal(Vec::<String>::new);
    let hotline = use_hotline(
        CONTAINER,
        Options {
            step: 1.0,
            delta: Some(40.0),
            ..Options::default()
        },
        log,
    );
    let mut paused = use_signal(|| false);

    let toggle_label = if paused() { "Resume" } else { "Pause" };

    rsx! {
        DemoPage {
            title: "Marquee",
            subtitle: "hover to freeze, drag or scroll to move",

            StripFrame {
                id: CONTAINER,
                hotline,
                style: "width: 720px; height: 120px; display: flex; overflow: hidden; background: #1a1a2e; border: 1px solid #2a2a4a; border-radius: 10px; padding: 16px 0; box-sizing: border-box; user-select: none; cursor: grab;".to_string(),
                for (i, card) in cards.iter().enumerate() {
                    div {
                        key: "{i}",
                        style: "flex: 0 0 {card.width}px; height: 100%; margin-right: 16px; background: {card.color}; border-radius: 8px; padding: 12px; box-sizing: border-box; color: #e5e7eb;",
                        div { style: "font-weight: 600; font-size: 15px; margin-bottom: 6px;", "{card.title}" }
                        div { style: "font-size: 12px; color: #cbd5e1;", "{card.detail}" }
                    }
                }
            }

            div {
                style: "display: flex; gap: 12px; margin-top: 16px;",
                button {
                    style: "padding: 8px 20px; background: #4f46e5; color: white; border: none; border-radius: 6px; font-size: 14px; cursor: pointer;",
                    onclick: move |_| {
                        let Some(h) = hotline.peek().clone() else {
                            return;
                        };
                        if h.phase() == Phase::Stopped {
                            if let Err(err) = h.start() {
                                tracing::warn!("marquee: {}", err);
                            }
                            paused.set(false);
                        } else {
                            h.stop();
                            paused.set(true);
                        }
                    },
                    "{toggle_label}"
                }
            }

            EventLog { log }
        }
    }
}
