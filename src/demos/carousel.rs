use dioxus::prelude::*;
use hotline::{HotlineError, Moved, Options, Zone};

use super::{DemoPage, EventLog, StripFrame, random_cards, use_hotline};

const CONTAINER: &str = "carousel";
const AUTO_ADVANCE_MS: u32 = 3000;

fn describe(result: &Result<Moved, HotlineError>) -> String {
    match result {
        Ok(Moved::Forward) => "moved forward".to_string(),
        Ok(Moved::Backward) => "moved backward".to_string(),
        Ok(Moved::Magnetized(zone)) => format!("snapped to {zone}"),
        Err(err) => err.to_string(),
    }
}

#[component]
pub fn Carousel() -> Element {
    let cards = use_hook(|| random_cards(7, 200, 200));
    let log = use_signal(Vec::<String>::new);
    let hotline = use_hotline(
        CONTAINER,
        Options {
            step: 0.0,
            hover: false,
            magnetic: Some(Zone::Center),
            magnet: 2.0,
            delta: Some(60.0),
            ..Options::default()
        },
        log,
    );
    let mut status = use_signal(|| "idle".to_string());
    let mut auto = use_signal(|| true);

    // Advance one card at a time while auto mode is on
    use_hook(|| {
        spawn(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(AUTO_ADVANCE_MS).await;
                if !*auto.peek() {
                    continue;
                }
                let Some(h) = hotline.peek().clone() else {
                    continue;
                };
                if h.phase().is_moving() || h.with_engine(|e| e.motion_id().is_some()) {
                    continue;
                }
                if let Some(result) = h.forward().await {
                    status.set(describe(&result));
                }
            }
        });
    });

    let step = move |forward: bool| {
        let Some(h) = hotline.peek().clone() else {
            return;
        };
        let pending = if forward { h.forward() } else { h.backward() };
        spawn(async move {
            if let Some(result) = pending.await {
                status.set(describe(&result));
            }
        });
    };

    let auto_label = if auto() { "Auto: on" } else { "Auto: off" };

    rsx! {
        DemoPage {
            title: "Carousel",
            subtitle: "drag and release to snap a card to the center",

            StripFrame {
                id: CONTAINER,
                hotline,
                style: "width: 640px; height: 180px; display: flex; overflow: hidden; background: #1a1a2e; border: 1px solid #2a2a4a; border-radius: 10px; padding: 20px 0; box-sizing: border-box; user-select: none; cursor: grab;".to_string(),
                for (i, card) in cards.iter().enumerate() {
                    div {
                        key: "{i}",
                        style: "flex: 0 0 {card.width}px; height: 100%; margin-right: 20px; background: {card.color}; border-radius: 12px; padding: 16px; box-sizing: border-box; color: #e5e7eb;",
                        div { style: "font-size: 12px; color: #9ca3af; margin-bottom: 8px;", "#{i + 1}" }
                        div { style: "font-weight: 600; font-size: 18px; margin-bottom: 8px;", "{card.title}" }
                        div { style: "font-size: 13px; color: #cbd5e1;", "{card.detail}" }
                    }
                }
            }

            div {
                style: "display: flex; gap: 12px; margin-top: 16px; align-items: center;",
                button {
                    style: "padding: 8px 20px; background: #374151; color: white; border: none; border-radius: 6px; font-size: 14px; cursor: pointer;",
                    onclick: move |_| step(false),
                    "\u{2190} Backward"
                }
                button {
                    style: "padding: 8px 20px; background: #374151; color: white; border: none; border-radius: 6px; font-size: 14px; cursor: pointer;",
                    onclick: move |_| step(true),
                    "Forward \u{2192}"
                }
                button {
                    style: "padding: 8px 20px; background: #4f46e5; color: white; border: none; border-radius: 6px; font-size: 14px; cursor: pointer;",
                    onclick: move |_| auto.set(!auto()),
                    "{auto_label}"
                }
                span {
                    style: "color: #22c55e; font-size: 14px; font-family: monospace;",
                    "{status}"
                }
            }

            EventLog { log }
        }
    }
}
