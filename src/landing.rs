use dioxus::prelude::*;
use crate::Route;

struct DemoLink {
    route: Route,
    title: &'static str,
    blurb: &'static str,
    accent: &'static str,
}

fn demo_links() -> [DemoLink; 3] {
    [
        DemoLink {
            route: Route::Marquee {},
            title: "Marquee",
            blurb: "A horizontal strip that never runs out. Hover to freeze it, drag it, or scroll it with the wheel.",
            accent: "linear-gradient(135deg, #22c55e, #16a34a)",
        },
        DemoLink {
            route: Route::Ticker {},
            title: "Ticker",
            blurb: "Vertical headlines configured by data attributes. Changing an attribute retunes the running strip.",
            accent: "linear-gradient(135deg, #3b82f6, #6366f1)",
        },
        DemoLink {
            route: Route::Carousel {},
            title: "Carousel",
            blurb: "Step forward and backward one card at a time. Released cards snap to the center.",
            accent: "linear-gradient(135deg, #f59e0b, #d97706)",
        },
    ]
}

#[component]
pub fn Landing() -> Element {
    rsx! {
        div {
            style: "min-height: 100vh; background: #0f0f1a; display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 40px 20px; font-family: system-ui, -apple-system, sans-serif;",

            // Hero
            div {
                style: "text-align: center; max-width: 720px;",
                h1 {
                    style: "font-size: 48px; font-weight: 700; color: #e5e7eb; margin: 0 0 16px 0; letter-spacing: -1px;",
                    "Hotline"
                }
                p {
                    style: "font-size: 20px; color: #9ca3af; margin: 0 0 40px 0; line-height: 1.6;",
                    "Endless looping strips. Items that leave one edge are moved to the other, so the loop never shows a gap."
                }
            }

            // Demo grid
            div {
                style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; max-width: 800px; margin-top: 24px;",
                for link in demo_links() {
                    Link {
                        key: "{link.title}",
                        to: link.route,
                        style: "display: block; background: #1a1a2e; border: 1px solid #2a2a4a; border-radius: 10px; padding: 24px; text-decoration: none;",
                        div {
                            style: "width: 40px; height: 6px; border-radius: 3px; background: {link.accent}; margin-bottom: 16px;",
                        }
                        h3 {
                            style: "color: #e5e7eb; font-size: 16px; margin: 0 0 8px 0;",
                            "{link.title} \u{2192}"
                        }
                        p {
                            style: "color: #6b7280; font-size: 14px; margin: 0; line-height: 1.5;",
                            "{link.blurb}"
                        }
                    }
                }
            }

            // Footer
            p {
                style: "color: #4b5563; font-size: 13px; margin-top: 64px;",
                "Options can also be set with data-hotline-* attributes on the container"
            }
        }
    }
}
