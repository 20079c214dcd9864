//! Demo pages - hotline strips over randomised cards
//!
//! Each page builds its items with [`random_cards`] so every visit loops a
//! different strip, the same way the rest of the app keeps its content
//! fresh.

mod carousel;
mod marquee;
mod strip;
mod ticker;

pub use carousel::Carousel;
pub use marquee::Marquee;
pub use ticker::Ticker;

pub(crate) use strip::{EventLog, StripFrame, use_hotline};

use dioxus::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CARD_COLORS: &[&str] = &[
    "#2d1b69", "#0f3460", "#1b4332", "#4a1942", "#1a5276", "#6c3483", "#117a65", "#7b241c",
    "#1f618d", "#2e86c1", "#a93226", "#148f77", "#7d3c98", "#d35400", "#16a085", "#2c3e50",
];

const SUBJECTS: &[&str] = &[
    "Markets", "Weather", "Transit", "Science", "Sports", "Culture", "Energy", "Health",
    "Travel", "Housing", "Space", "Music",
];

const HEADLINES: &[&str] = &[
    "opens higher after a quiet night",
    "expects a bright weekend",
    "adds late trains on the north line",
    "team publishes new survey results",
    "season ends with a record crowd",
    "festival announces its full program",
    "grid reports lowest demand in years",
    "clinics extend evening hours",
    "bookings rise ahead of the holidays",
    "prices level off in the third quarter",
    "probe sends back first images",
    "charts shaken by a surprise release",
];

/// One item of a demo strip
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub detail: String,
    pub color: &'static str,
    pub width: u32,
}

pub fn fresh_rng() -> SmallRng {
    let mut buf = [0u8; 32];
    if getrandom::fill(&mut buf).is_err() {
        return SmallRng::seed_from_u64(js_sys::Date::now() as u64);
    }
    SmallRng::from_seed(buf)
}

/// `count` cards with random subjects, colours and widths between
/// `min_width` and `max_width`
pub fn random_cards(count: usize, min_width: u32, max_width: u32) -> Vec<Card> {
    let mut rng = fresh_rng();
    (0..count)
        .map(|_| Card {
            title: SUBJECTS[rng.random_range(0..SUBJECTS.len())].to_string(),
            detail: HEADLINES[rng.random_range(0..HEADLINES.len())].to_string(),
            color: CARD_COLORS[rng.random_range(0..CARD_COLORS.len())],
            width: rng.random_range(min_width..=max_width),
        })
        .collect()
}

/// Page chrome shared by the demos
#[component]
pub fn DemoPage(title: &'static str, subtitle: &'static str, children: Element) -> Element {
    rsx! {
        div {
            style: "min-height: 100vh; background: #0f0f1a; display: flex; flex-direction: column; align-items: center; padding: 20px; font-family: system-ui, sans-serif;",

            div {
                style: "display: flex; gap: 16px; align-items: center; margin-bottom: 24px;",
                Link {
                    to: crate::Route::Landing {},
                    style: "color: #6b7280; text-decoration: none; font-size: 14px;",
                    "\u{2190} Demos"
                }
                h2 {
                    style: "color: #e5e7eb; margin: 0; font-size: 20px;",
                    "{title}"
                }
                span {
                    style: "color: #6b7280; font-size: 14px;",
                    "{subtitle}"
                }
            }

            {children}
        }
    }
}
