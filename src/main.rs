mod demos;
mod landing;

use dioxus::prelude::*;
use demos::{Carousel, Marquee, Ticker};
use landing::Landing;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Landing {},
    #[route("/marquee")]
    Marquee {},
    #[route("/ticker")]
    Ticker {},
    #[route("/carousel")]
    Carousel {},
}

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        div {
            id: "main",
            Router::<Route> {}
        }
    }
}

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = dioxus::logger::init(dioxus::logger::tracing::Level::DEBUG) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    dioxus::launch(App);
}
