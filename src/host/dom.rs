//! DomStrip - a strip backed by a live container element
//!
//! Margins are written as inline style on the items, separators come from
//! the computed style, and geometry from `getBoundingClientRect`.
//! Attribute changes on the container are reported through a
//! `MutationObserver`.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, MutationObserver, MutationObserverInit, MutationRecord};

use super::{AttributeCallback, Axis, Rect, Strip, finite_or_zero, parse_px};

type MutationHandler = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

/// Strip living in the page
pub struct DomStrip {
    container: Element,
    observer: Option<(MutationObserver, MutationHandler)>,
}

impl DomStrip {
    pub fn new(container: Element) -> Self {
        Self {
            container,
            observer: None,
        }
    }

    /// Look the container up by element id
    pub fn by_id(id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        document.get_element_by_id(id).map(Self::new)
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    fn computed(&self, item: &Element, property: &str) -> f64 {
        let Some(window) = web_sys::window() else {
            return f64::NAN;
        };
        match window.get_computed_style(item) {
            Ok(Some(style)) => style
                .get_property_value(property)
                .map(|v| parse_px(&v))
                .unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }
}

fn dom_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

impl Strip for DomStrip {
    type Node = Element;

    fn len(&self) -> usize {
        self.container.child_element_count() as usize
    }

    fn first(&self) -> Option<Element> {
        self.container.first_element_child()
    }

    fn last(&self) -> Option<Element> {
        self.container.last_element_child()
    }

    fn append(&mut self, item: &Element) {
        if let Err(err) = self.container.append_child(item) {
            tracing::warn!("append failed: {:?}", err);
        }
    }

    fn insert_before(&mut self, item: &Element, before: &Element) {
        if let Err(err) = self.container.insert_before(item, Some(before)) {
            tracing::warn!("insert_before failed: {:?}", err);
        }
    }

    fn margin(&self, item: &Element, axis: Axis) -> f64 {
        item.dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value(axis.leading_margin()).ok())
            .map(|v| parse_px(&v))
            .unwrap_or(f64::NAN)
    }

    fn set_margin(&mut self, item: &Element, axis: Axis, value: Option<f64>) {
        let Some(el) = item.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        let result = match value {
            Some(px) => style.set_property(axis.leading_margin(), &format!("{px}px")),
            None => style.remove_property(axis.leading_margin()).map(|_| ()),
        };
        if let Err(err) = result {
            tracing::warn!("margin write failed: {:?}", err);
        }
    }

    fn trailing_gap(&self, item: &Element, axis: Axis) -> f64 {
        self.computed(item, axis.trailing_margin())
    }

    fn rect(&self, node: &Element) -> Rect {
        dom_rect(node)
    }

    /// Content box of the container, where the first item starts
    fn container_rect(&self) -> Rect {
        let outer = self.container.get_bounding_client_rect();
        let pad = |side: &str| finite_or_zero(self.computed(&self.container, side));
        let (left, top) = (pad("padding-left"), pad("padding-top"));
        Rect::new(
            outer.left() + f64::from(self.container.client_left()) + left,
            outer.top() + f64::from(self.container.client_top()) + top,
            f64::from(self.container.client_width()) - left - pad("padding-right"),
            f64::from(self.container.client_height()) - top - pad("padding-bottom"),
        )
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element().filter(|p| *p != self.container)
    }

    fn is_item(&self, node: &Element) -> bool {
        node.parent_element().is_some_and(|p| p == self.container)
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.container
            .get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .filter_map(|name| {
                let value = self.container.get_attribute(&name)?;
                Some((name, value))
            })
            .collect()
    }

    fn watch(&mut self, mut on_change: AttributeCallback) -> bool {
        self.unwatch();

        let container = self.container.clone();
        let handler: MutationHandler =
            Closure::new(move |records: js_sys::Array, _: MutationObserver| {
                for record in records.iter() {
                    let record: MutationRecord = record.unchecked_into();
                    let Some(name) = record.attribute_name() else {
                        continue;
                    };
                    let value = container.get_attribute(&name).unwrap_or_default();
                    on_change(&name, &value);
                }
            });

        let observer = match MutationObserver::new(handler.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                tracing::warn!("MutationObserver unavailable: {:?}", err);
                return false;
            }
        };
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        if let Err(err) = observer.observe_with_options(&self.container, &init) {
            tracing::warn!("observe failed: {:?}", err);
            return false;
        }
        self.observer = Some((observer, handler));
        true
    }

    fn unwatch(&mut self) {
        if let Some((observer, _handler)) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl Drop for DomStrip {
    fn drop(&mut self) {
        self.unwatch();
    }
}
