//! Host - the container and items the engine measures and rearranges
//!
//! The engine never creates or destroys items. It only reads geometry,
//! writes one margin per axis, and moves items between the two ends of
//! the strip. Everything it needs from the page goes through [`Strip`].
//!
//! - [`MemoryStrip`]: deterministic in-memory layout for tests and tools
//! - [`DomStrip`]: a real container element through web-sys

pub mod dom;
pub mod memory;
pub mod rect;

pub use dom::DomStrip;
pub use memory::{MemoryStrip, NodeId, Observer};
pub use rect::{Axis, Rect};

/// Callback invoked with `(attribute name, attribute value)` when a watched
/// container attribute changes
pub type AttributeCallback = Box<dyn FnMut(&str, &str)>;

/// A container holding an ordered strip of items
pub trait Strip {
    /// Handle to an item or any node nested inside one
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;

    /// Number of items in the strip
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn first(&self) -> Option<Self::Node>;

    fn last(&self) -> Option<Self::Node>;

    /// Move an item to the tail of the strip
    fn append(&mut self, item: &Self::Node);

    /// Move an item directly in front of another
    fn insert_before(&mut self, item: &Self::Node, before: &Self::Node);

    /// Leading margin override on the axis, `NaN` when unset
    fn margin(&self, item: &Self::Node, axis: Axis) -> f64;

    /// Write the leading margin override; `None` removes it
    fn set_margin(&mut self, item: &Self::Node, axis: Axis, value: Option<f64>);

    /// Computed trailing separator on the axis, `NaN` when unavailable
    fn trailing_gap(&self, item: &Self::Node, axis: Axis) -> f64;

    /// Current bounding box of a node
    fn rect(&self, node: &Self::Node) -> Rect;

    /// Current bounding box of the container
    fn container_rect(&self) -> Rect;

    /// Parent of a node, `None` at the container or above
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Whether the node is a direct child of the container
    fn is_item(&self, node: &Self::Node) -> bool;

    /// Attributes currently set on the container
    fn attributes(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Start reporting container attribute changes. Returns false when the
    /// host cannot observe attributes.
    fn watch(&mut self, _on_change: AttributeCallback) -> bool {
        false
    }

    fn unwatch(&mut self) {}
}

/// Number as a pixel offset, treating unset and unparsable values as zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Parse a CSS pixel length such as `"12.5px"`, `NaN` on failure
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse()
        .unwrap_or(f64::NAN)
}
