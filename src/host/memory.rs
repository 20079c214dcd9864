//! MemoryStrip - a strip laid out in memory
//!
//! Items sit one after another along the strip axis starting at the
//! container's leading edge. Each item occupies its leading margin, its
//! size, and its trailing gap, the same flow a row of inline blocks has.
//! Nested nodes can be attached below items to exercise ancestor lookup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{AttributeCallback, Axis, Rect, Strip};

/// Handle to a node of a [`MemoryStrip`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    width: f64,
    height: f64,
    gap: f64,
    margins: [Option<f64>; 2],
}

fn axis_slot(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

#[derive(Default)]
struct Watch {
    callback: RefCell<Option<AttributeCallback>>,
    active: Cell<bool>,
}

/// Handle for changing container attributes from outside the engine,
/// the way a page script would
#[derive(Clone)]
pub struct Observer {
    attributes: Rc<RefCell<Vec<(String, String)>>>,
    watch: Rc<Watch>,
}

impl Observer {
    /// Set a container attribute, notifying the watcher if one is attached
    pub fn set_attribute(&self, name: &str, value: &str) {
        {
            let mut attributes = self.attributes.borrow_mut();
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }

        if !self.watch.active.get() {
            return;
        }
        let taken = self.watch.callback.borrow_mut().take();
        if let Some(mut callback) = taken {
            callback(name, value);
            let mut slot = self.watch.callback.borrow_mut();
            if self.watch.active.get() && slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watch.active.get()
    }
}

/// In-memory strip with deterministic geometry
pub struct MemoryStrip {
    axis: Axis,
    container: Rect,
    order: Vec<NodeId>,
    nodes: Vec<NodeData>,
    attributes: Rc<RefCell<Vec<(String, String)>>>,
    watch: Rc<Watch>,
}

impl MemoryStrip {
    pub fn new(axis: Axis, container: Rect) -> Self {
        Self {
            axis,
            container,
            order: Vec::new(),
            nodes: Vec::new(),
            attributes: Rc::new(RefCell::new(Vec::new())),
            watch: Rc::new(Watch::default()),
        }
    }

    pub fn horizontal(container: Rect) -> Self {
        Self::new(Axis::Horizontal, container)
    }

    pub fn vertical(container: Rect) -> Self {
        Self::new(Axis::Vertical, container)
    }

    /// Strip of `count` equal items
    pub fn uniform(axis: Axis, container: Rect, count: usize, size: f64, gap: f64) -> Self {
        let mut strip = Self::new(axis, container);
        let cross = match axis {
            Axis::Horizontal => container.h,
            Axis::Vertical => container.w,
        };
        for _ in 0..count {
            match axis {
                Axis::Horizontal => strip.push_item(size, cross, gap),
                Axis::Vertical => strip.push_item(cross, size, gap),
            };
        }
        strip
    }

    /// Append a new item with its trailing gap
    pub fn push_item(&mut self, width: f64, height: f64, gap: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            width,
            height,
            gap,
            margins: [None, None],
        });
        self.order.push(id);
        id
    }

    /// Attach a nested node below an item or another nested node
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent),
            width: 0.0,
            height: 0.0,
            gap: 0.0,
            margins: [None, None],
        });
        id
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.attributes
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
        self
    }

    /// Handle for mutating attributes after the strip moved into an engine
    pub fn observer(&self) -> Observer {
        Observer {
            attributes: Rc::clone(&self.attributes),
            watch: Rc::clone(&self.watch),
        }
    }

    /// Current item order
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Leading coordinate of every item, in strip order
    pub fn starts(&self) -> Vec<(NodeId, f64)> {
        self.layout()
            .into_iter()
            .map(|(id, rect)| (id, self.axis.start(&rect)))
            .collect()
    }

    fn size_on_axis(&self, node: &NodeData) -> f64 {
        match self.axis {
            Axis::Horizontal => node.width,
            Axis::Vertical => node.height,
        }
    }

    fn layout(&self) -> Vec<(NodeId, Rect)> {
        let slot = axis_slot(self.axis);
        let mut cursor = self.axis.start(&self.container);
        let mut rects = Vec::with_capacity(self.order.len());
        for &id in &self.order {
            let node = &self.nodes[id.0];
            cursor += node.margins[slot].unwrap_or(0.0);
            let rect = match self.axis {
                Axis::Horizontal => Rect::new(cursor, self.container.y, node.width, node.height),
                Axis::Vertical => Rect::new(self.container.x, cursor, node.width, node.height),
            };
            rects.push((id, rect));
            cursor += self.size_on_axis(node) + node.gap;
        }
        rects
    }

    fn item_of(&self, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.order.contains(&id) {
                return Some(id);
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        None
    }

    fn remove_from_order(&mut self, item: NodeId) -> bool {
        match self.order.iter().position(|&id| id == item) {
            Some(index) => {
                self.order.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Strip for MemoryStrip {
    type Node = NodeId;

    fn len(&self) -> usize {
        self.order.len()
    }

    fn first(&self) -> Option<NodeId> {
        self.order.first().copied()
    }

    fn last(&self) -> Option<NodeId> {
        self.order.last().copied()
    }

    fn append(&mut self, item: &NodeId) {
        if self.remove_from_order(*item) {
            self.order.push(*item);
        }
    }

    fn insert_before(&mut self, item: &NodeId, before: &NodeId) {
        if item == before || !self.remove_from_order(*item) {
            return;
        }
        let index = self
            .order
            .iter()
            .position(|id| id == before)
            .unwrap_or(self.order.len());
        self.order.insert(index, *item);
    }

    fn margin(&self, item: &NodeId, axis: Axis) -> f64 {
        self.nodes
            .get(item.0)
            .and_then(|n| n.margins[axis_slot(axis)])
            .unwrap_or(f64::NAN)
    }

    fn set_margin(&mut self, item: &NodeId, axis: Axis, value: Option<f64>) {
        if let Some(node) = self.nodes.get_mut(item.0) {
            node.margins[axis_slot(axis)] = value;
        }
    }

    fn trailing_gap(&self, item: &NodeId, axis: Axis) -> f64 {
        if axis != self.axis {
            return 0.0;
        }
        self.nodes.get(item.0).map_or(f64::NAN, |n| n.gap)
    }

    fn rect(&self, node: &NodeId) -> Rect {
        let Some(item) = self.item_of(*node) else {
            return Rect::default();
        };
        self.layout()
            .into_iter()
            .find(|(id, _)| *id == item)
            .map(|(_, rect)| rect)
            .unwrap_or_default()
    }

    fn container_rect(&self) -> Rect {
        self.container
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn is_item(&self, node: &NodeId) -> bool {
        self.order.contains(node)
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.attributes.borrow().clone()
    }

    fn watch(&mut self, on_change: AttributeCallback) -> bool {
        *self.watch.callback.borrow_mut() = Some(on_change);
        self.watch.active.set(true);
        true
    }

    fn unwatch(&mut self) {
        self.watch.active.set(false);
        self.watch.callback.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> MemoryStrip {
        MemoryStrip::uniform(Axis::Horizontal, Rect::new(0.0, 0.0, 300.0, 50.0), 5, 100.0, 10.0)
    }

    #[test]
    fn items_flow_along_axis() {
        let strip = five();
        let starts: Vec<f64> = strip.starts().into_iter().map(|(_, x)| x).collect();
        assert_eq!(starts, vec![0.0, 110.0, 220.0, 330.0, 440.0]);
    }

    #[test]
    fn lead_margin_shifts_whole_strip() {
        let mut strip = five();
        let lead = strip.first().unwrap();
        strip.set_margin(&lead, Axis::Horizontal, Some(-25.0));
        assert_eq!(strip.rect(&lead).x, -25.0);
        assert_eq!(strip.rect(&NodeId(4)).x, 415.0);
        assert_eq!(strip.margin(&lead, Axis::Horizontal), -25.0);
        assert!(strip.margin(&NodeId(1), Axis::Horizontal).is_nan());
    }

    #[test]
    fn vertical_layout_uses_heights() {
        let strip =
            MemoryStrip::uniform(Axis::Vertical, Rect::new(5.0, 10.0, 80.0, 200.0), 3, 40.0, 5.0);
        let rect = strip.rect(&NodeId(2));
        assert_eq!(rect, Rect::new(5.0, 100.0, 80.0, 40.0));
    }

    #[test]
    fn append_and_insert_reorder() {
        let mut strip = five();
        strip.append(&NodeId(0));
        assert_eq!(strip.order()[4], NodeId(0));
        strip.insert_before(&NodeId(0), &NodeId(1));
        assert_eq!(strip.order(), &[NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn nested_nodes_resolve_to_items() {
        let mut strip = five();
        let label = strip.add_child(NodeId(2));
        let icon = strip.add_child(label);
        assert!(!strip.is_item(&icon));
        assert_eq!(strip.parent(&icon), Some(label));
        assert_eq!(strip.parent(&label), Some(NodeId(2)));
        assert_eq!(strip.rect(&icon), strip.rect(&NodeId(2)));
    }

    #[test]
    fn observer_reaches_watcher() {
        let mut strip = five().with_attribute("data-hotline-step", "2");
        let observer = strip.observer();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        assert!(strip.watch(Box::new(move |name, value| {
            sink.borrow_mut().push(format!("{name}={value}"));
        })));

        observer.set_attribute("data-hotline-step", "5");
        strip.unwatch();
        observer.set_attribute("data-hotline-step", "6");

        assert_eq!(*seen.borrow(), vec!["data-hotline-step=5".to_string()]);
        assert_eq!(
            strip.attributes(),
            vec![("data-hotline-step".to_string(), "6".to_string())]
        );
    }
}
