use alloc::sync::Arc;
use alloc::vec::Vec;

use scroll_layout::{Axis, ElementHost, ElementKey, Placement};

use crate::key::NodeMap;

/// Builds a new element for an empty slot.
///
/// Called with a running serial number, so every instance it produces is distinct.
pub type Template<E> = Arc<dyn Fn(usize) -> E + Send + Sync>;

/// Per-element state kept by a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub preferred_main: f32,
    pub active: bool,
    /// Last placement received while attached.
    pub placement: Option<Placement>,
}

/// An in-memory retained element tree.
///
/// `live` holds the children of the live container in order, `pool` the parked ones. Elements
/// without a node are active and use the scene's default size.
///
/// With a template the scene also acts as a factory for empty slots: released elements are kept
/// and handed out again before the template is asked for a new one.
#[derive(Clone)]
pub struct Scene<E> {
    live: Vec<E>,
    pool: Vec<E>,
    pool_disabled: bool,
    nodes: NodeMap<E, Node>,
    default_size: f32,
    template: Option<Template<E>>,
    recycled: Vec<E>,
    created: usize,
}

impl<E: ElementKey> Scene<E> {
    pub fn new(default_size: f32) -> Self {
        Self {
            live: Vec::new(),
            pool: Vec::new(),
            pool_disabled: false,
            nodes: NodeMap::default(),
            default_size,
            template: None,
            recycled: Vec::new(),
            created: 0,
        }
    }

    pub fn with_template(mut self, template: impl Fn(usize) -> E + Send + Sync + 'static) -> Self {
        self.template = Some(Arc::new(template));
        self
    }

    pub fn default_size(&self) -> f32 {
        self.default_size
    }

    pub fn set_preferred_size(&mut self, element: E, size: f32) {
        self.node_mut(element).preferred_main = size;
    }

    pub fn set_active(&mut self, element: E, active: bool) {
        self.node_mut(element).active = active;
    }

    fn node_mut(&mut self, element: E) -> &mut Node {
        let default_size = self.default_size;
        self.nodes.entry(element).or_insert_with(|| Node {
            preferred_main: default_size,
            active: true,
            placement: None,
        })
    }

    pub fn node(&self, element: &E) -> Option<&Node> {
        self.nodes.get(element)
    }

    pub fn placement(&self, element: &E) -> Option<Placement> {
        self.nodes.get(element).and_then(|n| n.placement)
    }

    /// Children of the live container, in order.
    pub fn live(&self) -> &[E] {
        &self.live
    }

    /// Children of the pool container.
    pub fn pooled(&self) -> &[E] {
        &self.pool
    }

    pub fn is_live(&self, element: &E) -> bool {
        self.live.contains(element)
    }

    /// Whether the pool was last asked to disable its children.
    pub fn pool_disabled(&self) -> bool {
        self.pool_disabled
    }

    /// Number of elements the template has built.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of released elements waiting to be handed out again.
    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }
}

impl<E: ElementKey> ElementHost<E> for Scene<E> {
    fn preferred_size(&mut self, element: &E, _axis: Axis) -> f32 {
        self.nodes
            .get(element)
            .map_or(self.default_size, |n| n.preferred_main)
    }

    fn materialized_size(&self, element: &E, _axis: Axis) -> Option<f32> {
        self.placement(element).map(|p| p.extent.main)
    }

    fn is_active(&self, element: &E) -> bool {
        self.nodes.get(element).is_none_or(|n| n.active)
    }

    fn attach(&mut self, element: &E, placement: &Placement) {
        self.pool.retain(|e| e != element);
        let current = self.live.iter().position(|e| e == element);
        match (current, placement.sibling_index) {
            (Some(at), Some(sibling)) => {
                let element = self.live.remove(at);
                let sibling = sibling.min(self.live.len());
                self.live.insert(sibling, element);
            }
            (Some(_), None) => {}
            (None, Some(sibling)) => {
                let sibling = sibling.min(self.live.len());
                self.live.insert(sibling, element.clone());
            }
            (None, None) => self.live.push(element.clone()),
        }
        self.node_mut(element.clone()).placement = Some(*placement);
    }

    fn park(&mut self, element: &E, disable: bool) {
        self.live.retain(|e| e != element);
        if !self.pool.contains(element) {
            self.pool.push(element.clone());
        }
        self.pool_disabled = disable;
    }

    fn acquire(&mut self, _index: usize) -> Option<E> {
        if let Some(element) = self.recycled.pop() {
            return Some(element);
        }
        let template = self.template.as_ref()?;
        let element = template(self.created);
        self.created += 1;
        Some(element)
    }

    fn release(&mut self, _index: usize, element: E) {
        self.pool.retain(|e| *e != element);
        if let Some(node) = self.nodes.get_mut(&element) {
            node.placement = None;
        }
        self.recycled.push(element);
    }

    fn estimate_size(&mut self, _index: usize, _axis: Axis) -> Option<f32> {
        self.template.as_ref().map(|_| self.default_size)
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for Scene<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("live", &self.live)
            .field("pool", &self.pool)
            .field("pool_disabled", &self.pool_disabled)
            .field("default_size", &self.default_size)
            .field("created", &self.created)
            .field("recycled", &self.recycled)
            .finish_non_exhaustive()
    }
}
