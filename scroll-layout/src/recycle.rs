//! Moving elements between the live container and the pool as the window changes.

use alloc::vec::Vec;

use crate::cache::LayoutCache;
use crate::host::ElementHost;
use crate::key::IdentityMap;
use crate::{ElementKey, Extent, LayoutEvent, LayoutPolicy, Placement, VisibleWindow};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ParkedEntry {
    index: usize,
    /// Produced by `ElementHost::acquire` and owed back through `release`.
    leased: bool,
    /// The element still occupies `index` in the element list.
    in_slot: bool,
}

/// Result of applying a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ApplyOutcome {
    /// An empty slot was filled with an element that has no measured size yet.
    pub acquired_unmeasured: bool,
}

/// What the recycler needs from the engine while applying a window.
pub(crate) struct RecycleContext<'a, E> {
    pub elements: &'a mut [Option<E>],
    pub cache: &'a LayoutCache,
    pub policy: &'a LayoutPolicy,
    pub viewport: Extent,
    pub events: &'a mut Vec<LayoutEvent<E>>,
}

/// Tracks what is attached and what is waiting to be parked.
#[derive(Clone, Debug)]
pub(crate) struct Recycler<E> {
    last_frame: Option<VisibleWindow>,
    parked: IdentityMap<E, ParkedEntry>,
    leased: Vec<bool>,
    /// The host has produced an element for an empty slot at least once.
    fills_holes: bool,
}

impl<E> Default for Recycler<E> {
    fn default() -> Self {
        Self {
            last_frame: None,
            parked: IdentityMap::default(),
            leased: Vec::new(),
            fills_holes: false,
        }
    }
}

impl<E: ElementKey> Recycler<E> {
    pub(crate) fn last_frame(&self) -> Option<VisibleWindow> {
        self.last_frame
    }

    /// Forget the attached window. The next apply revisits the whole list.
    pub(crate) fn forget_window(&mut self) {
        self.last_frame = None;
    }

    pub(crate) fn fills_holes(&self) -> bool {
        self.fills_holes
    }

    pub(crate) fn parked_len(&self) -> usize {
        self.parked.len()
    }

    pub(crate) fn is_leased(&self, index: usize) -> bool {
        self.leased.get(index).copied().unwrap_or(false)
    }

    /// Pads or truncates the lease flags to `len`. Returns whether they were out of shape.
    pub(crate) fn fit(&mut self, len: usize) -> bool {
        if self.leased.len() == len {
            return false;
        }
        self.leased.resize(len, false);
        true
    }

    pub(crate) fn insert(&mut self, at: usize, count: usize) {
        let at = at.min(self.leased.len());
        self.leased.splice(at..at, core::iter::repeat_n(false, count));
        for entry in self.parked.values_mut() {
            if entry.in_slot && entry.index >= at {
                entry.index += count;
            }
        }
    }

    /// Drops the slot at `at`. A removed element is queued for parking.
    pub(crate) fn remove(&mut self, at: usize, element: Option<E>) {
        let leased = if at < self.leased.len() {
            self.leased.remove(at)
        } else {
            false
        };
        for entry in self.parked.values_mut() {
            if entry.in_slot && entry.index > at {
                entry.index -= 1;
            }
        }
        if let Some(element) = element {
            self.parked.insert(
                element,
                ParkedEntry {
                    index: at,
                    leased,
                    in_slot: false,
                },
            );
        }
    }

    /// Queues an element whose slot was overwritten in place.
    pub(crate) fn replace_slot(&mut self, index: usize, element: E) {
        let leased = self
            .leased
            .get_mut(index)
            .map(core::mem::take)
            .unwrap_or(false);
        self.parked.insert(
            element,
            ParkedEntry {
                index,
                leased,
                in_slot: false,
            },
        );
    }

    /// Queues every element of a list that is being replaced, and resets lease flags to `len`.
    pub(crate) fn detach_all(&mut self, old: Vec<Option<E>>, len: usize) {
        for (index, element) in old.into_iter().enumerate() {
            if let Some(element) = element {
                let leased = self.leased.get(index).copied().unwrap_or(false);
                self.parked.insert(
                    element,
                    ParkedEntry {
                        index,
                        leased,
                        in_slot: false,
                    },
                );
            }
        }
        self.leased.clear();
        self.leased.resize(len, false);
        self.last_frame = None;
    }

    /// Attaches indices entering `window` and queues indices leaving it.
    ///
    /// On a full apply every index of `window` is placed again and announced. When sibling order
    /// is requested and the window moved, elements that stay attached are placed again silently
    /// so their sibling index follows `first`.
    pub(crate) fn apply<H: ElementHost<E> + ?Sized>(
        &mut self,
        window: Option<VisibleWindow>,
        full: bool,
        cx: RecycleContext<'_, E>,
        host: &mut H,
    ) -> ApplyOutcome {
        let RecycleContext {
            elements,
            cache,
            policy,
            viewport,
            events,
        } = cx;
        let len = elements.len();
        let previous = self.last_frame;
        let changed = previous != window;
        let mut outcome = ApplyOutcome::default();

        if changed {
            events.push(LayoutEvent::BeforeVisibleChange { previous });
            let sweep = match previous {
                Some(w) => w.first.min(len)..w.last.saturating_add(1).min(len),
                None => 0..len,
            };
            for index in sweep {
                if !window.is_some_and(|w| w.contains(index)) {
                    self.unregister(index, elements, events, host);
                }
            }
        }

        if let Some(window) = window {
            debug_assert!(window.last < len, "window must lie inside the element list");
            let last = if window.last >= len {
                vwarn!(
                    last = window.last,
                    len,
                    "window runs past the element list, clamping"
                );
                len.saturating_sub(1)
            } else {
                window.last
            };
            let reorder = changed && policy.orders_siblings();
            if window.first < len {
                let cross = (viewport.cross
                    - policy.padding.cross_start as f32
                    - policy.padding.cross_end as f32)
                    .max(0.0);
                for index in window.first..=last {
                    let entering = !previous.is_some_and(|p| p.contains(index));
                    if full || entering {
                        let placed = self.register(
                            index,
                            window.first,
                            cross,
                            elements,
                            cache,
                            policy,
                            events,
                            host,
                        );
                        outcome.acquired_unmeasured |= placed == Registered::AcquiredUnmeasured;
                    } else if reorder {
                        if let Some(element) = &elements[index] {
                            place(element, index, window.first, cross, cache, policy, host);
                        }
                    }
                }
            }
        }

        self.last_frame = window;
        if changed {
            events.push(LayoutEvent::VisibleChanged { window });
        }
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    fn register<H: ElementHost<E> + ?Sized>(
        &mut self,
        index: usize,
        window_first: usize,
        cross: f32,
        elements: &mut [Option<E>],
        cache: &LayoutCache,
        policy: &LayoutPolicy,
        events: &mut Vec<LayoutEvent<E>>,
        host: &mut H,
    ) -> Registered {
        let mut registered = Registered::Placed;
        let element = match &elements[index] {
            Some(element) => element.clone(),
            None => match host.acquire(index) {
                Some(element) => {
                    vtrace!(index, "filled empty slot from host");
                    self.fills_holes = true;
                    elements[index] = Some(element.clone());
                    if let Some(flag) = self.leased.get_mut(index) {
                        *flag = true;
                    }
                    if cache.size(index).is_none() {
                        registered = Registered::AcquiredUnmeasured;
                    }
                    element
                }
                None => return Registered::Skipped,
            },
        };
        self.parked.remove(&element);

        place(&element, index, window_first, cross, cache, policy, host);
        if host.is_active(&element) {
            events.push(LayoutEvent::ElementBecameVisible { element, index });
        }
        registered
    }

    fn unregister<H: ElementHost<E> + ?Sized>(
        &mut self,
        index: usize,
        elements: &[Option<E>],
        events: &mut Vec<LayoutEvent<E>>,
        host: &mut H,
    ) {
        let Some(element) = elements[index].clone() else {
            return;
        };
        let active = host.is_active(&element);
        self.parked.insert(
            element.clone(),
            ParkedEntry {
                index,
                leased: self.is_leased(index),
                in_slot: true,
            },
        );
        if active {
            events.push(LayoutEvent::ElementBecameInvisible { element, index });
        }
    }

    /// Moves every queued element to the pool. Leased elements are handed back to the host and
    /// their slots emptied.
    pub(crate) fn drain<H: ElementHost<E> + ?Sized>(
        &mut self,
        elements: &mut [Option<E>],
        disable: bool,
        host: &mut H,
    ) {
        if self.parked.is_empty() {
            return;
        }
        vtrace!(count = self.parked.len(), "draining parked elements");
        for (element, entry) in core::mem::take(&mut self.parked) {
            host.park(&element, disable);
            if !entry.leased {
                continue;
            }
            if entry.in_slot && elements.get(entry.index).and_then(Option::as_ref) == Some(&element)
            {
                elements[entry.index] = None;
                if let Some(flag) = self.leased.get_mut(entry.index) {
                    *flag = false;
                }
            }
            host.release(entry.index, element);
        }
    }
}

/// Hands `element` its placement for `index`.
fn place<E, H: ElementHost<E> + ?Sized>(
    element: &E,
    index: usize,
    window_first: usize,
    cross: f32,
    cache: &LayoutCache,
    policy: &LayoutPolicy,
    host: &mut H,
) {
    let layout = policy.scroll_axis.layout();
    let leading = cache.position(index).unwrap_or(0.0);
    let main = cache
        .size(index)
        .or_else(|| cache.resolved_size(index))
        .unwrap_or(0.0);
    let placement = Placement {
        index,
        position: layout.element_position(leading, policy.padding.cross_start as f32),
        extent: Extent::new(main, cross),
        anchor: layout.anchor(),
        sibling_index: policy
            .orders_siblings()
            .then(|| index - window_first + policy.starting_sibling),
    };
    host.attach(element, &placement);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Registered {
    Placed,
    AcquiredUnmeasured,
    Skipped,
}
