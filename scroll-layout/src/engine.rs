use alloc::vec::{Drain, Vec};

use crate::cache::{resolve_slot, LayoutCache};
use crate::content::ContentSizer;
use crate::host::{ElementHost, ScrollViewport};
use crate::recycle::{RecycleContext, Recycler};
use crate::types::{abs_f32, finite_or_zero, ReloadMode, SIZE_EPSILON};
use crate::window::{self, WindowQuery};
use crate::{
    ElementKey, Extent, ExtraVisible, LayoutEvent, LayoutPolicy, Padding, Phase, ScrollAxis,
    VisibleWindow,
};

/// A recycling layout engine for a vertical or horizontal list of variable-size elements.
///
/// The engine owns the element list (as cheap handles), the size and position caches and the
/// attached window. It never touches UI objects directly:
/// - an [`ElementHost`] measures elements and moves them between the live container and the
///   pool,
/// - a [`ScrollViewport`] reports scroll offset and viewport size and receives the content size.
///
/// Mutations only mark the engine dirty. All work happens in [`LayoutEngine::tick`], which the
/// host calls once per frame, followed by [`LayoutEngine::drain_events`].
#[derive(Clone, Debug)]
pub struct LayoutEngine<E> {
    policy: LayoutPolicy,
    elements: Vec<Option<E>>,
    cache: LayoutCache,
    recycler: Recycler<E>,
    /// Window derived by the last pass; seeds the next derivation.
    window: Option<VisibleWindow>,

    phase: Phase,
    layout_dirty: bool,
    reload: Option<ReloadMode>,

    viewport: Option<Extent>,
    last_scroll: Option<f32>,
    scroll_listening: bool,

    events: Vec<LayoutEvent<E>>,
}

impl<E: ElementKey> Default for LayoutEngine<E> {
    fn default() -> Self {
        Self::new(LayoutPolicy::default())
    }
}

impl<E: ElementKey> LayoutEngine<E> {
    pub fn new(policy: LayoutPolicy) -> Self {
        vdebug!(?policy, "LayoutEngine::new");
        warn_on_negative_spacing(&policy);
        Self {
            policy,
            elements: Vec::new(),
            cache: LayoutCache::default(),
            recycler: Recycler::default(),
            window: None,
            phase: Phase::Dirty,
            layout_dirty: true,
            reload: Some(ReloadMode::Full),
            viewport: None,
            last_scroll: None,
            scroll_listening: false,
            events: Vec::new(),
        }
    }

    pub fn with_elements(
        policy: LayoutPolicy,
        elements: impl IntoIterator<Item = Option<E>>,
    ) -> Self {
        let mut engine = Self::new(policy);
        engine.replace_elements(elements);
        engine
    }

    pub fn policy(&self) -> &LayoutPolicy {
        &self.policy
    }

    /// Replaces the policy, scheduling whatever recompute the change needs.
    pub fn set_policy(&mut self, policy: LayoutPolicy) {
        let previous = core::mem::replace(&mut self.policy, policy);
        if previous == self.policy {
            return;
        }
        vtrace!(policy = ?self.policy, "LayoutEngine::set_policy");
        if previous.spacing != self.policy.spacing {
            warn_on_negative_spacing(&self.policy);
        }
        if previous.affects_layout(&self.policy) {
            self.mark_layout_dirty(true);
        } else if previous.affects_window(&self.policy) {
            self.request_reload(ReloadMode::Full);
        }
    }

    pub fn update_policy(&mut self, f: impl FnOnce(&mut LayoutPolicy)) {
        let mut next = self.policy;
        f(&mut next);
        self.set_policy(next);
    }

    pub fn set_spacing(&mut self, spacing: i32) {
        self.update_policy(|p| p.spacing = spacing);
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.update_policy(|p| p.padding = padding);
    }

    pub fn set_scroll_axis(&mut self, scroll_axis: ScrollAxis) {
        self.update_policy(|p| p.scroll_axis = scroll_axis);
    }

    pub fn set_extra_visible(&mut self, extra_visible: ExtraVisible) {
        self.update_policy(|p| p.extra_visible = extra_visible);
    }

    pub fn set_minimum_visible_elements(&mut self, minimum: Option<usize>) {
        self.update_policy(|p| p.minimum_visible_elements = minimum);
    }

    pub fn set_elements_to_attach_per_step(&mut self, budget: usize) {
        self.update_policy(|p| p.elements_to_attach_per_step = budget);
    }

    pub fn set_minimum_content_size(&mut self, minimum: Option<f32>) {
        self.update_policy(|p| p.minimum_content_size = minimum);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the next [`LayoutEngine::tick`] has work to do.
    pub fn is_dirty(&self) -> bool {
        self.layout_dirty || self.reload.is_some()
    }

    // Element list.

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Option<E>] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&E> {
        self.elements.get(index).and_then(Option::as_ref)
    }

    pub fn find_index(&self, element: &E) -> Option<usize> {
        self.elements
            .iter()
            .position(|slot| slot.as_ref() == Some(element))
    }

    /// Swaps in a new element list. Caches are reset and the next tick recomputes everything.
    ///
    /// Elements of the old list are parked on the next tick unless they are attached again.
    pub fn replace_elements(&mut self, elements: impl IntoIterator<Item = Option<E>>) {
        let old = core::mem::replace(&mut self.elements, elements.into_iter().collect());
        let len = self.elements.len();
        vdebug!(previous = old.len(), len, "LayoutEngine::replace_elements");
        self.recycler.detach_all(old, len);
        self.cache.reset(len);
        self.mark_layout_dirty(true);
        self.events.push(LayoutEvent::ElementsReplaced);
    }

    pub fn clear_elements(&mut self) {
        self.replace_elements(core::iter::empty());
    }

    /// Inserts elements before `index` (clamped to the list length). Returns how many were
    /// inserted.
    pub fn insert_range(
        &mut self,
        index: usize,
        elements: impl IntoIterator<Item = Option<E>>,
    ) -> usize {
        self.fix_layout_inconsistencies();
        let at = index.min(self.elements.len());
        let before = self.elements.len();
        self.elements.splice(at..at, elements);
        let count = self.elements.len() - before;
        if count == 0 {
            return 0;
        }
        vtrace!(at, count, "LayoutEngine::insert_range");
        self.cache.insert_unmeasured(at, count);
        self.recycler.insert(at, count);
        self.mark_layout_dirty(true);
        self.events.push(LayoutEvent::ElementsAdded {
            indices: (at..at + count).collect(),
        });
        count
    }

    pub fn add_range(&mut self, elements: impl IntoIterator<Item = Option<E>>) -> usize {
        self.insert_range(self.elements.len(), elements)
    }

    /// Inserts one slot and returns the index it landed at.
    pub fn insert(&mut self, index: usize, element: Option<E>) -> usize {
        let at = index.min(self.elements.len());
        self.insert_range(at, core::iter::once(element));
        at
    }

    pub fn push(&mut self, element: Option<E>) -> usize {
        self.insert(self.elements.len(), element)
    }

    /// Removes the slot at `index` and hands back its content.
    ///
    /// Returns `None` when `index` is out of range. A removed element is parked on the next tick.
    pub fn remove_at(&mut self, index: usize) -> Option<Option<E>> {
        self.fix_layout_inconsistencies();
        if index >= self.elements.len() {
            vtrace!(index, len = self.elements.len(), "remove_at out of range");
            return None;
        }
        let removed = self.elements.remove(index);
        self.cache.remove(index);
        self.recycler.remove(index, removed.clone());
        self.mark_layout_dirty(true);
        self.events.push(LayoutEvent::ElementsRemoved {
            indices: alloc::vec![index],
        });
        Some(removed)
    }

    pub fn remove(&mut self, element: &E) -> bool {
        match self.find_index(element) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    /// Overwrites the slot at `index`. The slot's cached size is dropped.
    pub fn set_element(&mut self, index: usize, element: Option<E>) -> bool {
        self.fix_layout_inconsistencies();
        let Some(slot) = self.elements.get_mut(index) else {
            return false;
        };
        if *slot == element {
            return false;
        }
        if let Some(old) = core::mem::replace(slot, element) {
            self.recycler.replace_slot(index, old);
        }
        self.cache.set_size(index, f32::NAN);
        self.mark_layout_dirty(false);
        self.request_reload(ReloadMode::Full);
        self.events.push(LayoutEvent::ElementChanged { index });
        true
    }

    /// Runs `f` against the raw element list. Caches are reconciled afterwards and the next tick
    /// recomputes everything.
    ///
    /// Elements dropped by `f` are not parked.
    pub fn with_elements_mut<R>(&mut self, f: impl FnOnce(&mut Vec<Option<E>>) -> R) -> R {
        let out = f(&mut self.elements);
        self.fix_layout_inconsistencies();
        self.mark_layout_dirty(true);
        out
    }

    /// Pads or truncates the caches to the list length. Returns whether they were out of shape.
    pub fn fix_layout_inconsistencies(&mut self) -> bool {
        let len = self.elements.len();
        let healed = self.cache.fit(len) | self.recycler.fit(len);
        if healed {
            vdebug!(len, "layout caches did not match the element list, healed");
            self.mark_layout_dirty(false);
        }
        healed
    }

    // Sizes and positions.

    /// Overrides the size of `index`. Negative or NaN sizes clear the override so the element is
    /// measured again.
    pub fn set_cached_element_size(&mut self, index: usize, size: f32) -> bool {
        self.fix_layout_inconsistencies();
        if !self.cache.set_size(index, size) {
            return false;
        }
        self.mark_layout_dirty(false);
        self.events.push(LayoutEvent::ElementSizeChanged { index });
        true
    }

    pub fn cached_element_size(&self, index: usize) -> Option<f32> {
        if index >= self.elements.len() {
            return None;
        }
        self.cache.size(index)
    }

    pub fn cached_element_position(&self, index: usize) -> Option<f32> {
        if index >= self.elements.len() {
            return None;
        }
        self.cache.position(index)
    }

    /// Drops every measured size.
    pub fn invalidate_cached_sizes(&mut self) {
        self.cache.invalidate_sizes();
        self.mark_layout_dirty(false);
    }

    /// Content size along the scroll axis, as last reported to the viewport.
    pub fn content_extent(&self) -> f32 {
        self.cache.extent()
    }

    // Reloads.

    /// Schedules a layout recompute. With `full`, the attached window is forgotten and every
    /// element is revisited.
    pub fn mark_layout_dirty(&mut self, full: bool) {
        self.layout_dirty = true;
        if full {
            self.reset_window_memo();
            self.request_reload(ReloadMode::Full);
        }
        self.touch();
    }

    /// Forgets the attached window and re-places everything on the next tick.
    pub fn full_reload_all(&mut self) {
        self.recycler.forget_window();
        self.request_reload(ReloadMode::Full);
    }

    /// Re-places every attached element on the next tick.
    pub fn reload_all(&mut self) {
        self.request_reload(ReloadMode::Full);
    }

    /// Attaches elements entering the window on the next tick.
    pub fn fast_reload_all(&mut self) {
        self.request_reload(ReloadMode::Fast);
    }

    fn request_reload(&mut self, mode: ReloadMode) {
        self.reload = self.reload.max(Some(mode));
        self.touch();
    }

    fn reset_window_memo(&mut self) {
        self.window = None;
        self.recycler.forget_window();
    }

    fn touch(&mut self) {
        if self.phase != Phase::Recomputing {
            self.phase = Phase::Dirty;
        }
    }

    // Window.

    /// The attached window, if any.
    pub fn visible_elements_index_range(&self) -> Option<VisibleWindow> {
        self.recycler
            .last_frame()
            .filter(|w| w.last < self.elements.len())
    }

    /// Attached elements with their indices. Empty slots are skipped.
    pub fn visible_elements(&self) -> impl Iterator<Item = (usize, &E)> + '_ {
        let range = match self.visible_elements_index_range() {
            Some(w) => w.first..w.last + 1,
            None => 0..0,
        };
        range.filter_map(|i| self.elements[i].as_ref().map(|e| (i, e)))
    }

    pub fn is_index_visible(&self, index: usize) -> bool {
        self.visible_elements_index_range()
            .is_some_and(|w| w.contains(index))
    }

    /// The window the current caches would produce at `scroll_offset`, ignoring the attach
    /// budget.
    pub fn window_for(&self, scroll_offset: f32, viewport_main: f32) -> Option<VisibleWindow> {
        self.derive_window(scroll_offset, viewport_main)
            .map(|(window, _)| window)
    }

    fn derive_window(&self, scroll_offset: f32, viewport_main: f32) -> Option<(VisibleWindow, usize)> {
        window::derive(&WindowQuery {
            positions: self.cache.positions(),
            sizes: self.cache.resolved_sizes(),
            scroll_offset,
            viewport_main,
            previous: self.window,
            extra: self.policy.extra_visible,
            minimum_visible: self.policy.minimum_visible_elements,
            keep_previous_len: self.policy.optimize_deep_hierarchy,
        })
    }

    // Events.

    pub fn drain_events(&mut self) -> Drain<'_, LayoutEvent<E>> {
        self.events.drain(..)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // Frame driving.

    /// Notifies the engine that the viewport scrolled.
    ///
    /// Moves smaller than `scroll_min_delta` are ignored, as is scrolling while the content fits
    /// inside the viewport. Returns whether a reload was scheduled.
    pub fn on_scroll_changed(&mut self, offset: f32) -> bool {
        let offset = finite_or_zero(offset);
        if !self.scroll_listening {
            return false;
        }
        if let Some(last) = self.last_scroll {
            if abs_f32(offset - last) < self.policy.scroll_min_delta {
                return false;
            }
        }
        self.last_scroll = Some(offset);
        self.events.push(LayoutEvent::ScrollChanged { offset });

        let viewport_main = self.viewport.unwrap_or_default().main;
        if self.window_for(offset, viewport_main) == self.window {
            return false;
        }
        vtrace!(offset, "scroll moved the window");
        self.request_reload(ReloadMode::Fast);
        true
    }

    /// Runs one frame: reconciles caches, derives and applies the window, reports the content
    /// size and parks detached elements.
    ///
    /// Returns `false` when nothing was dirty.
    pub fn tick<V, H>(&mut self, viewport: &mut V, host: &mut H) -> bool
    where
        V: ScrollViewport + ?Sized,
        H: ElementHost<E> + ?Sized,
    {
        if self.phase == Phase::Recomputing {
            vwarn!("previous tick did not finish, forcing a full recompute");
            self.mark_layout_dirty(true);
        }
        let reported = viewport.viewport_extent();
        let extent = reported.sanitized();
        if extent != reported {
            vtrace!(main = reported.main, cross = reported.cross, "degenerate viewport extent");
        }
        self.detect_resize(extent);
        if !self.is_dirty() {
            return false;
        }

        self.phase = Phase::Recomputing;
        let relayout = core::mem::take(&mut self.layout_dirty);
        // A relayout moves elements that stay attached, so they are all placed again.
        let full = relayout || self.reload.take() == Some(ReloadMode::Full);
        self.reload = None;
        if relayout {
            self.recalculate_layout(extent, viewport, host);
        }

        let offset = finite_or_zero(viewport.scroll_offset());
        let mut settled = self.reload_window(offset, extent, full, host);
        if relayout {
            self.events.push(LayoutEvent::ContentReloaded);
            if abs_f32(offset) > self.cache.extent() + SIZE_EPSILON {
                vdebug!(
                    offset,
                    content = self.cache.extent(),
                    "scroll offset past the content, rebuilding"
                );
                viewport.request_rebuild();
                self.reset_window_memo();
                let offset = finite_or_zero(viewport.scroll_offset());
                settled = self.reload_window(offset, extent, true, host);
            }
        }

        self.recycler.drain(
            &mut self.elements,
            self.policy.disable_non_visible_elements,
            host,
        );
        if !settled {
            self.reload = self.reload.max(Some(ReloadMode::Fast));
        }
        self.phase = if self.is_dirty() {
            Phase::Dirty
        } else {
            Phase::Clean
        };
        true
    }

    fn detect_resize(&mut self, extent: Extent) {
        let resized = match self.viewport {
            None => true,
            Some(old) => {
                old != extent
                    && (extent.main == 0.0
                        || extent.cross == 0.0
                        || abs_f32(old.main - extent.main) > abs_f32(old.main * 0.01)
                        || abs_f32(old.cross - extent.cross) > abs_f32(old.cross * 0.01))
            }
        };
        if resized {
            vdebug!(main = extent.main, cross = extent.cross, "viewport resized");
            self.viewport = Some(extent);
            self.mark_layout_dirty(false);
        }
    }

    fn recalculate_layout<V, H>(&mut self, extent: Extent, viewport: &mut V, host: &mut H)
    where
        V: ScrollViewport + ?Sized,
        H: ElementHost<E> + ?Sized,
    {
        let len = self.elements.len();
        if self.cache.fit(len) | self.recycler.fit(len) {
            vdebug!(len, "layout caches did not match the element list, healed");
        }

        let policy = self.policy;
        let axis = policy.scroll_axis.axis();
        let fallback = finite_or_zero(policy.default_element_size).max(0.0);
        // Empty slots need room to enter the window once the host has shown it can fill them.
        let hole_fallback = self.recycler.fills_holes().then_some(fallback);
        let elements = &self.elements;
        self.cache.accumulate(
            policy.padding.before as f32,
            policy.padding.after as f32,
            policy.spacing as f32,
            |index, cached| {
                resolve_slot(
                    host,
                    elements[index].as_ref(),
                    index,
                    cached,
                    axis,
                    fallback,
                    hole_fallback,
                )
            },
        );

        let minimum = if policy.auto_minimum_from_viewport {
            Some(extent.main)
        } else {
            policy.minimum_content_size
        };
        let applied = ContentSizer {
            minimum,
            align: policy.minimum_content_size_align,
        }
        .apply(&mut self.cache);
        viewport.set_content_extent(Extent::new(applied, extent.cross));
        vdebug!(len, content = applied, "layout recalculated");
    }

    /// Derives the window at `offset` and applies it. Returns `false` when the attach budget
    /// held part of the window back.
    fn reload_window<H>(&mut self, offset: f32, extent: Extent, full: bool, host: &mut H) -> bool
    where
        H: ElementHost<E> + ?Sized,
    {
        let mut settled = true;
        let window = match self.derive_window(offset, extent.main) {
            None => None,
            Some((desired, current)) => {
                match (self.policy.attach_budget(), self.recycler.last_frame()) {
                    (Some(budget), Some(attached)) if !full => {
                        let plan = window::limit_to_budget(desired, attached, current, budget);
                        settled = plan.settled;
                        Some(plan.window)
                    }
                    _ => Some(desired),
                }
            }
        };
        self.window = window;
        self.scroll_listening = self.cache.extent() > extent.main + SIZE_EPSILON;
        vtrace!(
            offset,
            full,
            first = window.map(|w| w.first),
            last = window.map(|w| w.last),
            "reload_window"
        );

        let outcome = self.recycler.apply(
            window,
            full,
            RecycleContext {
                elements: &mut self.elements,
                cache: &self.cache,
                policy: &self.policy,
                viewport: extent,
                events: &mut self.events,
            },
            host,
        );
        if outcome.acquired_unmeasured {
            // Filled slots are measured on the next pass.
            self.layout_dirty = true;
        }
        settled
    }

    /// Number of detached elements the next tick will park.
    pub fn parked_len(&self) -> usize {
        self.recycler.parked_len()
    }
}

fn warn_on_negative_spacing(policy: &LayoutPolicy) {
    if policy.spacing < 0 {
        vwarn!(
            spacing = policy.spacing,
            "negative spacing, elements will overlap"
        );
    }
}
