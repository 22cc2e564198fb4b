//! Visible window derivation over the position cache.

use crate::types::{abs_f32, finite_or_zero, SIZE_EPSILON};
use crate::{ExtraVisible, VisibleWindow};

/// Inputs for one window derivation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WindowQuery<'a> {
    pub positions: &'a [f32],
    pub sizes: &'a [f32],
    pub scroll_offset: f32,
    pub viewport_main: f32,
    /// Window derived last time. Seeds the index walk and bounds shrinking.
    pub previous: Option<VisibleWindow>,
    pub extra: ExtraVisible,
    pub minimum_visible: Option<usize>,
    pub keep_previous_len: bool,
}

/// A derived window, possibly cut down by the attach budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WindowPlan {
    pub window: VisibleWindow,
    /// `false` when the budget held the window back from the desired one.
    pub settled: bool,
}

/// Index of the element whose leading edge is the last one at or before `offset`.
///
/// Walks from `hint`, so consecutive small scrolls cost a few steps.
pub(crate) fn current_index(positions: &[f32], hint: usize, offset: f32) -> usize {
    let Some(last) = positions.len().checked_sub(1) else {
        return 0;
    };
    let mut i = hint.min(last);
    if offset < positions[i] {
        while i > 0 && offset < positions[i] {
            i -= 1;
        }
    } else {
        while i < last && positions[i + 1] <= offset {
            i += 1;
        }
    }
    i
}

/// Last index whose trailing edge fits within `bound`, starting from `current`.
pub(crate) fn last_index(positions: &[f32], sizes: &[f32], current: usize, bound: f32) -> usize {
    let len = positions.len().min(sizes.len());
    let mut last = current;
    while last + 1 < len && positions[last + 1] + sizes[last + 1] <= bound + SIZE_EPSILON {
        last += 1;
    }
    last
}

/// Splits `need` extra slots between two sides with limited room.
///
/// Halves go to each side (the odd slot after); whatever a side cannot take moves to the other.
pub(crate) fn donate(need: usize, room_before: usize, room_after: usize) -> (usize, usize) {
    let mut before = need / 2;
    let mut after = need - before;
    if before > room_before {
        after += before - room_before;
        before = room_before;
    }
    if after > room_after {
        before += after - room_after;
        after = room_after;
    }
    (before.min(room_before), after)
}

fn grow_within(window: VisibleWindow, need: usize, bounds: VisibleWindow) -> VisibleWindow {
    let (before, after) = donate(
        need,
        window.first - bounds.first,
        bounds.last - window.last,
    );
    VisibleWindow::new(window.first - before, window.last + after)
}

/// Derives the desired window together with the index at the scroll offset.
///
/// Returns `None` for an empty list.
pub(crate) fn derive(query: &WindowQuery<'_>) -> Option<(VisibleWindow, usize)> {
    let len = query.positions.len();
    let last_valid = len.checked_sub(1)?;

    let offset = finite_or_zero(query.scroll_offset);
    let hint = query.previous.map_or(0, |w| w.first);
    let current = current_index(query.positions, hint, offset);
    let bound = finite_or_zero(query.viewport_main).max(0.0) + abs_f32(offset);
    let last = last_index(query.positions, query.sizes, current, bound);

    let first = current.saturating_sub(query.extra.before);
    let last = last.saturating_add(query.extra.after).min(last_valid);
    let mut window = VisibleWindow::new(first, last);

    let mut target = window.len();
    if let Some(minimum) = query.minimum_visible {
        target = target.max(minimum.min(len));
    }
    if query.keep_previous_len {
        if let Some(previous) = query.previous {
            target = target.max(previous.len().min(len));
        }
    }
    if window.len() < target {
        window = grow_within(
            window,
            target - window.len(),
            VisibleWindow::new(0, last_valid),
        );
    }
    vtrace!(
        current,
        first = window.first,
        last = window.last,
        "window::derive"
    );
    Some((window, current))
}

/// Limits how many indices outside `attached` may enter in one step.
///
/// Keeps the overlap with `attached` and grows it towards `desired` by at most `budget` new
/// indices. When the two do not overlap, growth starts from `current`.
pub(crate) fn limit_to_budget(
    desired: VisibleWindow,
    attached: VisibleWindow,
    current: usize,
    budget: usize,
) -> WindowPlan {
    let overlap_first = desired.first.max(attached.first);
    let overlap_last = desired.last.min(attached.last);
    let entering = if overlap_first <= overlap_last {
        desired.len() - (overlap_last - overlap_first + 1)
    } else {
        desired.len()
    };
    if budget == 0 || entering <= budget {
        return WindowPlan {
            window: desired,
            settled: true,
        };
    }

    let (seed, remaining) = if overlap_first <= overlap_last {
        (VisibleWindow::new(overlap_first, overlap_last), budget)
    } else {
        let anchor = current.clamp(desired.first, desired.last);
        (VisibleWindow::single(anchor), budget - 1)
    };
    vdebug!(
        entering,
        budget,
        "attach budget exceeded, deferring the rest of the window"
    );
    WindowPlan {
        window: grow_within(seed, remaining, desired),
        settled: false,
    }
}
