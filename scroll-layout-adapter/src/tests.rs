use crate::*;

use scroll_layout::{LayoutEngine, LayoutEvent, LayoutPolicy, Point, ScrollViewport, VisibleWindow};
use std::vec::Vec;

fn controller(policy: LayoutPolicy, len: u32) -> Controller<u32> {
    Controller::from_engine(LayoutEngine::with_elements(policy, (0..len).map(Some)))
}

fn frame(
    c: &mut Controller<u32>,
    viewport: &mut SimViewport,
    scene: &mut Scene<u32>,
) -> Vec<LayoutEvent<u32>> {
    let mut events = Vec::new();
    c.frame(viewport, scene, |e| events.push(e));
    events
}

fn entered(events: &[LayoutEvent<u32>]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            LayoutEvent::ElementBecameVisible { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}

#[test]
fn scene_follows_the_window_through_a_scroll() {
    let mut c = controller(LayoutPolicy::default(), 200);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);

    let events = frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(viewport.content.main, 8000.0);
    assert_eq!(scene.live(), (0..10).collect::<Vec<u32>>().as_slice());
    assert_eq!(scene.pooled().len(), 190);
    assert!(scene.pool_disabled());
    assert_eq!(entered(&events), (0..10).collect::<Vec<usize>>());

    let applied = c.scroll_to_index(50, Align::Start, &mut viewport);
    assert_eq!(applied, Some(2000.0));
    let events = frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(
        c.engine().visible_elements_index_range(),
        Some(VisibleWindow::new(50, 59))
    );
    assert_eq!(scene.live(), (50..60).collect::<Vec<u32>>().as_slice());
    assert_eq!(scene.pooled().len(), 190);
    assert!(!scene.pooled().contains(&55));
    assert_eq!(entered(&events), (50..60).collect::<Vec<usize>>());
}

#[test]
fn scene_records_placements() {
    let mut c = controller(LayoutPolicy::default(), 20);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);
    frame(&mut c, &mut viewport, &mut scene);

    let p = scene.placement(&2).expect("attached");
    assert_eq!(p.index, 2);
    assert_eq!(p.position, Point::new(0.0, -80.0));
    assert_eq!(p.extent.main, 40.0);
    assert_eq!(p.extent.cross, 300.0);
    assert_eq!(p.sibling_index, None);
    assert_eq!(scene.placement(&15), None);
}

#[test]
fn inactive_scene_nodes_collapse() {
    let mut c = controller(LayoutPolicy::default(), 100);
    let mut scene = Scene::new(40.0);
    scene.set_active(3, false);
    scene.set_preferred_size(7, 80.0);
    let mut viewport = SimViewport::new(400.0, 300.0);

    let events = frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(c.engine().cached_element_position(4), Some(120.0));
    assert_eq!(c.engine().cached_element_position(8), Some(320.0));
    assert_eq!(viewport.content.main, 4000.0);
    assert_eq!(
        c.engine().visible_elements_index_range(),
        Some(VisibleWindow::new(0, 9))
    );
    assert!(scene.is_live(&3));
    assert!(!entered(&events).contains(&3));
    assert_eq!(entered(&events).len(), 9);
}

#[test]
fn scroll_to_index_alignments() {
    let mut c = controller(LayoutPolicy::default(), 100);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);
    frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(c.max_scroll_offset(400.0), 3600.0);

    let at = |align, index, current| c.scroll_to_index_offset(index, align, current, 400.0);
    assert_eq!(at(Align::Start, 10, 0.0), Some(400.0));
    assert_eq!(at(Align::End, 10, 0.0), Some(40.0));
    assert_eq!(at(Align::Center, 10, 0.0), Some(220.0));
    // Fully visible: stay put.
    assert_eq!(at(Align::Auto, 5, 0.0), Some(0.0));
    assert_eq!(at(Align::Auto, 50, 0.0), Some(1640.0));
    assert_eq!(at(Align::Auto, 10, 1000.0), Some(400.0));
    assert_eq!(at(Align::Start, 99, 0.0), Some(3600.0));
    assert_eq!(at(Align::Start, 500, 0.0), Some(3600.0));

    let empty = Controller::<u32>::new(LayoutPolicy::default());
    assert_eq!(empty.scroll_to_index_offset(0, Align::Start, 0.0, 400.0), None);
}

#[test]
fn scroll_to_offset_clamps_through_the_viewport() {
    let mut c = controller(LayoutPolicy::default(), 100);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);
    frame(&mut c, &mut viewport, &mut scene);

    assert_eq!(c.scroll_to_offset(10_000.0, &mut viewport), 3600.0);
    assert_eq!(viewport.offset, 3600.0);
    frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(
        c.engine().visible_elements_index_range(),
        Some(VisibleWindow::new(90, 99))
    );

    assert_eq!(c.scroll_to_offset(-50.0, &mut viewport), 0.0);
    frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(scene.live(), (0..10).collect::<Vec<u32>>().as_slice());
}

#[test]
fn ordered_siblings_keep_index_order() {
    let policy = LayoutPolicy::default().with_optimize_deep_hierarchy(false);
    let mut c = controller(policy, 100);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);

    frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(scene.live(), (0..10).collect::<Vec<u32>>().as_slice());
    assert_eq!(scene.placement(&4).and_then(|p| p.sibling_index), Some(4));

    for offset in [100.0, 730.0, 20.0, 0.0] {
        c.scroll_to_offset(offset, &mut viewport);
        frame(&mut c, &mut viewport, &mut scene);
        let w = c.engine().visible_elements_index_range().expect("window");
        let expected: Vec<u32> = w.indices().map(|i| i as u32).collect();
        assert_eq!(scene.live(), expected.as_slice(), "offset {offset}");
    }
}

#[test]
fn template_fills_holes_and_reuses_released_elements() {
    let engine = LayoutEngine::<u32>::with_elements(
        LayoutPolicy::default(),
        core::iter::repeat_n(None, 100),
    );
    let mut c = Controller::from_engine(engine);
    let mut scene = Scene::new(40.0).with_template(|serial| 1000 + serial as u32);
    let mut viewport = SimViewport::new(400.0, 300.0);

    frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(viewport.content.main, 4000.0);
    assert_eq!(scene.created(), 10);
    assert_eq!(scene.live().len(), 10);
    assert!(!c.engine().is_dirty());

    c.scroll_to_index(50, Align::Start, &mut viewport);
    frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(scene.created(), 20);
    assert_eq!(scene.recycled_len(), 10);
    assert!(c.engine().element(0).is_none());
    assert!(c.engine().element(50).is_some());

    c.scroll_to_index(0, Align::Start, &mut viewport);
    frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(scene.created(), 20);
    assert_eq!(scene.recycled_len(), 10);
    assert!(c.engine().element(50).is_none());
    assert_eq!(scene.live().len(), 10);
    assert!(scene.live().iter().all(|e| (1000..1020).contains(e)));
    assert!(scene.pooled().is_empty());
}

#[test]
fn scene_without_template_leaves_holes_empty() {
    let engine = LayoutEngine::<u32>::with_elements(
        LayoutPolicy::default(),
        core::iter::repeat_n(None, 10),
    );
    let mut c = Controller::from_engine(engine);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);

    let events = frame(&mut c, &mut viewport, &mut scene);
    assert_eq!(viewport.content.main, 0.0);
    assert!(scene.live().is_empty());
    assert!(entered(&events).is_empty());
}

#[test]
fn normalized_scroll_conversions() {
    let mut c = controller(LayoutPolicy::default(), 100);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);
    frame(&mut c, &mut viewport, &mut scene);

    assert_eq!(c.normalized_position(1800.0, 400.0), 0.5);
    assert_eq!(c.offset_from_normalized(0.5, 400.0), 1800.0);
    assert_eq!(c.normalized_position(9000.0, 400.0), 1.0);
    assert_eq!(c.offset_from_normalized(f32::NAN, 400.0), 0.0);
    // Content that fits never scrolls.
    assert_eq!(c.normalized_position(100.0, 5000.0), 0.0);
}

#[test]
fn frame_reports_events_once() {
    let mut c = controller(LayoutPolicy::default(), 100);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);

    let mut events = Vec::new();
    assert!(c.frame(&mut viewport, &mut scene, |e| events.push(e)));
    assert!(events.contains(&LayoutEvent::ElementsReplaced));
    assert!(events.contains(&LayoutEvent::ContentReloaded));
    assert!(events.contains(&LayoutEvent::BeforeVisibleChange { previous: None }));
    assert!(events.contains(&LayoutEvent::VisibleChanged {
        window: Some(VisibleWindow::new(0, 9))
    }));
    assert!(!c.engine().has_pending_events());

    let mut again = Vec::new();
    assert!(!c.frame(&mut viewport, &mut scene, |e| again.push(e)));
    assert!(again.is_empty());
}

#[test]
fn on_scroll_ignores_small_moves() {
    let mut c = controller(LayoutPolicy::default(), 100);
    let mut scene = Scene::new(40.0);
    let mut viewport = SimViewport::new(400.0, 300.0);
    frame(&mut c, &mut viewport, &mut scene);

    assert!(!c.on_scroll(2.0));
    assert!(c.on_scroll(400.0));
    assert!(!c.on_scroll(402.0));
}

#[test]
fn sim_viewport_rebuild_clamps_offset() {
    let mut viewport = SimViewport::new(400.0, 300.0);
    viewport.content = scroll_layout::Extent::new(1000.0, 300.0);
    assert_eq!(viewport.scroll_by(250.0), 250.0);
    assert_eq!(viewport.scroll_by(1000.0), 600.0);

    viewport.content.main = 500.0;
    viewport.request_rebuild();
    assert_eq!(viewport.offset, 100.0);
    assert_eq!(viewport.rebuilds, 1);
}

#[test]
fn example_scene_scroll_smoke() {
    let mut c = controller(LayoutPolicy::default().with_spacing(4), 1000);
    let mut scene = Scene::new(36.0);
    for i in (0..1000).step_by(7) {
        scene.set_preferred_size(i, 72.0);
    }
    let mut viewport = SimViewport::new(480.0, 320.0);
    frame(&mut c, &mut viewport, &mut scene);

    for step in 0..40 {
        viewport.scroll_by(if step % 5 == 4 { -300.0 } else { 211.0 });
        c.on_scroll(viewport.offset);
        frame(&mut c, &mut viewport, &mut scene);
        let w = c.engine().visible_elements_index_range().expect("window");
        assert_eq!(scene.live().len(), w.len());
        assert!(scene.live().iter().all(|e| w.contains(*e as usize)));
        assert_eq!(scene.live().len() + scene.pooled().len(), 1000);
    }
}
