// Example: a fixed-size list driven by a minimal host.
use scroll_layout::{
    Axis, ElementHost, Extent, LayoutEngine, LayoutEvent, LayoutPolicy, Placement,
    ScrollViewport,
};

struct Rows {
    attached: usize,
}

impl ElementHost<u32> for Rows {
    fn preferred_size(&mut self, _row: &u32, _axis: Axis) -> f32 {
        50.0
    }

    fn materialized_size(&self, _row: &u32, _axis: Axis) -> Option<f32> {
        None
    }

    fn attach(&mut self, _row: &u32, _placement: &Placement) {
        self.attached += 1;
    }

    fn park(&mut self, _row: &u32, _disable: bool) {}
}

struct Viewport {
    offset: f32,
    content: f32,
}

impl ScrollViewport for Viewport {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn viewport_extent(&self) -> Extent {
        Extent::new(500.0, 320.0)
    }

    fn set_content_extent(&mut self, extent: Extent) {
        self.content = extent.main;
    }

    fn request_rebuild(&mut self) {
        self.offset = self.offset.clamp(0.0, (self.content - 500.0).max(0.0));
    }
}

fn main() {
    let mut engine = LayoutEngine::<u32>::with_elements(LayoutPolicy::default(), (0..1000).map(Some));
    let mut rows = Rows { attached: 0 };
    let mut viewport = Viewport {
        offset: 0.0,
        content: 0.0,
    };

    engine.tick(&mut viewport, &mut rows);
    println!("content={}", viewport.content);
    println!("window={:?}", engine.visible_elements_index_range());

    viewport.offset = 275.0;
    engine.on_scroll_changed(viewport.offset);
    engine.tick(&mut viewport, &mut rows);
    let entered = engine
        .drain_events()
        .filter(|e| matches!(e, LayoutEvent::ElementBecameVisible { .. }))
        .count();
    println!(
        "after scroll: window={:?} entered={} attach_calls={}",
        engine.visible_elements_index_range(),
        entered,
        rows.attached
    );
}
