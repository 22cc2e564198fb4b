// Example: a short list centred inside a minimum content size.
use scroll_layout::{
    Axis, ElementHost, Extent, LayoutEngine, LayoutPolicy, MinContentAlign, Placement,
    ScrollViewport,
};

struct Cards;

impl ElementHost<&'static str> for Cards {
    fn preferred_size(&mut self, _card: &&'static str, _axis: Axis) -> f32 {
        100.0
    }

    fn materialized_size(&self, _card: &&'static str, _axis: Axis) -> Option<f32> {
        None
    }

    fn attach(&mut self, card: &&'static str, placement: &Placement) {
        println!("{card}: {:?} anchored {:?}", placement.position, placement.anchor);
    }

    fn park(&mut self, _card: &&'static str, _disable: bool) {}
}

struct Fixed(Extent);

impl ScrollViewport for Fixed {
    fn scroll_offset(&self) -> f32 {
        0.0
    }

    fn viewport_extent(&self) -> Extent {
        Extent::new(400.0, 200.0)
    }

    fn set_content_extent(&mut self, extent: Extent) {
        self.0 = extent;
    }

    fn request_rebuild(&mut self) {}
}

fn main() {
    let policy = LayoutPolicy::default()
        .with_auto_minimum_from_viewport(true)
        .with_minimum_content_size_align(MinContentAlign::Middle);
    let mut engine =
        LayoutEngine::with_elements(policy, ["alpha", "beta", "gamma"].map(Some));
    let mut viewport = Fixed(Extent::default());

    engine.tick(&mut viewport, &mut Cards);
    println!("content={:?}", viewport.0);
    for i in 0..engine.len() {
        println!("position[{i}]={:?}", engine.cached_element_position(i));
    }
}
