use scroll_layout::{LayoutEngine, LayoutPolicy};
use scroll_layout_adapter::{Align, Controller, Scene, SimViewport};

fn main() {
    // Example: a list of empty slots filled from a template.
    //
    // Slots entering the window get an element from the scene; slots leaving it hand the element
    // back, and the scene reuses it for the next slot that needs one.
    let engine = LayoutEngine::<String>::with_elements(
        LayoutPolicy::default(),
        core::iter::repeat_n(None, 10_000),
    );
    let mut c = Controller::from_engine(engine);
    let mut scene = Scene::new(32.0).with_template(|serial| format!("row-{serial}"));
    let mut viewport = SimViewport::new(320.0, 240.0);

    c.frame(&mut viewport, &mut scene, |_| {});
    for target in [100, 5_000, 9_999, 0] {
        c.scroll_to_index(target, Align::Start, &mut viewport);
        c.frame(&mut viewport, &mut scene, |_| {});
        println!(
            "target={target} window={:?} created={} recycled={}",
            c.engine().visible_elements_index_range(),
            scene.created(),
            scene.recycled_len()
        );
    }
}
