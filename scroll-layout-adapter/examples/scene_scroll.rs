use scroll_layout::{LayoutEngine, LayoutEvent, LayoutPolicy};
use scroll_layout_adapter::{Align, Controller, Scene, SimViewport};

fn main() {
    // Example: a headless scene driven frame by frame.
    //
    // A real host would:
    // - forward scroll notifications from its scroll container to `on_scroll`
    // - call `frame` once per frame with its element tree and scroll container
    // - react to visibility events (start loading images, stop animations, ...)
    let engine = LayoutEngine::with_elements(
        LayoutPolicy::default().with_spacing(4),
        (0..5_000u32).map(Some),
    );
    let mut c = Controller::from_engine(engine);
    let mut scene = Scene::<u32>::new(48.0);
    for i in (0..5_000).step_by(10) {
        scene.set_preferred_size(i, 96.0);
    }
    let mut viewport = SimViewport::new(600.0, 360.0);

    c.frame(&mut viewport, &mut scene, |_| {});
    println!(
        "content={} live={} pooled={}",
        viewport.content.main,
        scene.live().len(),
        scene.pooled().len()
    );

    for _ in 0..10 {
        let offset = viewport.scroll_by(180.0);
        c.on_scroll(offset);
        let mut entered = 0;
        c.frame(&mut viewport, &mut scene, |e| {
            if matches!(e, LayoutEvent::ElementBecameVisible { .. }) {
                entered += 1;
            }
        });
        println!(
            "offset={offset} window={:?} entered={entered}",
            c.engine().visible_elements_index_range()
        );
    }

    let jumped = c.scroll_to_index(2_500, Align::Center, &mut viewport);
    c.frame(&mut viewport, &mut scene, |_| {});
    println!(
        "jump to 2500: offset={jumped:?} live={:?}",
        scene.live()
    );
}
