// Example: an observer-backed host loop driving the controller.
use std::sync::{Arc, Mutex};

use appear::{ElementRect, SchedulerOptions, Viewport};
use appear_adapter::{Controller, VisibilityMode};

fn main() {
    // Document-space layout; rects are derived from the scroll offset.
    const SECTIONS: u64 = 12;
    let scroll = Arc::new(Mutex::new(0.0f32));

    let scroll_for_rects = Arc::clone(&scroll);
    let options = SchedulerOptions::new(move |id: &u64| {
        let doc_top = 260.0 * *id as f32;
        let offset = *scroll_for_rects.lock().unwrap();
        Some(ElementRect::from_top_left(doc_top - offset, 0.0, 640.0, 200.0))
    })
    .with_viewport(Viewport::new(800.0, 600.0));

    let mut controller = Controller::new(options);
    if let VisibilityMode::Observer { threshold } = controller.visibility_mode() {
        println!("observer threshold: {threshold}");
    }

    let observed = controller.register(0..SECTIONS);
    println!("observing {} sections", observed.len());

    let mut now_ms = 0u64;
    while !controller.is_idle() {
        now_ms += 16;
        *scroll.lock().unwrap() += 24.0;

        // A real host would receive observer entries here; the simulation
        // reports every scroll frame as both signals.
        controller.on_intersection();
        controller.on_scroll();

        let tick = controller.tick(now_ms);
        for id in controller.drain_unobserve() {
            println!("t={now_ms}ms: unobserve section {id} ({} running)", tick.animating);
        }
    }

    println!("page fully revealed at t={now_ms}ms");
}
