// Example: minimal usage with a fixed layout.
use std::collections::HashMap;

use appear::{AppearScheduler, ElementRect, ElementStyle, SchedulerOptions, Viewport};

fn main() {
    // Six stacked blocks, ids assigned in document order.
    let mut rects = HashMap::new();
    for id in 0u64..6 {
        rects.insert(
            id,
            ElementRect::from_top_left(120.0 * id as f32, 0.0, 640.0, 100.0),
        );
    }

    let options = SchedulerOptions::new(move |id: &u64| rects.get(id).copied())
        .with_viewport(Viewport::new(800.0, 600.0))
        .with_apply_style(Some(|id: &u64, style: ElementStyle| match style {
            ElementStyle::Hidden { .. } => println!("element {id}: hidden, waiting"),
            ElementStyle::Rest => println!("element {id}: at rest"),
            ElementStyle::Step { .. } => {}
        }));

    let mut scheduler = AppearScheduler::new(options);
    scheduler.register(0u64..6);

    // Simulate a 10fps host loop.
    for now_ms in (0u64..=2_000).step_by(100) {
        let tick = scheduler.tick(now_ms);
        if tick.started > 0 {
            println!("t={now_ms}ms: started {} transition(s)", tick.started);
        }
    }
    println!(
        "pending={} animating={}",
        scheduler.pending_len(),
        scheduler.animating_len()
    );
}
