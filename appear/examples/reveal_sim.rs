// Example: driver-simulated scrolling (elements appear as they enter view).
use std::sync::{Arc, Mutex};

use appear::{AppearScheduler, ElementRect, SchedulerOptions, Viewport};

fn main() {
    // A 6000px document with a block every 300px; ids follow document order.
    const BLOCKS: u64 = 20;
    let scroll = Arc::new(Mutex::new(0.0f32));

    let scroll_for_rects = Arc::clone(&scroll);
    let options = SchedulerOptions::new(move |id: &u64| {
        let doc_top = 300.0 * *id as f32;
        let offset = *scroll_for_rects.lock().unwrap();
        Some(ElementRect::from_top_left(doc_top - offset, 0.0, 640.0, 120.0))
    })
    .with_viewport(Viewport::new(800.0, 600.0));

    let mut scheduler = AppearScheduler::new(options);
    scheduler.register(0..BLOCKS);

    let mut now_ms = 0u64;
    loop {
        // Simulate a 60fps tick with the user scrolling 40px per frame.
        now_ms += 16;
        *scroll.lock().unwrap() += 40.0;
        scheduler.notify_scroll_event();

        let tick = scheduler.tick(now_ms);
        if tick.started > 0 {
            println!(
                "t={now_ms}ms scroll={:.0}px: started {}, pending {}",
                scroll.lock().unwrap(),
                tick.started,
                scheduler.pending_len()
            );
        }

        if scheduler.pending_len() == 0 && tick.animating == 0 {
            break;
        }
    }

    println!("all {BLOCKS} blocks revealed by t={now_ms}ms");
}
