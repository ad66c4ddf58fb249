// Example: the full page flow — parse the feed, shape the cards, wire the
// appear engine, and simulate the first seconds of a visit.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use appear::{ElementId, ElementRect, SchedulerOptions, Viewport};
use portfolio::page::PageSession;
use portfolio::{disclosure, form, marquee, projects};

const FEED: &str = r#"{
  "updatedAt": "2024-03-03T10:00:00Z",
  "projects": [
    {
      "id": "inbox-zero",
      "name": "Inbox Zero",
      "status": "launched",
      "launchDate": "2024-02",
      "problem": "Email stacks up.",
      "links": [{ "href": "https://inboxzero.example.org", "label": "Visit", "kind": "primary" }]
    },
    { "name": "Tiny CRM", "status": "in progress", "oneLiner": "Spreadsheets stop scaling." },
    { "name": "Nightlight", "status": "paused" }
  ]
}"#;

fn main() {
    let view = projects::load_view(FEED, "https://example.com").expect("feed parses");
    println!("{}", view.meta_line);
    for card in &view.cards {
        println!(
            "  {} — {} [{}]{}",
            card.eyebrow,
            card.title,
            card.status.label,
            if card.full_width { " (full width)" } else { "" }
        );
    }

    let setup = marquee::plan(1_540.0, false).expect("first run");
    println!(
        "marquee: duplicate={} duration={}",
        setup.duplicate_track,
        marquee::duration_css_value(setup.duration_secs)
    );

    if let Some(req) = disclosure::on_load("#imprint") {
        println!("deep link opens {:?} ({:?})", req.panel, req.behavior);
    }

    // Wire the appear engine: meta line first, then one element per card.
    let rects: Arc<Mutex<HashMap<ElementId, ElementRect>>> = Arc::new(Mutex::new(HashMap::new()));
    let r = Arc::clone(&rects);
    let options = SchedulerOptions::new(move |id: &ElementId| r.lock().unwrap().get(id).copied())
        .with_viewport(Viewport::new(800.0, 600.0));
    let mut session = PageSession::new(options);

    let meta_id = session.allocate_ids(1).start;
    let card_ids: Vec<ElementId> = session.allocate_ids(view.cards.len()).collect();
    rects
        .lock()
        .unwrap()
        .insert(meta_id, ElementRect::from_top_left(80.0, 0.0, 640.0, 24.0));
    for (i, id) in card_ids.iter().enumerate() {
        rects.lock().unwrap().insert(
            *id,
            ElementRect::from_top_left(150.0 + 220.0 * i as f32, 0.0, 640.0, 200.0),
        );
    }
    session.register([meta_id]);
    session.register(card_ids);

    for now_ms in (0u64..=1_500).step_by(100) {
        let tick = session.tick(now_ms);
        if tick.started > 0 {
            println!("t={now_ms}ms: {} element(s) start appearing", tick.started);
        }
        for id in session.drain_unobserve() {
            println!("t={now_ms}ms: element {id} animating, unobserved");
        }
    }

    // And a form submission for good measure.
    let outcome = form::submit(
        &form::IdeaForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            problem: "Ship faster.".to_string(),
            ok_to_contact: true,
            company: String::new(),
        },
        chrono::Utc::now(),
    );
    if let form::SubmitOutcome::Accepted { preview, .. } = outcome {
        println!("--\n{preview}");
    }
}
