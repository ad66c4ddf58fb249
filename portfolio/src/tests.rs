use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use appear::{ElementId, ElementRect, SchedulerOptions, Viewport};
use chrono::{DateTime, Utc};

use crate::cards::{self, CardLink};
use crate::disclosure::{self, Disclosure, OpenRequest, PanelId, ScrollBehavior};
use crate::form::{self, IdeaForm, SubmitOutcome};
use crate::marquee;
use crate::page::PageSession;
use crate::projects::{self, Project};

const ORIGIN: &str = "https://example.com";

const FEED: &str = r##"{
  "updatedAt": "2024-03-03T10:00:00Z",
  "projects": [
    {
      "id": "inbox-zero",
      "name": "Inbox Zero",
      "status": "launched",
      "launchDate": "2024-02",
      "thumbnail": "img/inbox.png",
      "problem": "Email stacks up.",
      "hypothesis": "People pay for peace of mind.",
      "details": "Built in <strong>six weeks</strong>.",
      "gradient": "linear-gradient(90deg, #f00, #00f)",
      "links": [
        { "href": "https://inboxzero.example.org", "label": "Visit", "kind": "primary" },
        { "href": "/notes/inbox-zero", "label": "Notes" },
        { "href": "#", "label": "Dead" }
      ]
    },
    {
      "name": "Tiny CRM",
      "status": "in progress",
      "oneLiner": "Spreadsheets stop scaling.",
      "whatImTesting": "Solo founders want less, not more.",
      "links": []
    },
    {}
  ]
}"##;

fn stamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-07T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

// --- projects feed ---

#[test]
fn feed_parses_with_aliases_and_missing_fields() {
    let doc = projects::parse_projects(FEED).unwrap();
    assert_eq!(doc.projects.len(), 3);

    let first = &doc.projects[0];
    assert_eq!(first.summary(), Some("Email stacks up."));
    assert_eq!(first.hypothesis_text(), Some("People pay for peace of mind."));

    // Legacy field names feed the same accessors.
    let second = &doc.projects[1];
    assert_eq!(second.summary(), Some("Spreadsheets stop scaling."));
    assert_eq!(
        second.hypothesis_text(),
        Some("Solo founders want less, not more.")
    );

    // A completely empty project is still a project.
    let third = &doc.projects[2];
    assert_eq!(third.summary(), None);
    assert!(third.links.is_empty());
}

#[test]
fn feed_rejects_structurally_broken_json() {
    assert!(projects::parse_projects("{").is_err());
    assert!(projects::parse_projects(r#"{"projects": 3}"#).is_err());
}

#[test]
fn meta_line_includes_date_when_parseable() {
    let doc = projects::parse_projects(FEED).unwrap();
    assert_eq!(projects::meta_line(&doc), "Updated Mar 03, 2024 · 3 builds");

    let mut doc = doc;
    doc.updated_at = Some("not a date".to_string());
    assert_eq!(projects::meta_line(&doc), "3 builds");
    doc.updated_at = None;
    assert_eq!(projects::meta_line(&doc), "3 builds");
}

#[test]
fn date_formatting() {
    assert_eq!(
        projects::format_updated_at("2024-03-03T10:00:00Z").as_deref(),
        Some("Mar 03, 2024")
    );
    assert_eq!(
        projects::format_updated_at("2024-12-01").as_deref(),
        Some("Dec 01, 2024")
    );
    assert_eq!(projects::format_updated_at(""), None);
    assert_eq!(projects::format_updated_at("soon"), None);

    // YYYY-MM is normalized to the first of the month.
    assert_eq!(
        projects::format_month_year("2024-02").as_deref(),
        Some("Feb 2024")
    );
    assert_eq!(
        projects::format_month_year("2024-02-15").as_deref(),
        Some("Feb 2024")
    );
    assert_eq!(projects::format_month_year("02-2024"), None);
}

#[test]
fn status_normalization() {
    assert_eq!(
        projects::title_case_status("launched").as_deref(),
        Some("Launched")
    );
    assert_eq!(
        projects::title_case_status("  IN PROGRESS ").as_deref(),
        Some("In progress")
    );
    assert_eq!(projects::title_case_status("   "), None);

    assert_eq!(
        projects::status_key("In Progress").as_deref(),
        Some("in-progress")
    );
    assert_eq!(projects::status_key(" launched ").as_deref(), Some("launched"));
    assert_eq!(projects::status_key(""), None);
}

// --- cards ---

#[test]
fn cards_number_from_the_top_of_the_feed() {
    let doc = projects::parse_projects(FEED).unwrap();
    let cards = cards::build_cards(&doc.projects, ORIGIN);
    assert_eq!(cards[0].eyebrow, "Product MVP Build 01");
    assert_eq!(cards[1].eyebrow, "Product MVP Build 02");
    assert_eq!(cards::eyebrow(9), "Product MVP Build 10");
}

#[test]
fn first_card_is_featured_and_lonely_last_card_goes_full_width() {
    let make = |n: usize| -> Vec<Project> {
        (0..n)
            .map(|i| Project {
                name: Some(format!("P{i}")),
                ..Project::default()
            })
            .collect()
    };

    let cards = cards::build_cards(&make(4), ORIGIN);
    assert!(cards[0].feature);
    assert!(!cards[1].feature);
    // First card spans the row, so an even count strands the last card.
    assert!(cards[3].full_width);
    assert!(!cards[2].full_width);

    let cards = cards::build_cards(&make(5), ORIGIN);
    assert!(!cards[4].full_width);

    // A single card never needs widening.
    let cards = cards::build_cards(&make(1), ORIGIN);
    assert!(!cards[0].full_width);
}

#[test]
fn card_title_and_status_fall_back() {
    let doc = projects::parse_projects(FEED).unwrap();
    let cards = cards::build_cards(&doc.projects, ORIGIN);

    let empty = &cards[2];
    assert_eq!(empty.title, "Untitled");
    assert_eq!(empty.status.label, "TBD");
    assert_eq!(empty.status.key, "unknown");
    assert_eq!(empty.launch_date, None);
    assert!(empty.thumbnail.is_none());
}

#[test]
fn launch_date_shows_only_for_launched_projects() {
    let doc = projects::parse_projects(FEED).unwrap();
    let cards = cards::build_cards(&doc.projects, ORIGIN);

    assert_eq!(cards[0].status.key, "launched");
    assert_eq!(cards[0].launch_date.as_deref(), Some("Feb 2024"));

    assert_eq!(cards[1].status.key, "in-progress");
    assert_eq!(cards[1].status.label, "In progress");
    assert_eq!(cards[1].launch_date, None);

    // A launch date on a non-launched project stays hidden.
    let project = Project {
        status: Some("paused".to_string()),
        launch_date: Some("2024-02".to_string()),
        ..Project::default()
    };
    let cards = cards::build_cards(&[project], ORIGIN);
    assert_eq!(cards[0].launch_date, None);
}

#[test]
fn actions_filter_dead_links_and_classify_external_ones() {
    let doc = projects::parse_projects(FEED).unwrap();
    let cards = cards::build_cards(&doc.projects, ORIGIN);

    // The "#" link is dropped.
    assert_eq!(
        cards[0].actions,
        [
            CardLink {
                href: "https://inboxzero.example.org".to_string(),
                label: "Visit".to_string(),
                primary: true,
                external: true,
            },
            CardLink {
                href: "/notes/inbox-zero".to_string(),
                label: "Notes".to_string(),
                primary: false,
                external: false,
            },
        ]
    );
    assert!(cards[1].actions.is_empty());
}

#[test]
fn thumbnail_prefers_the_primary_link() {
    let doc = projects::parse_projects(FEED).unwrap();
    let cards = cards::build_cards(&doc.projects, ORIGIN);

    let thumb = cards[0].thumbnail.as_ref().unwrap();
    assert_eq!(thumb.src, "img/inbox.png");
    assert_eq!(thumb.alt, "Inbox Zero thumbnail");
    let link = thumb.link.as_ref().unwrap();
    assert_eq!(link.href, "https://inboxzero.example.org");
    assert_eq!(link.label, "Open Inbox Zero");
    assert!(link.external);

    // Without a primary kind, the first usable link wins.
    let project = Project {
        name: Some("X".to_string()),
        thumbnail: Some("x.png".to_string()),
        links: vec![
            crate::projects::Link {
                href: Some("#".to_string()),
                ..Default::default()
            },
            crate::projects::Link {
                href: Some("/x".to_string()),
                ..Default::default()
            },
        ],
        ..Project::default()
    };
    let cards = cards::build_cards(&[project], ORIGIN);
    // "#" is the first link and unusable, so the thumbnail goes unlinked
    // rather than falling through to a later link.
    assert!(cards[0].thumbnail.as_ref().unwrap().link.is_none());
}

#[test]
fn details_ids_are_unique_and_sanitized() {
    assert_eq!(
        cards::details_id(0, Some("inbox-zero")),
        "build-details-0-inbox-zero"
    );
    assert_eq!(cards::details_id(3, None), "build-details-3-project");
    assert_eq!(cards::details_id(3, Some("")), "build-details-3-project");
    assert_eq!(
        cards::details_id(2, Some("My App! v2")),
        "build-details-2-My-App--v2"
    );
}

#[test]
fn external_href_detection() {
    assert!(!cards::is_external_href("/notes", ORIGIN));
    assert!(!cards::is_external_href("notes.html", ORIGIN));
    assert!(!cards::is_external_href("https://example.com/notes", ORIGIN));
    assert!(!cards::is_external_href("HTTPS://EXAMPLE.COM/notes", ORIGIN));
    assert!(cards::is_external_href("https://other.org", ORIGIN));
    assert!(cards::is_external_href("http://example.com", ORIGIN));

    // Protocol-relative URLs inherit the page scheme before comparison.
    assert!(!cards::is_external_href("//example.com/cdn.js", ORIGIN));
    assert!(cards::is_external_href("//cdn.other.org/cdn.js", ORIGIN));

    // Scheme-only URLs leave the page origin.
    assert!(cards::is_external_href("mailto:hi@example.com", ORIGIN));
}

#[test]
fn toggle_labels() {
    assert_eq!(cards::toggle_label(false), "View Build");
    assert_eq!(cards::toggle_label(true), "Less");
}

#[test]
fn load_view_combines_meta_and_cards() {
    let view = projects::load_view(FEED, ORIGIN).unwrap();
    assert_eq!(view.meta_line, "Updated Mar 03, 2024 · 3 builds");
    assert_eq!(view.cards.len(), 3);
    assert_eq!(view.cards[0].title, "Inbox Zero");
}

// --- form ---

#[test]
fn honeypot_pretends_success() {
    let form = IdeaForm {
        name: "A".to_string(),
        email: "a@b.c".to_string(),
        problem: "An idea".to_string(),
        company: "Totally Real LLC".to_string(),
        ..IdeaForm::default()
    };
    assert_eq!(
        form::submit(&form, stamp()),
        SubmitOutcome::Trapped {
            status: form::STATUS_TRAPPED
        }
    );
}

#[test]
fn missing_required_fields_block_submission() {
    let form = IdeaForm {
        name: "A".to_string(),
        email: "  ".to_string(),
        problem: "An idea".to_string(),
        ..IdeaForm::default()
    };
    assert_eq!(
        form::submit(&form, stamp()),
        SubmitOutcome::MissingFields {
            status: form::STATUS_MISSING
        }
    );
}

#[test]
fn accepted_submission_builds_the_preview_block() {
    let form = IdeaForm {
        name: " Ada ".to_string(),
        email: "ada@example.com".to_string(),
        problem: "Ship faster.".to_string(),
        ok_to_contact: true,
        company: String::new(),
    };
    let SubmitOutcome::Accepted { status, preview } = form::submit(&form, stamp()) else {
        panic!("expected acceptance");
    };
    assert_eq!(status, form::STATUS_SUBMITTING);
    assert_eq!(
        preview,
        "Business Idea Submission\n\
         ========================\n\
         \n\
         Name: Ada\n\
         Email: ada@example.com\n\
         Okay to contact: Yes\n\
         \n\
         Idea\n\
         ----\n\
         Ship faster.\n\
         \n\
         Submitted: 2026-08-07T12:00:00.000Z"
    );
}

#[test]
fn declined_contact_renders_as_no() {
    let preview = form::build_submission("A", "a@b.c", "Idea", false, stamp());
    assert!(preview.contains("Okay to contact: No"));
}

// --- marquee ---

#[test]
fn marquee_duration_scales_with_width_and_clamps() {
    assert_eq!(marquee::duration_secs(1_540.0), 28.0);
    assert_eq!(marquee::duration_secs(100.0), 18.0);
    assert_eq!(marquee::duration_secs(1_000_000.0), 48.0);
    // Unknown width falls back to a mid-range duration.
    assert_eq!(marquee::duration_secs(0.0), 28.0);
    assert_eq!(marquee::duration_css_value(28.0), "28.00s");
}

#[test]
fn marquee_sets_up_at_most_once() {
    let setup = marquee::plan(1_100.0, false).unwrap();
    assert!(setup.duplicate_track);
    assert_eq!(setup.duration_secs, 20.0);
    assert_eq!(marquee::plan(1_100.0, true), None);
}

// --- disclosure panels ---

#[test]
fn disclosure_drives_aria_attributes() {
    let mut d = Disclosure::default();
    assert!(!d.is_open());
    assert_eq!(d.aria_expanded(), "false");
    assert_eq!(d.aria_hidden(), "true");
    assert!(d.panel_hidden());

    assert!(d.toggle());
    assert_eq!(d.aria_expanded(), "true");
    assert_eq!(d.aria_hidden(), "false");
    assert!(!d.panel_hidden());

    d.set_open(false);
    assert!(!d.is_open());
}

#[test]
fn hash_deep_links_resolve_case_insensitively() {
    assert_eq!(
        disclosure::panel_for_hash("#imprint-panel"),
        Some(PanelId::Imprint)
    );
    assert_eq!(disclosure::panel_for_hash("#IMPRINT"), Some(PanelId::Imprint));
    assert_eq!(
        disclosure::panel_for_hash("#data-policy"),
        Some(PanelId::DataPolicy)
    );
    assert_eq!(disclosure::panel_for_hash("#elsewhere"), None);
    assert_eq!(disclosure::panel_for_hash(""), None);
}

#[test]
fn load_time_deep_links_scroll_instantly_without_history() {
    assert_eq!(
        disclosure::on_load("#data-policy-panel"),
        Some(OpenRequest {
            panel: PanelId::DataPolicy,
            behavior: ScrollBehavior::Auto,
            push_hash: None,
        })
    );
    assert_eq!(disclosure::on_load("#other"), None);
}

#[test]
fn panel_link_clicks_push_the_canonical_hash_once() {
    let req = disclosure::on_link_click("imprint", "").unwrap();
    assert_eq!(req.panel, PanelId::Imprint);
    assert_eq!(req.behavior, ScrollBehavior::Smooth);
    assert_eq!(req.push_hash, Some("#imprint-panel"));

    // Already on the canonical hash: open without a new history entry.
    let req = disclosure::on_link_click("data-policy", "#data-policy-panel").unwrap();
    assert_eq!(req.push_hash, None);

    assert_eq!(disclosure::on_link_click("newsletter", ""), None);
}

// --- page wiring ---

#[test]
fn page_session_staggers_cards_top_to_bottom() {
    let rects: Arc<Mutex<HashMap<ElementId, ElementRect>>> =
        Arc::new(Mutex::new(HashMap::new()));
    let r = Arc::clone(&rects);
    let options = SchedulerOptions::new(move |id: &ElementId| r.lock().unwrap().get(id).copied())
        .with_viewport(Viewport::new(800.0, 600.0));
    let mut session = PageSession::new(options);

    let view = projects::load_view(FEED, ORIGIN).unwrap();
    let meta_id = session.allocate_ids(1).start;
    let card_ids: Vec<ElementId> = session.allocate_ids(view.cards.len()).collect();

    // The platform attaches the meta line at 80px and a card every 260px
    // below it, then registers in document order.
    rects
        .lock()
        .unwrap()
        .insert(meta_id, ElementRect::from_top_left(80.0, 0.0, 640.0, 24.0));
    for (i, id) in card_ids.iter().enumerate() {
        rects.lock().unwrap().insert(
            *id,
            ElementRect::from_top_left(150.0 + 260.0 * i as f32, 0.0, 640.0, 240.0),
        );
    }

    assert_eq!(session.register([meta_id]), [meta_id]);
    assert_eq!(session.register(card_ids.clone()), card_ids);

    session.tick(0);
    let scheduler = session.controller().scheduler();
    assert!(scheduler.is_animated(&meta_id));
    assert_eq!(scheduler.scheduled_at(&card_ids[0]), Some(100));
    assert_eq!(scheduler.scheduled_at(&card_ids[1]), Some(200));
    // The third card starts at 670px, below the fold: no timer until it
    // scrolls into view.
    assert_eq!(scheduler.scheduled_at(&card_ids[2]), None);

    assert_eq!(session.drain_unobserve(), [meta_id]);

    // Scrolling moves everything up 300px; the third card enters the
    // viewport and joins the schedule.
    {
        let mut table = rects.lock().unwrap();
        for rect in table.values_mut() {
            rect.top -= 300.0;
            rect.bottom -= 300.0;
        }
    }
    session.on_scroll();
    session.tick(150);
    let scheduler = session.controller().scheduler();
    assert!(scheduler.is_animated(&card_ids[0]));
    assert!(scheduler.scheduled_at(&card_ids[2]).is_some());
}
