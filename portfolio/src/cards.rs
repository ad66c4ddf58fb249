//! Render-ready project card models.
//!
//! The platform turns each [`CardModel`] into DOM nodes one-to-one; all
//! content decisions (numbering, fallbacks, link classification, layout
//! flags) are made here.

use crate::projects::{format_month_year, status_key, title_case_status, Project};

/// A fully resolved model of one project card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardModel {
    /// "Product MVP Build 01" line above the title.
    pub eyebrow: String,
    pub title: String,
    pub summary: Option<String>,
    pub status: StatusBadge,
    /// Launch month label; present only for launched projects.
    pub launch_date: Option<String>,
    /// CSS gradient overriding the card accent.
    pub accent: Option<String>,
    pub thumbnail: Option<Thumbnail>,
    /// DOM id of the collapsible details panel.
    pub details_id: String,
    pub hypothesis: Option<String>,
    /// Trusted HTML fragment from the feed.
    pub details_html: Option<String>,
    pub actions: Vec<CardLink>,
    /// The first card renders full width with feature treatment.
    pub feature: bool,
    /// Set on the last card when it would otherwise sit alone in its row.
    pub full_width: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusBadge {
    pub label: String,
    /// Kebab-case modifier key for styling (`in-progress`, `launched`, ...).
    pub key: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    pub src: String,
    pub alt: String,
    /// Wrapping link, when the project has a usable one.
    pub link: Option<CardLink>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardLink {
    pub href: String,
    pub label: String,
    pub primary: bool,
    /// External links open in a new tab with `noopener noreferrer`.
    pub external: bool,
}

pub fn build_cards(projects: &[Project], origin: &str) -> Vec<CardModel> {
    let mut cards: Vec<CardModel> = projects
        .iter()
        .enumerate()
        .map(|(index, project)| build_card(project, index, origin))
        .collect();

    // The first card is full width; if that leaves the last row with a single
    // card, widen that one as well.
    if cards.len() > 1 && cards.len() % 2 == 0 {
        if let Some(last) = cards.last_mut() {
            last.full_width = true;
        }
    }

    tracing::debug!(cards = cards.len(), "built project cards");
    cards
}

fn build_card(project: &Project, index: usize, origin: &str) -> CardModel {
    let status = match project.status.as_deref().and_then(title_case_status) {
        Some(label) => StatusBadge {
            key: project
                .status
                .as_deref()
                .and_then(status_key)
                .unwrap_or_else(|| "unknown".to_string()),
            label,
        },
        None => StatusBadge {
            label: "TBD".to_string(),
            key: "unknown".to_string(),
        },
    };

    let launch_date = (status.key == "launched")
        .then(|| project.launch_date.as_deref().and_then(format_month_year))
        .flatten();

    CardModel {
        eyebrow: eyebrow(index),
        title: project
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Untitled")
            .to_string(),
        summary: project.summary().map(str::to_string),
        status,
        launch_date,
        accent: project
            .gradient
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        thumbnail: thumbnail(project, origin),
        details_id: details_id(index, project.id.as_deref()),
        hypothesis: project.hypothesis_text().map(str::to_string),
        details_html: project
            .details
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        actions: build_actions(project, origin),
        feature: index == 0,
        full_width: false,
    }
}

/// "Product MVP Build NN", numbered from the top of the feed.
pub fn eyebrow(index: usize) -> String {
    format!("Product MVP Build {:02}", index + 1)
}

/// DOM id for a card's details panel. The index keeps ids unique even when
/// project ids are duplicated or missing; anything outside `[A-Za-z0-9_-]`
/// becomes `-`.
pub fn details_id(index: usize, project_id: Option<&str>) -> String {
    let id = project_id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("project");
    format!("build-details-{index}-{id}")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Label for the card's expand/collapse control.
pub fn toggle_label(expanded: bool) -> &'static str {
    if expanded { "Less" } else { "View Build" }
}

fn build_actions(project: &Project, origin: &str) -> Vec<CardLink> {
    let mut actions = Vec::new();
    for link in &project.links {
        let Some(href) = usable_href(link.href.as_deref()) else {
            continue;
        };
        let label = link
            .label
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Open");
        actions.push(CardLink {
            external: is_external_href(href, origin),
            href: href.to_string(),
            label: label.to_string(),
            primary: link_kind(link.kind.as_deref()) == "primary",
        });
    }
    actions
}

fn thumbnail(project: &Project, origin: &str) -> Option<Thumbnail> {
    let src = project
        .thumbnail
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    let (alt, open_label) = match project.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    {
        Some(name) => (format!("{name} thumbnail"), format!("Open {name}")),
        None => ("Project thumbnail".to_string(), "Open project".to_string()),
    };

    // Prefer the primary link for the thumbnail target, falling back to the
    // first link.
    let href = project
        .links
        .iter()
        .find(|l| link_kind(l.kind.as_deref()) == "primary")
        .or_else(|| project.links.first())
        .and_then(|l| usable_href(l.href.as_deref()));

    Some(Thumbnail {
        src: src.to_string(),
        alt,
        link: href.map(|href| CardLink {
            external: is_external_href(href, origin),
            href: href.to_string(),
            label: open_label,
            primary: false,
        }),
    })
}

fn usable_href(href: Option<&str>) -> Option<&str> {
    href.map(str::trim).filter(|s| !s.is_empty() && *s != "#")
}

fn link_kind(kind: Option<&str>) -> String {
    kind.unwrap_or("").trim().to_lowercase()
}

/// Whether `href` resolves outside the page origin (scheme + authority).
///
/// Relative URLs and same-origin absolute URLs are internal; protocol-
/// relative URLs inherit the page scheme before comparison.
pub fn is_external_href(href: &str, origin: &str) -> bool {
    let Some(page) = origin_of(origin) else {
        return false;
    };
    if let Some(rest) = href.strip_prefix("//") {
        let scheme = page.split("://").next().unwrap_or("https");
        return origin_of(&format!("{scheme}://{rest}")).is_some_and(|o| o != page);
    }
    if let Some(target) = origin_of(href) {
        return target != page;
    }
    // Scheme-only URLs (mailto:, tel:) leave the page origin too.
    has_scheme(href)
}

fn has_scheme(url: &str) -> bool {
    let mut chars = url.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return false,
        }
    }
    false
}

fn origin_of(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    if authority.is_empty() {
        return None;
    }
    Some(format!(
        "{}://{}",
        scheme.to_ascii_lowercase(),
        authority.to_ascii_lowercase()
    ))
}
