//! The projects feed: wire model, tolerant field access, and the copy shown
//! around the project list.
//!
//! The feed is a static JSON document; every field is optional so a partially
//! filled entry still renders. Older feeds used `oneLiner`/`whatImTesting`
//! where newer ones use `problem`/`hypothesis`; both are accepted.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cards::{build_cards, CardModel};
use crate::Result;

/// Copy shown when the feed loads but contains no projects.
pub const EMPTY_TEXT: &str = "No projects found.";
/// Copy shown when the feed cannot be loaded at all.
pub const LOAD_ERROR_TEXT: &str = "Couldn’t load projects right now.";

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectsDocument {
    pub updated_at: Option<String>,
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub launch_date: Option<String>,
    pub thumbnail: Option<String>,
    pub problem: Option<String>,
    /// Legacy feed name for `problem`.
    pub one_liner: Option<String>,
    pub hypothesis: Option<String>,
    /// Legacy feed name for `hypothesis`.
    pub what_im_testing: Option<String>,
    pub details: Option<String>,
    pub gradient: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub href: Option<String>,
    pub label: Option<String>,
    pub kind: Option<String>,
}

impl Project {
    /// The one-line summary, preferring the current field over the legacy
    /// one.
    pub fn summary(&self) -> Option<&str> {
        non_empty(self.problem.as_deref()).or_else(|| non_empty(self.one_liner.as_deref()))
    }

    /// The hypothesis copy, preferring the current field over the legacy one.
    pub fn hypothesis_text(&self) -> Option<&str> {
        non_empty(self.hypothesis.as_deref())
            .or_else(|| non_empty(self.what_im_testing.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_projects(json: &str) -> Result<ProjectsDocument> {
    let doc: ProjectsDocument = serde_json::from_str(json)?;
    tracing::debug!(projects = doc.projects.len(), "parsed projects feed");
    Ok(doc)
}

/// The "Updated Mar 03, 2024 · 7 builds" line above the project list.
pub fn meta_line(doc: &ProjectsDocument) -> String {
    let count = doc.projects.len();
    match doc.updated_at.as_deref().and_then(format_updated_at) {
        Some(date) => format!("Updated {date} · {count} builds"),
        None => format!("{count} builds"),
    }
}

/// Formats an ISO timestamp or plain date as e.g. `Mar 03, 2024`. Unparseable
/// input yields `None` and the caller drops the date from its copy.
pub fn format_updated_at(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let date = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%b %d, %Y").to_string())
}

/// Formats a date as e.g. `Mar 2024`. `YYYY-MM` input is normalized to the
/// first of the month.
pub fn format_month_year(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = if is_year_month(s) {
        format!("{s}-01")
    } else {
        s.to_string()
    };
    let date = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(&normalized).map(|dt| dt.date_naive()))
        .ok()?;
    Some(date.format("%b %Y").to_string())
}

fn is_year_month(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 7
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..].iter().all(u8::is_ascii_digit)
}

/// Title-cases a status value (`"launched"` → `"Launched"`).
pub fn title_case_status(raw: &str) -> Option<String> {
    let s = raw.trim().to_lowercase();
    let mut chars = s.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Normalizes a status to a css-friendly key (`"In Progress"` →
/// `"in-progress"`).
pub fn status_key(raw: &str) -> Option<String> {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }
    Some(s.split_whitespace().collect::<Vec<_>>().join("-"))
}

/// Everything the platform needs to render the projects section.
#[derive(Clone, Debug)]
pub struct ProjectsView {
    pub meta_line: String,
    pub cards: Vec<CardModel>,
}

/// Parses the feed and shapes it for rendering. `origin` is the page origin
/// (e.g. `https://example.com`) used to classify links as external.
pub fn load_view(json: &str, origin: &str) -> Result<ProjectsView> {
    let doc = parse_projects(json)?;
    Ok(ProjectsView {
        meta_line: meta_line(&doc),
        cards: build_cards(&doc.projects, origin),
    })
}
