//! Idea-form validation and submission shaping.
//!
//! The form posts to its configured action; this module decides whether the
//! platform should let that happen and what to show while it does.

use chrono::{DateTime, SecondsFormat, Utc};

pub const STATUS_SUBMITTING: &str = "Submitting…";
pub const STATUS_MISSING: &str = "Please fill in all required fields (name, email, idea).";
pub const STATUS_TRAPPED: &str = "Thanks! (Submission received.)";

/// Raw field values captured from the idea form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdeaForm {
    pub name: String,
    pub email: String,
    /// The idea text (the form field is named `problem`).
    pub problem: String,
    pub ok_to_contact: bool,
    /// Honeypot field; humans leave it empty.
    pub company: String,
}

/// Result of a submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Let the platform submit the form, showing the preview meanwhile.
    Accepted {
        status: &'static str,
        preview: String,
    },
    /// Block the submission and ask for the missing fields.
    MissingFields { status: &'static str },
    /// Honeypot tripped: block the submission but pretend it succeeded, and
    /// clear the form.
    Trapped { status: &'static str },
}

pub fn submit(form: &IdeaForm, submitted_at: DateTime<Utc>) -> SubmitOutcome {
    if !form.company.trim().is_empty() {
        tracing::debug!("honeypot tripped, dropping submission");
        return SubmitOutcome::Trapped {
            status: STATUS_TRAPPED,
        };
    }

    let name = form.name.trim();
    let email = form.email.trim();
    let idea = form.problem.trim();
    if name.is_empty() || email.is_empty() || idea.is_empty() {
        return SubmitOutcome::MissingFields {
            status: STATUS_MISSING,
        };
    }

    SubmitOutcome::Accepted {
        status: STATUS_SUBMITTING,
        preview: build_submission(name, email, idea, form.ok_to_contact, submitted_at),
    }
}

/// The plain-text block previewed to the user and carried by the submission.
pub fn build_submission(
    name: &str,
    email: &str,
    idea: &str,
    ok_to_contact: bool,
    submitted_at: DateTime<Utc>,
) -> String {
    let stamp = submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut lines = vec![
        "Business Idea Submission".to_string(),
        "========================".to_string(),
        String::new(),
        format!("Name: {name}"),
        format!("Email: {email}"),
        format!(
            "Okay to contact: {}",
            if ok_to_contact { "Yes" } else { "No" }
        ),
        String::new(),
        "Idea".to_string(),
        "----".to_string(),
        idea.to_string(),
    ];
    lines.push(String::new());
    lines.push(format!("Submitted: {stamp}"));
    lines.join("\n")
}
