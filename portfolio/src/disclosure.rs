//! Collapsible panels and their deep links.
//!
//! One small state machine covers both footer panels and the per-card
//! details disclosure; the deep-link helpers decide which panel a location
//! hash or in-page link refers to and how the page should get there.

/// Open/closed state of a disclosure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
}

impl Disclosure {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Flips the state and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Value for the toggle's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Value for the panel's `aria-hidden` attribute.
    pub fn aria_hidden(&self) -> &'static str {
        if self.open { "false" } else { "true" }
    }

    /// Whether the panel carries the `hidden` attribute.
    pub fn panel_hidden(&self) -> bool {
        !self.open
    }
}

/// The two deep-linkable footer panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelId {
    Imprint,
    DataPolicy,
}

impl PanelId {
    /// Canonical location hash for the panel.
    pub fn hash(self) -> &'static str {
        match self {
            Self::Imprint => "#imprint-panel",
            Self::DataPolicy => "#data-policy-panel",
        }
    }

    /// `data-open-panel` attribute value used by in-page links.
    pub fn link_target(self) -> &'static str {
        match self {
            Self::Imprint => "imprint",
            Self::DataPolicy => "data-policy",
        }
    }
}

/// How the page scrolls a panel into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    /// Instant, mirroring native anchor navigation.
    Auto,
}

/// A decision to open a panel, with how to get there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenRequest {
    pub panel: PanelId,
    pub behavior: ScrollBehavior,
    /// Hash to push onto the history, when the location does not already
    /// carry it.
    pub push_hash: Option<&'static str>,
}

/// Resolves a location hash to the panel it deep-links to. Both the panel id
/// and the shorthand form are accepted, case-insensitively.
pub fn panel_for_hash(hash: &str) -> Option<PanelId> {
    match hash.to_lowercase().as_str() {
        "#imprint-panel" | "#imprint" => Some(PanelId::Imprint),
        "#data-policy-panel" | "#data-policy" => Some(PanelId::DataPolicy),
        _ => None,
    }
}

/// Deep-link handling on page load: instant scroll, no history entry.
pub fn on_load(hash: &str) -> Option<OpenRequest> {
    panel_for_hash(hash).map(|panel| OpenRequest {
        panel,
        behavior: ScrollBehavior::Auto,
        push_hash: None,
    })
}

/// In-page panel-link clicks: smooth scroll, pushing the canonical hash when
/// the location does not already carry it.
pub fn on_link_click(link_target: &str, current_hash: &str) -> Option<OpenRequest> {
    let panel = match link_target {
        "imprint" => PanelId::Imprint,
        "data-policy" => PanelId::DataPolicy,
        _ => return None,
    };
    Some(OpenRequest {
        panel,
        behavior: ScrollBehavior::Smooth,
        push_hash: (current_hash != panel.hash()).then(|| panel.hash()),
    })
}
