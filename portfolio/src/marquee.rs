//! Setup plan for the horizontally scrolling startup-logo marquee.

/// Scroll speed the duration is derived from; lower reads slower.
pub const PX_PER_SECOND: f32 = 55.0;

const MIN_DURATION_SECS: f32 = 18.0;
const MAX_DURATION_SECS: f32 = 48.0;
const FALLBACK_DURATION_SECS: f32 = 28.0;

/// One-time setup work for the marquee.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarqueeSetup {
    /// The track is cloned once so the loop is seamless. The clone must be
    /// aria-hidden with image alts cleared, so screen readers announce each
    /// logo once.
    pub duplicate_track: bool,
    pub duration_secs: f32,
}

/// Computes the marquee setup, or `None` when it already ran — the marquee
/// initializes at most once per page.
pub fn plan(track_width_px: f32, already_ready: bool) -> Option<MarqueeSetup> {
    if already_ready {
        return None;
    }
    Some(MarqueeSetup {
        duplicate_track: true,
        duration_secs: duration_secs(track_width_px),
    })
}

/// Duration scaled to track width so speed feels consistent across
/// viewports.
pub fn duration_secs(track_width_px: f32) -> f32 {
    let raw = if track_width_px > 0.0 {
        track_width_px / PX_PER_SECOND
    } else {
        FALLBACK_DURATION_SECS
    };
    raw.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
}

/// CSS custom-property value for the duration, e.g. `28.00s`.
pub fn duration_css_value(secs: f32) -> String {
    format!("{secs:.2}s")
}
