/// Easing curves supported by the appear transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Cubic ease-out: fast start, gentle landing.
    EaseOut,
    Linear,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::EaseOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::Linear => t,
        }
    }
}

/// A two-property tween from an offset, faded state to rest.
///
/// `offset_y` interpolates `from_offset_y → 0` and `opacity`
/// `from_opacity → 1` over `duration_ms` using `easing`. The tween is pure
/// state; the scheduler samples it with explicit `now_ms` timestamps.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from_offset_y: f32,
    pub from_opacity: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(
        from_offset_y: f32,
        from_opacity: f32,
        start_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            from_offset_y,
            from_opacity,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Samples the tween, returning `(offset_y, opacity)`.
    pub fn sample(&self, now_ms: u64) -> (f32, f32) {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);

        let offset_y = self.from_offset_y * (1.0 - eased);
        let opacity = self.from_opacity + (1.0 - self.from_opacity) * eased;
        (offset_y, opacity)
    }
}
