use alloc::sync::Arc;
use core::cmp::Ordering;

use crate::scheduler::AppearScheduler;
use crate::tween::Easing;
use crate::{ElementId, ElementRect, ElementStyle, Viewport};

/// Delay between consecutive appear animations in the computed order.
pub const DEFAULT_STAGGER_MS: u64 = 100;
/// Default appear transition duration.
pub const DEFAULT_DURATION_MS: u64 = 650;
/// Default vertical offset of the pre-animation state.
pub const DEFAULT_FROM_OFFSET_Y: f32 = 20.0;
/// Default opacity of the pre-animation state.
pub const DEFAULT_FROM_OPACITY: f32 = 0.0;

/// Queries the current viewport-relative bounding box of an element.
///
/// Returning `None` marks the element as detached/invalid: at registration it
/// is silently dropped, and during a reschedule pass it counts as not
/// visible.
pub type RectProvider<K> = Arc<dyn Fn(&K) -> Option<ElementRect> + Send + Sync>;

/// Total order of elements within the host document, used to break ties
/// between elements whose boxes share a top edge. `Ordering::Less` means ".0
/// comes earlier in the document".
pub type DocumentOrderCallback<K> = Arc<dyn Fn(&K, &K) -> Ordering + Send + Sync>;

/// Applies a visual state to an element.
pub type ApplyStyleCallback<K> = Arc<dyn Fn(&K, ElementStyle) + Send + Sync>;

/// A callback fired when scheduler state changes (registration, reschedule,
/// animation start/completion).
pub type OnChangeCallback<K> = Arc<dyn Fn(&AppearScheduler<K>) + Send + Sync>;

/// Per-element animation settings, immutable once the element is registered.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppearOptions {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Vertical offset (px) the element starts from.
    pub from_offset_y: f32,
    /// Opacity the element starts from, in `[0, 1]`.
    pub from_opacity: f32,
}

impl Default for AppearOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::EaseOut,
            from_offset_y: DEFAULT_FROM_OFFSET_Y,
            from_opacity: DEFAULT_FROM_OPACITY,
        }
    }
}

impl AppearOptions {
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_from_offset_y(mut self, from_offset_y: f32) -> Self {
        self.from_offset_y = from_offset_y;
        self
    }

    pub fn with_from_opacity(mut self, from_opacity: f32) -> Self {
        self.from_opacity = from_opacity;
        self
    }
}

/// Configuration for [`crate::AppearScheduler`].
///
/// This type is designed to be cheap to clone: platform providers are stored
/// in `Arc`s so adapters can update a few fields and call
/// `AppearScheduler::set_options` without reallocating closures.
pub struct SchedulerOptions<K = ElementId> {
    /// Bounding-box query primitive.
    pub get_rect: RectProvider<K>,
    /// Tie-break comparator for elements at equal top offset.
    pub document_order: DocumentOrderCallback<K>,
    /// Style sink; `None` makes the scheduler book-keeping-only.
    pub apply_style: Option<ApplyStyleCallback<K>>,
    /// Optional callback fired when the scheduler's internal state changes.
    pub on_change: Option<OnChangeCallback<K>>,
    /// Current viewport box. Elements are only scheduled while their rect
    /// overlaps this box.
    pub viewport: Viewport,
    /// Delay applied per rank in the computed visibility order.
    pub stagger_ms: u64,
    /// User preference for suppressing non-essential animation. Registration
    /// under reduced motion rests elements immediately.
    pub reduced_motion: bool,
}

impl<K> Clone for SchedulerOptions<K> {
    fn clone(&self) -> Self {
        Self {
            get_rect: Arc::clone(&self.get_rect),
            document_order: Arc::clone(&self.document_order),
            apply_style: self.apply_style.clone(),
            on_change: self.on_change.clone(),
            viewport: self.viewport,
            stagger_ms: self.stagger_ms,
            reduced_motion: self.reduced_motion,
        }
    }
}

impl SchedulerOptions<ElementId> {
    /// Creates options for elements keyed by ids assigned in document order
    /// (`ElementId = u64`), so the id ordering doubles as the tie-breaker.
    pub fn new(
        get_rect: impl Fn(&ElementId) -> Option<ElementRect> + Send + Sync + 'static,
    ) -> Self {
        Self::new_with_order(get_rect, |a: &ElementId, b: &ElementId| a.cmp(b))
    }
}

impl<K> SchedulerOptions<K> {
    /// Creates options with a custom document-order comparator.
    ///
    /// Use this when keys do not encode document position themselves (e.g.
    /// opaque element handles).
    pub fn new_with_order(
        get_rect: impl Fn(&K) -> Option<ElementRect> + Send + Sync + 'static,
        document_order: impl Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self {
            get_rect: Arc::new(get_rect),
            document_order: Arc::new(document_order),
            apply_style: None,
            on_change: None,
            viewport: Viewport::default(),
            stagger_ms: DEFAULT_STAGGER_MS,
            reduced_motion: false,
        }
    }

    pub fn with_document_order(
        mut self,
        document_order: impl Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.document_order = Arc::new(document_order);
        self
    }

    pub fn with_apply_style(
        mut self,
        apply_style: Option<impl Fn(&K, ElementStyle) + Send + Sync + 'static>,
    ) -> Self {
        self.apply_style = apply_style.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&AppearScheduler<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_stagger_ms(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }
}

impl<K> core::fmt::Debug for SchedulerOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SchedulerOptions")
            .field("viewport", &self.viewport)
            .field("stagger_ms", &self.stagger_ms)
            .field("reduced_motion", &self.reduced_motion)
            .finish_non_exhaustive()
    }
}
