use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp::Ordering;

use crate::key::{EntryMap, SchedulerKey};
use crate::tween::Tween;
use crate::{
    AppearOptions, ElementId, ElementStyle, SchedulerOptions, TickSummary, Viewport,
};

/// Per-element side-table record.
///
/// `deadline_ms` is the at-most-one pending stagger timer; `tween` is the
/// running transition. An animated entry never keeps a deadline.
#[derive(Clone, Copy, Debug)]
struct Entry {
    options: AppearOptions,
    animated: bool,
    deadline_ms: Option<u64>,
    tween: Option<Tween>,
}

/// A headless appear-animation scheduler.
///
/// Registered elements are revealed exactly once, staggered in a globally
/// consistent top-to-bottom order derived from their current viewport-relative
/// boxes. The order is recomputed from scratch on every reschedule pass, never
/// patched incrementally, so it stays consistent under interleaved visibility
/// events, scrolling, and resizing.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; elements are opaque keys.
/// - Geometry and document order come from providers in [`SchedulerOptions`].
/// - Visual output leaves through the `apply_style` callback.
/// - Time is an explicit `now_ms` argument; the host's frame loop drives the
///   scheduler by calling [`AppearScheduler::tick`].
///
/// Visibility signals (`notify_*_event`, `request_reschedule`) only set a
/// flag: any number of signals between two ticks coalesce into a single
/// recompute at the next tick, bounding recompute frequency to the host's
/// frame rate.
#[derive(Clone, Debug)]
pub struct AppearScheduler<K = ElementId> {
    options: SchedulerOptions<K>,
    entries: EntryMap<K, Entry>,
    reschedule_requested: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: SchedulerKey> AppearScheduler<K> {
    pub fn new(options: SchedulerOptions<K>) -> Self {
        adebug!(
            stagger_ms = options.stagger_ms,
            reduced_motion = options.reduced_motion,
            "AppearScheduler::new"
        );
        Self {
            options,
            entries: EntryMap::new(),
            reschedule_requested: false,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &SchedulerOptions<K> {
        &self.options
    }

    /// Replaces the options wholesale and requests a reschedule, since a new
    /// rect provider or viewport may change which elements are visible.
    pub fn set_options(&mut self, options: SchedulerOptions<K>) {
        self.options = options;
        self.request_reschedule();
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut SchedulerOptions<K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_apply_style(
        &mut self,
        apply_style: Option<impl Fn(&K, ElementStyle) + Send + Sync + 'static>,
    ) {
        self.options.apply_style = apply_style.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&AppearScheduler<K>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn viewport(&self) -> Viewport {
        self.options.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.options.viewport == viewport {
            return;
        }
        self.options.viewport = viewport;
        self.request_reschedule();
        self.notify();
    }

    pub fn reduced_motion(&self) -> bool {
        self.options.reduced_motion
    }

    /// Updates the reduced-motion preference. Affects future registrations
    /// and timer firings; transitions already running finish normally.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        if self.options.reduced_motion == reduced_motion {
            return;
        }
        self.options.reduced_motion = reduced_motion;
        self.notify();
    }

    pub fn stagger_ms(&self) -> u64 {
        self.options.stagger_ms
    }

    pub fn set_stagger_ms(&mut self, stagger_ms: u64) {
        if self.options.stagger_ms == stagger_ms {
            return;
        }
        self.options.stagger_ms = stagger_ms;
        self.request_reschedule();
        self.notify();
    }

    /// Registers elements for a one-time appear animation with default
    /// options.
    ///
    /// See [`AppearScheduler::register_with`].
    pub fn register(&mut self, keys: impl IntoIterator<Item = K>) {
        self.register_with(keys, AppearOptions::default());
    }

    /// Registers elements for a one-time appear animation.
    ///
    /// Elements must already be attached to the host document so that their
    /// bounding boxes are meaningful. Keys whose rect provider returns `None`
    /// are silently dropped; keys already registered (pending or animated)
    /// are no-ops, so repeated registration is idempotent.
    ///
    /// Each newly registered element gets its pre-animation style applied
    /// immediately. Under reduced motion it is instead rested and marked
    /// animated, with no tracking and no timer.
    ///
    /// Adding at least one pending element requests a reschedule so that
    /// already-visible elements begin animating on the next tick without
    /// waiting for a new visibility event.
    pub fn register_with(&mut self, keys: impl IntoIterator<Item = K>, options: AppearOptions) {
        let mut added = 0usize;
        for key in keys {
            if self.entries.contains_key(&key) {
                continue;
            }
            if (self.options.get_rect)(&key).is_none() {
                continue;
            }

            if self.options.reduced_motion {
                self.apply(&key, ElementStyle::Rest);
                self.entries.insert(
                    key,
                    Entry {
                        options,
                        animated: true,
                        deadline_ms: None,
                        tween: None,
                    },
                );
                continue;
            }

            self.apply(
                &key,
                ElementStyle::Hidden {
                    offset_y: options.from_offset_y,
                    opacity: options.from_opacity,
                },
            );
            self.entries.insert(
                key,
                Entry {
                    options,
                    animated: false,
                    deadline_ms: None,
                    tween: None,
                },
            );
            added += 1;
        }

        adebug!(added, registered = self.entries.len(), "register");
        if added > 0 {
            self.request_reschedule();
            self.notify();
        }
    }

    /// Requests a reschedule pass on the next tick.
    ///
    /// Requests coalesce: any number of calls between two ticks result in one
    /// recompute.
    pub fn request_reschedule(&mut self) {
        self.reschedule_requested = true;
    }

    pub fn reschedule_pending(&self) -> bool {
        self.reschedule_requested
    }

    /// Signals that element visibility may have changed (e.g. an intersection
    /// observer callback fired).
    pub fn notify_visibility_event(&mut self) {
        atrace!("visibility event");
        self.request_reschedule();
    }

    /// Signals a viewport scroll.
    pub fn notify_scroll_event(&mut self) {
        atrace!("scroll event");
        self.request_reschedule();
    }

    /// Signals a viewport resize with the new viewport box.
    ///
    /// Always requests a reschedule, even for an unchanged viewport: a resize
    /// can move element boxes without changing the viewport itself.
    pub fn notify_resize_event(&mut self, viewport: Viewport) {
        atrace!("resize event");
        self.set_viewport(viewport);
        self.request_reschedule();
    }

    /// Advances the scheduler to `now_ms`: runs a pending reschedule pass,
    /// fires due stagger timers, and steps running transitions.
    ///
    /// This is the frame-boundary entry point; hosts call it from their frame
    /// callback (or a timer armed via [`AppearScheduler::next_deadline`]).
    pub fn tick(&mut self, now_ms: u64) -> TickSummary {
        let mut rescheduled = false;
        let mut started = 0usize;
        self.batch_update(|s| {
            if s.reschedule_requested {
                s.reschedule_requested = false;
                s.run_reschedule(now_ms);
                rescheduled = true;
            }
            started = s.fire_due(now_ms);
            s.advance_tweens(now_ms);
        });
        TickSummary {
            rescheduled,
            started,
            animating: self.animating_len(),
        }
    }

    /// Recomputes the visible-and-pending order from scratch and (re)arms one
    /// deadline per element at `now_ms + rank * stagger_ms`.
    fn run_reschedule(&mut self, now_ms: u64) {
        let viewport = self.options.viewport;

        // Visibility may have been lost since the signal that requested this
        // pass; cancel stale deadlines before rebuilding the schedule.
        let mut visible: Vec<(K, f32)> = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if entry.animated {
                entry.deadline_ms = None;
                continue;
            }
            match (self.options.get_rect)(key) {
                Some(rect) if rect.intersects(viewport) => visible.push((key.clone(), rect.top)),
                _ => entry.deadline_ms = None,
            }
        }

        // One global, deterministic order: ascending top edge, document order
        // on ties (NaN tops compare as ties).
        visible.sort_by(|a, b| match a.1.partial_cmp(&b.1) {
            Some(Ordering::Less) => Ordering::Less,
            Some(Ordering::Greater) => Ordering::Greater,
            _ => (self.options.document_order)(&a.0, &b.0),
        });

        let stagger = self.options.stagger_ms;
        for (rank, (key, _top)) in visible.iter().enumerate() {
            if let Some(entry) = self.entries.get_mut(key) {
                // Arming overwrites any previous deadline, so the stagger
                // always matches the latest order instead of stacking timers.
                entry.deadline_ms = Some(now_ms.saturating_add(rank as u64 * stagger));
            }
        }

        adebug!(visible = visible.len(), now_ms, "run_reschedule");
        self.notify();
    }

    /// Fires deadlines that have come due, in deadline order (document order
    /// on ties), marking each element animated and starting its transition.
    fn fire_due(&mut self, now_ms: u64) -> usize {
        let mut due: Vec<(u64, K)> = Vec::new();
        for (key, entry) in self.entries.iter() {
            if entry.animated {
                continue;
            }
            if let Some(deadline) = entry.deadline_ms {
                if deadline <= now_ms {
                    due.push((deadline, key.clone()));
                }
            }
        }
        if due.is_empty() {
            return 0;
        }
        due.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| (self.options.document_order)(&a.1, &b.1))
        });

        let reduced = self.options.reduced_motion;
        let mut started = 0usize;
        for (_deadline, key) in due {
            let rest = {
                let Some(entry) = self.entries.get_mut(&key) else {
                    continue;
                };
                if entry.animated {
                    continue;
                }
                entry.deadline_ms = None;
                entry.animated = true;
                if reduced {
                    true
                } else {
                    entry.tween = Some(Tween::new(
                        entry.options.from_offset_y,
                        entry.options.from_opacity,
                        now_ms,
                        entry.options.duration_ms,
                        entry.options.easing,
                    ));
                    false
                }
            };
            if rest {
                self.apply(&key, ElementStyle::Rest);
            }
            started += 1;
        }

        adebug!(started, now_ms, "fire_due");
        if started > 0 {
            self.notify();
        }
        started
    }

    /// Steps every running transition, emitting interpolated styles and
    /// resting finished elements. Started transitions always run to
    /// completion; reschedules never touch them.
    fn advance_tweens(&mut self, now_ms: u64) {
        let mut updates: Vec<(K, ElementStyle)> = Vec::new();
        let mut completed = 0usize;
        for (key, entry) in self.entries.iter_mut() {
            let Some(tween) = entry.tween else {
                continue;
            };
            if tween.is_done(now_ms) {
                entry.tween = None;
                completed += 1;
                updates.push((key.clone(), ElementStyle::Rest));
            } else {
                let (offset_y, opacity) = tween.sample(now_ms);
                updates.push((key.clone(), ElementStyle::Step { offset_y, opacity }));
            }
        }
        for (key, style) in updates {
            self.apply(&key, style);
        }
        if completed > 0 {
            atrace!(completed, now_ms, "transitions completed");
            self.notify();
        }
    }

    fn apply(&self, key: &K, style: ElementStyle) {
        if let Some(cb) = &self.options.apply_style {
            cb(key, style);
        }
    }

    pub fn is_registered(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether the element has appeared (or was rested under reduced motion).
    /// Transitions false→true exactly once and never reverts.
    pub fn is_animated(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|e| e.animated)
    }

    /// Whether the element's transition is currently running.
    pub fn is_animating(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|e| e.tween.is_some())
    }

    /// The element's pending stagger deadline, if one is armed.
    pub fn scheduled_at(&self, key: &K) -> Option<u64> {
        self.entries.get(key).and_then(|e| e.deadline_ms)
    }

    pub fn registered_len(&self) -> usize {
        self.entries.len()
    }

    /// Number of registered elements that have not yet appeared.
    pub fn pending_len(&self) -> usize {
        self.entries.values().filter(|e| !e.animated).count()
    }

    pub fn animating_len(&self) -> usize {
        self.entries.values().filter(|e| e.tween.is_some()).count()
    }

    /// The earliest armed deadline, if any. Hosts without a frame loop can
    /// arm a one-shot timer for this instant instead of polling.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries
            .values()
            .filter(|e| !e.animated)
            .filter_map(|e| e.deadline_ms)
            .min()
    }

    /// Iterates over registered, not-yet-animated keys without allocating.
    ///
    /// Fallback drivers use this to limit bounding-box polling to the subset
    /// of elements that can still animate.
    pub fn for_each_pending(&self, mut f: impl FnMut(&K)) {
        for (key, entry) in self.entries.iter() {
            if !entry.animated {
                f(key);
            }
        }
    }

    /// Collects registered, not-yet-animated keys into `out` (clears `out`
    /// first).
    pub fn collect_pending(&self, out: &mut Vec<K>) {
        out.clear();
        self.for_each_pending(|key| out.push(key.clone()));
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }
}
