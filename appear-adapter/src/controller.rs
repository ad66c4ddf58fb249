use alloc::vec::Vec;
use core::mem;

use appear::{AppearOptions, AppearScheduler, SchedulerOptions, TickSummary, Viewport};

use crate::AppearKey;

/// Fraction of an element's area that must become visible before an
/// intersection observer should report an entry.
pub const OBSERVER_THRESHOLD: f32 = 0.15;

/// How the platform reports visibility changes to the scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisibilityMode {
    /// An intersection-observer primitive is available. `threshold` is the
    /// visibility fraction the host should configure its observer with.
    Observer { threshold: f32 },
    /// No observer available: scroll/resize listeners drive bounding-box
    /// polling over the subset of elements still pending.
    Polling,
}

/// A framework-neutral controller that wraps an `appear::AppearScheduler` and
/// provides the common driver workflows (observer bookkeeping, polling
/// fallback, frame ticking).
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - `register` when elements are attached (the returned keys go to the
///   platform observer, when one exists)
/// - `on_intersection` / `on_scroll` / `on_resize` when platform events occur
/// - `tick(now_ms)` each frame (or at `next_wakeup_ms`), then
///   `drain_unobserve` to release finished elements from the observer
#[derive(Clone, Debug)]
pub struct Controller<K> {
    s: AppearScheduler<K>,
    mode: VisibilityMode,
    observed: Vec<K>,
    unobserve: Vec<K>,
}

impl<K: AppearKey> Controller<K> {
    /// Creates a controller for a platform with an intersection observer.
    pub fn new(options: SchedulerOptions<K>) -> Self {
        Self::from_scheduler(
            AppearScheduler::new(options),
            VisibilityMode::Observer {
                threshold: OBSERVER_THRESHOLD,
            },
        )
    }

    /// Creates a controller for a platform without an intersection observer.
    /// Visibility is then derived purely from scroll/resize polling; nothing
    /// else changes.
    pub fn polling(options: SchedulerOptions<K>) -> Self {
        Self::from_scheduler(AppearScheduler::new(options), VisibilityMode::Polling)
    }

    pub fn from_scheduler(s: AppearScheduler<K>, mode: VisibilityMode) -> Self {
        Self {
            s,
            mode,
            observed: Vec::new(),
            unobserve: Vec::new(),
        }
    }

    pub fn scheduler(&self) -> &AppearScheduler<K> {
        &self.s
    }

    pub fn scheduler_mut(&mut self) -> &mut AppearScheduler<K> {
        &mut self.s
    }

    pub fn into_scheduler(self) -> AppearScheduler<K> {
        self.s
    }

    pub fn visibility_mode(&self) -> VisibilityMode {
        self.mode
    }

    /// Registers elements with default animation options.
    ///
    /// See [`Controller::register_with`].
    pub fn register(&mut self, keys: impl IntoIterator<Item = K>) -> Vec<K> {
        self.register_with(keys, AppearOptions::default())
    }

    /// Registers elements and returns the keys the platform should start
    /// observing: newly registered, still-pending elements, each reported
    /// exactly once. In polling mode the returned list is always empty.
    pub fn register_with(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        options: AppearOptions,
    ) -> Vec<K> {
        let keys: Vec<K> = keys.into_iter().collect();
        self.s.register_with(keys.iter().cloned(), options);

        if matches!(self.mode, VisibilityMode::Polling) {
            return Vec::new();
        }

        let mut to_observe = Vec::new();
        for key in keys {
            if !self.s.is_registered(&key) || self.s.is_animated(&key) {
                continue;
            }
            if self.observed.contains(&key) {
                continue;
            }
            self.observed.push(key.clone());
            to_observe.push(key);
        }
        to_observe
    }

    /// Call this from the platform's intersection-observer callback. Entry
    /// details are not needed; any batch of entries triggers one coalesced
    /// reschedule.
    pub fn on_intersection(&mut self) {
        self.s.notify_visibility_event();
    }

    /// Call this on viewport scroll (both modes: scrolling changes element
    /// order even when an observer reports visibility).
    pub fn on_scroll(&mut self) {
        self.s.notify_scroll_event();
    }

    /// Call this on viewport resize with the new viewport box.
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.s.notify_resize_event(viewport);
    }

    /// Advances the scheduler and refreshes the observe/unobserve sets.
    pub fn tick(&mut self, now_ms: u64) -> TickSummary {
        let summary = self.s.tick(now_ms);
        self.sweep_observed();
        summary
    }

    /// Returns animated keys whose observation should stop, each exactly
    /// once.
    pub fn drain_unobserve(&mut self) -> Vec<K> {
        mem::take(&mut self.unobserve)
    }

    /// Whether the host still needs scroll/resize listeners. Observer-backed
    /// hosts keep them for the lifetime of the page (ordering stays
    /// deterministic while the user scrolls); polling hosts can detach them
    /// once nothing is pending.
    pub fn wants_viewport_events(&self) -> bool {
        match self.mode {
            VisibilityMode::Observer { .. } => true,
            VisibilityMode::Polling => self.s.pending_len() > 0,
        }
    }

    /// Whether there is nothing left to do until a new registration or
    /// visibility change arrives.
    pub fn is_idle(&self) -> bool {
        self.s.pending_len() == 0 && self.s.animating_len() == 0 && !self.s.reschedule_pending()
    }

    /// The next instant at which `tick` has work, for hosts that arm one-shot
    /// timers instead of running a continuous frame loop.
    pub fn next_wakeup_ms(&self) -> Option<u64> {
        self.s.next_deadline()
    }

    fn sweep_observed(&mut self) {
        let mut i = 0;
        while i < self.observed.len() {
            if self.s.is_animated(&self.observed[i]) {
                let key = self.observed.swap_remove(i);
                self.unobserve.push(key);
            } else {
                i += 1;
            }
        }
    }
}
