//! A headless appear-animation engine for scroll-revealed UI elements.
//!
//! For driver-level utilities (observer bookkeeping, polling fallback), see the
//! `appear-adapter` crate.
//!
//! This crate focuses on the core scheduling algorithm needed to reveal page
//! elements exactly once, in a globally consistent top-to-bottom order: a
//! registry of pending elements, a coalesced reschedule pass that re-derives
//! the visible set and its stagger order from scratch, per-element one-shot
//! deadlines, and a small two-property tween (vertical offset + opacity).
//!
//! It is UI-agnostic. A DOM/GUI layer is expected to provide:
//! - viewport size and per-element bounding boxes (viewport-relative)
//! - visibility-change, scroll, and resize signals
//! - a frame loop calling [`AppearScheduler::tick`] with the current time
//! - a style sink applying [`ElementStyle`] updates to real elements
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod key;
mod options;
mod scheduler;
mod tween;
mod types;


pub use options::{
    ApplyStyleCallback, AppearOptions, DocumentOrderCallback, OnChangeCallback, RectProvider,
    SchedulerOptions, DEFAULT_DURATION_MS, DEFAULT_FROM_OFFSET_Y, DEFAULT_FROM_OPACITY,
    DEFAULT_STAGGER_MS,
};
pub use scheduler::AppearScheduler;
pub use tween::{Easing, Tween};
pub use types::{ElementId, ElementRect, ElementStyle, TickSummary, Viewport};

#[doc(hidden)]
pub use key::SchedulerKey;
