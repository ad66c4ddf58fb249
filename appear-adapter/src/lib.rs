//! Driver utilities for the `appear` crate.
//!
//! The `appear` crate is UI-agnostic and focuses on the core scheduling
//! algorithm and state. This crate provides small, framework-neutral helpers
//! commonly needed by the layer that connects it to a real platform:
//!
//! - Visibility-source selection: intersection-observer signals when the
//!   platform has them, scroll/resize polling over the pending subset when it
//!   does not
//! - Observe/unobserve bookkeeping, so hosts know which elements to hand to
//!   their observer and when to let go of them
//! - Idle/wakeup hints for hosts that arm one-shot timers instead of running
//!   a continuous frame loop
//!
//! This crate is intentionally framework-agnostic (no DOM/TUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod key;


pub use controller::{Controller, VisibilityMode, OBSERVER_THRESHOLD};
pub use key::AppearKey;
