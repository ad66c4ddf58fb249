//! Headless client-side behavior of a personal portfolio page.
//!
//! The page itself is static HTML; this crate owns the decisions its
//! interactive layer makes: parsing the projects feed and shaping it into
//! render-ready card models, planning the logo marquee, validating the idea
//! form, driving the two collapsible footer panels (with deep-link support),
//! and wiring sections into the `appear` animation engine.
//!
//! DOM construction, event listeners, fetching, and style mutation stay in
//! the platform layer; everything here is pure data in, data out.

mod error;

pub mod cards;
pub mod disclosure;
pub mod form;
pub mod marquee;
pub mod page;
pub mod projects;

#[cfg(test)]
mod tests;

pub use error::{PageError, Result};
