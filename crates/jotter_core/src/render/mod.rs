//! HTML rendering entry points.
//!
//! # Responsibility
//! - Turn note collections into escaped HTML fragments.
//! - Fill `{{ name }}` placeholders in page templates.
//!
//! # Invariants
//! - Rendering is pure: no I/O, no logging, no shared state.

pub mod html;
