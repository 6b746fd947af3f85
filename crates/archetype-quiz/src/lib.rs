//! Commander color identity quiz.
//!
//! The [`quiz`] module holds the scoring core: answers are sanitized against the
//! question bank, tallied into per-color scores, resolved to a dominant color identity,
//! and matched against the recommendation table. The remaining modules carry the
//! configuration, telemetry, and error plumbing shared by the service binary.

pub mod config;
pub mod error;
pub mod quiz;
pub mod telemetry;
