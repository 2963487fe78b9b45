//! signquiz-core: quiz catalog, scoring, and the attempt state machine.
//!
//! This crate defines the quiz data model, the validated catalog, the pure
//! scorer and progression gate, and the controller that drives a single
//! attempt through a catalog. Presentation layers render [`attempt::AttemptView`]
//! snapshots and feed [`attempt::Action`]s back in.

pub mod attempt;
pub mod catalog;
pub mod error;
pub mod gate;
pub mod media;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
