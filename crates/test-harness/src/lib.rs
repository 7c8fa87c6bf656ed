//! Test harness for scene analysis scenarios.
//!
//! Provides programmatic tools for scripting multi-step scene setups,
//! verifying classification and intersection results at every step, and
//! generating diagnostic output on failure.
//!
//! # Key Components
//!
//! - [`SceneBuilder`] — Fluent API for building and analyzing scenes
//! - [`helpers`] — Geometry builders for faces, boxes, and segments
//! - [`assertions`] — Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod workflow;

pub use helpers::HarnessError;
pub use workflow::SceneBuilder;
