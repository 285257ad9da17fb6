//! Deterministic, pure logic for the setup engine.
//!
//! Core modules must be free of I/O side effects. They operate on the static
//! registry and an operator selection and return deterministic outputs.

pub mod bundled;
pub mod copy_plan;
pub mod path;
pub mod plan;
pub mod registry;
pub mod types;
