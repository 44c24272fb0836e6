//! Core application primitives (pipeline, scheduler)

pub mod pipeline;
pub mod scheduler;

pub use pipeline::*;
pub use scheduler::*;
