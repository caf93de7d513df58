//! Request and response bodies

pub mod classify;
pub mod stats;

pub use classify::*;
pub use stats::*;
