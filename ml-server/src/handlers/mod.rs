//! HTTP handlers

pub mod health;
pub mod classify;
pub mod stats;

#[cfg(test)]
mod tests;
