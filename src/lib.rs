//! navkit library exports for testing

pub mod core;
pub mod platform;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{Command, Mutation, Navigator, PresentationStyle};
