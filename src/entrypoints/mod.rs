// Shared modules
pub(crate) mod cli;
mod metadata;
pub(crate) mod profiling;

// Entry points
pub mod main;
