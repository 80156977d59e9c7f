//! Shared helpers.

pub mod output;
