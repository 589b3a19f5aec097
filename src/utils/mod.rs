//! Common utilities and helpers

pub mod path;
