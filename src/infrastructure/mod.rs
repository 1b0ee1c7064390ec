//! Sandbox filesystem helpers.
//!
//! Inside Zellij the host filesystem is mounted under `/host`; user-supplied
//! paths such as `theme_file` are mapped onto it here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
