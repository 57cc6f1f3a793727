//! # smssplit
//!
//! SMS message splitter built on smssplit-core. Adds TOML configuration on
//! top of the core segmenter.

pub mod config;

// Re-export the segmentation API from core
pub use smssplit_core::*;

pub use config::{OutputFormat, SplitConfig, MAX_CONCATENATED_PARTS};
