//! # ReelDraw Common Library
//!
//! Shared code for the ReelDraw service:
//! - Error types ([`error`])
//! - Domain model ([`model`])
//! - Randomness abstraction ([`random`])
//! - Size-weighted sampling core ([`sampling`])
//! - Letterboxd scraping client ([`letterboxd`])
//! - Configuration loading ([`config`])

pub mod config;
pub mod error;
pub mod letterboxd;
pub mod model;
pub mod random;
pub mod sampling;
pub mod source;

pub use error::{Error, Result};
