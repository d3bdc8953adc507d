//! Letterboxd collaborator: input parsing, page extraction, HTTP client

pub mod client;
pub mod page;
pub mod url;

pub use client::{LetterboxdClient, PAGE_SIZE};
pub use url::parse_list_ref;
