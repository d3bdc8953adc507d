//! Size-weighted sampling across paginated lists
//!
//! Split into three layers: [`pool`] picks a list weighted by size,
//! [`pages`] does the page arithmetic for a pick within a list, and
//! [`picker`] wires both to a [`crate::source::ListSource`].

pub mod pages;
pub mod picker;
pub mod pool;

pub use pages::{draw_page, page_count};
pub use picker::{format_probability, pick_random, sample_item};
pub use pool::SelectionPool;
