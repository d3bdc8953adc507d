//! HTTP API handlers for reeldraw-web

pub mod health;
pub mod randomize;
pub mod ui;

pub use health::health_routes;
pub use randomize::randomize;
pub use ui::{serve_app_js, serve_index, serve_style_css};
