//! HTTP route handlers

pub mod items;
pub mod reviews;
pub mod stats;
