//! Service-layer helpers behind the route handlers

pub mod locks;
pub mod stats;
