//! HTTP API for an anonymous message board.
//!
//! Boards hold threads; threads hold replies. Every thread and reply carries
//! a delete password chosen by its poster.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;

pub use router::build_router;
pub use state::AppState;
