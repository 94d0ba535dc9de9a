//! HTTP server for the livecode sketch playground.
//!
//! Serves the editor and viewer pages, accepts program source over plain
//! HTTP bodies, and exposes the project picker API. All program access goes
//! through a [`livecode_storage::CodeStore`] chosen once at start-up.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
