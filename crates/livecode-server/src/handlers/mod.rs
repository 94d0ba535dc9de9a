//! HTTP handler modules for the livecode server.
//!
//! Each sub-module implements thin handlers that extract the request,
//! delegate to [`ProgramService`](crate::service::ProgramService), and
//! return HTML, script, or JSON responses. No business logic lives in
//! handlers.

pub mod pages;
pub mod programs;
