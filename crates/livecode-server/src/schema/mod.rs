//! API request/response schema types.

pub mod programs;
