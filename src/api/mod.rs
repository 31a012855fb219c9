//! HTTP layer: translates requests into service calls.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - Endpoint handlers
//! - [`middleware`] - Tracing and rate limiting
//! - [`routes`] - `/api` route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
