//! Pantry HTTP API.
//!
//! `app` builds the router, `middleware` resolves bearer tokens to sessions
//! and `context` carries the session into handlers.

pub mod app;
pub mod context;
pub mod middleware;
