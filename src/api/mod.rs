//! API Module
//!
//! HTTP handlers and routing for the read-strategy REST API.
//!
//! # Endpoints
//! - `GET /read/:strategy/:key` - Read a key via direct, ttl, or lru
//! - `PUT /source` - Seed or update a source-of-truth record
//! - `DELETE /cache/:strategy/:key` - Invalidate one cached key
//! - `POST /cache/:strategy/clear` - Clear one cache engine
//! - `GET /metrics` - Both engines' metrics side by side
//! - `POST /metrics/reset` - Reset hit/miss counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
