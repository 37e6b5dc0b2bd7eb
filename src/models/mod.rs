//! Request and Response models for the read-strategy API
//!
//! DTOs for the HTTP boundary: seeding the source store, reading through a
//! strategy, and observing the cache engines.

pub mod requests;
pub mod responses;

pub use requests::SeedRequest;
pub use responses::{
    CacheStatus, ClearResponse, EntryMeta, ErrorResponse, HealthResponse, InvalidateResponse,
    MetricsResponse, ReadResponse, ResetResponse, SeedResponse,
};
