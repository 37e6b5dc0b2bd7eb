//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service
//! operation.

mod sweep;

pub use sweep::spawn_sweep_task;
