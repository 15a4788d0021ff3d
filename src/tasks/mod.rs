//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Refresh: invalidates the cache and recomputes every view at a fixed interval

mod refresh;

pub use refresh::spawn_refresh_task;
