//! Centerline Core
//!
//! Ambient services used by the centerline chart engine: structured logging
//! setup and frame profiling.

pub mod logging;
pub mod profiling;
