//! service-core: Shared infrastructure for the story generator workspace.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
