//! relay-core: shared infrastructure for the genai relay service.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
