//! Configuration modules, each loaded from environment variables.
//!
//! - [`cors`]: Allowed origins for cross-origin requests
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT secret and token lifetimes
//! - [`server`]: Bind address for the HTTP listener

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;
