//! Feature modules. Each module follows the same structure:
//!
//! - `model.rs`: Data models, DTOs, database structs
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration

pub mod auth;
pub mod enclosures;
pub mod feedings;
pub mod habitats;
pub mod users;
