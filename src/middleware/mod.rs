//! Authentication extractors for route handlers.
//!
//! [`auth`] provides three extractors with increasing strictness:
//! [`auth::OptionalAuthUser`], [`auth::AuthUser`] and [`auth::AdminUser`].

pub mod auth;
