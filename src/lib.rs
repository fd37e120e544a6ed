//! ConsultPro gateway - session-aware API gateway for the ConsultPro
//! booking platform
//!
//! This is the library interface for the gateway, exposing the session
//! core, the route guard, and the upstream clients for programmatic use.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod payments;
pub mod upstream;
pub mod validation;

pub use auth::Session;
pub use config::Config;
pub use error::Error;
