//! Session and authorization core

pub mod claims;
pub mod guard;
pub mod models;
pub mod session;
pub mod store;

pub use claims::{decode, Claims, DecodeError};
pub use guard::{evaluate, GuardOutcome, RoutePolicy, SessionContext};
pub use models::Role;
pub use session::Session;
pub use store::TokenStore;
