//! HTTP API server

pub mod bookings;
pub mod payments;
pub mod routes;
pub mod server;

pub use server::*;
