//! Upstream ConsultPro API access

pub mod client;

pub use client::{ConsultApi, LoginReply, UpstreamError};
