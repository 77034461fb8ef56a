//! Session-aware HTTP gateway for the Sentiscope backend

pub mod client;
pub mod types;

pub use client::{Envelope, Gateway, GatewayBuilder, GatewayError, RequestConfig, ResponseBody};
