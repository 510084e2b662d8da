//! Interface layer: the inbound HTTP surface of the gateway.

pub mod http;
