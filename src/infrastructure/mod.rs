//! Infrastructure layer: adapters implementing the domain ports.
//!
//! `in_memory` backs the payment store; `bank` talks to the acquiring bank
//! over HTTP.

pub mod bank;
pub mod in_memory;
