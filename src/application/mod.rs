//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `PaymentService` which acts as the primary entry
//! point for processing payments, and the validator it consults before any
//! bank call is made.

pub mod service;
pub mod validator;
