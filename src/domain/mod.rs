//! Domain layer: the payment model and the ports the core depends on.
//!
//! Everything here is infrastructure-free. The `ports` module defines the
//! traits adapters implement; `payment` and `request` hold the entities
//! flowing through them.

pub mod payment;
pub mod ports;
pub mod request;
