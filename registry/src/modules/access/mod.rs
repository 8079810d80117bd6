//! Caller identity and authorization model.
//!
//! Roles and capability grants arrive in JWT claims; handlers turn them into
//! a [`CapabilitySet`] value that is passed explicitly into service calls.

mod capabilities;
pub mod jwt;

pub use capabilities::{Capability, CapabilitySet, Role};
