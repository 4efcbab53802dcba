//! Provider-facing descriptors (data) and strategies (behavior).
//!
//! `descriptor` exposes validated endpoint configuration (`ProviderDescriptor`) so hostnames
//! live in configuration instead of constants. `strategy` defines [`ProviderStrategy`] and
//! [`ProfileStrategy`], HTTP-client-agnostic hooks that shape token requests and parse
//! provider responses. `singly` ships the Singly implementation of both.

pub mod descriptor;
pub mod singly;
pub mod strategy;

pub use descriptor::*;
pub use singly::*;
pub use strategy::*;
