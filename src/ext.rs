//! Extension contracts for attaching session credentials to downstream requests.

pub mod request_signer;

pub use request_signer::*;
