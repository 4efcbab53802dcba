//! Auth-domain identifiers, credentials, secrets, and profile models.

pub mod credentials;
pub mod id;
pub mod profile;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use profile::*;
pub use secret::*;
