//! Application credentials registered with the provider.

// self
use crate::{
	_prelude::*,
	auth::{ClientSecret, ServiceName},
	error::ConfigError,
};

/// Immutable client registration used by every flow.
///
/// Construction validates all three fields, so a value of this type can never carry an empty
/// client id, secret, or service name.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
	client_id: String,
	client_secret: ClientSecret,
	service: ServiceName,
}
impl ClientCredentials {
	/// Validates and bundles the provider registration.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		service: impl AsRef<str>,
	) -> Result<Self> {
		let client_id = client_id.into();
		let client_secret = client_secret.into();

		if service.as_ref().trim().is_empty() {
			return Err(ConfigError::EmptyField { field: "service" }.into());
		}
		if client_id.trim().is_empty() {
			return Err(ConfigError::EmptyField { field: "client_id" }.into());
		}
		if client_secret.trim().is_empty() {
			return Err(ConfigError::EmptyField { field: "client_secret" }.into());
		}

		let service = ServiceName::new(service.as_ref()).map_err(ConfigError::from)?;

		Ok(Self { client_id, client_secret: ClientSecret::new(client_secret), service })
	}

	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret sent to the token endpoint.
	pub fn client_secret(&self) -> &ClientSecret {
		&self.client_secret
	}

	/// Default upstream service used when a login URL does not name one.
	pub fn service(&self) -> &ServiceName {
		&self.service
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("service", &self.service)
			.finish()
	}
}
