// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	provider::{Endpoint, ProviderDescriptor, ProviderEndpoints},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// A required endpoint was not supplied.
	#[error("Missing {endpoint} endpoint.")]
	MissingEndpoint {
		/// Which endpoint is missing.
		endpoint: Endpoint,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: Endpoint,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoints must not carry credentials or fragments.
	#[error("The {endpoint} endpoint must not embed credentials or a fragment: {url}.")]
	MalformedEndpoint {
		/// Which endpoint failed validation.
		endpoint: Endpoint,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Base URL could not be parsed or joined.
	#[error("Provider base URL is invalid: {reason}.")]
	InvalidBaseUrl {
		/// Parse failure summary.
		reason: String,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug, Default)]
pub struct ProviderDescriptorBuilder {
	/// Authorization endpoint used for login URLs.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used for code exchanges.
	pub token_endpoint: Option<Url>,
	/// Profile endpoint for the authenticated user.
	pub profile_endpoint: Option<Url>,
	/// Aggregated profiles endpoint.
	pub profiles_endpoint: Option<Url>,
}
impl ProviderDescriptorBuilder {
	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the profile endpoint.
	pub fn profile_endpoint(mut self, url: Url) -> Self {
		self.profile_endpoint = Some(url);

		self
	}

	/// Sets the aggregated profiles endpoint.
	pub fn profiles_endpoint(mut self, url: Url) -> Self {
		self.profiles_endpoint = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let require = |url: Option<Url>, endpoint| {
			url.ok_or(ProviderDescriptorError::MissingEndpoint { endpoint })
		};
		let endpoints = ProviderEndpoints {
			authorization: require(self.authorization_endpoint, Endpoint::Authorization)?,
			token: require(self.token_endpoint, Endpoint::Token)?,
			profile: require(self.profile_endpoint, Endpoint::Profile)?,
			profiles: require(self.profiles_endpoint, Endpoint::Profiles)?,
		};
		let descriptor = ProviderDescriptor { endpoints };

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		for endpoint in
			[Endpoint::Authorization, Endpoint::Token, Endpoint::Profile, Endpoint::Profiles]
		{
			validate_endpoint(endpoint, self.endpoints.get(endpoint))?;
		}

		Ok(())
	}
}

fn validate_endpoint(endpoint: Endpoint, url: &Url) -> Result<(), ProviderDescriptorError> {
	if !url.username().is_empty() || url.password().is_some() || url.fragment().is_some() {
		return Err(ProviderDescriptorError::MalformedEndpoint { endpoint, url: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ProviderDescriptorError::InsecureEndpoint { endpoint, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host_str() {
		Some("localhost") => true,
		Some(host) => host
			.trim_start_matches('[')
			.trim_end_matches(']')
			.parse::<IpAddr>()
			.map(|ip| ip.is_loopback())
			.unwrap_or(false),
		None => false,
	}
}
