//! Provider descriptor data structures shared by all flows.
//!
//! Endpoints are data, not constants: the Singly defaults are one preset, and any base URL
//! (a staging host, a local mock) yields the same endpoint layout.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Default Singly API host.
pub const SINGLY_BASE_URL: &str = "https://api.singly.com/";

/// Provider endpoints touched by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
	/// Authorization endpoint the user is redirected to.
	Authorization,
	/// Token endpoint that exchanges authorization codes.
	Token,
	/// Profile endpoint describing the authenticated user.
	Profile,
	/// Aggregated profiles endpoint listing linked services.
	Profiles,
}
impl Endpoint {
	/// Returns a stable label suitable for errors, spans, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Authorization => "authorization",
			Endpoint::Token => "token",
			Endpoint::Profile => "profile",
			Endpoint::Profiles => "profiles",
		}
	}

	/// Path of the endpoint relative to the provider base URL.
	pub const fn default_path(self) -> &'static str {
		match self {
			Endpoint::Authorization => "oauth/authorize",
			Endpoint::Token => "oauth/access_token",
			Endpoint::Profile => "profile",
			Endpoint::Profiles => "v0/profiles",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint used to build login URLs.
	pub authorization: Url,
	/// Token endpoint used for code exchanges.
	pub token: Url,
	/// Profile endpoint for the authenticated user.
	pub profile: Url,
	/// Aggregated profiles endpoint.
	pub profiles: Url,
}
impl ProviderEndpoints {
	/// Returns the URL configured for `endpoint`.
	pub fn get(&self, endpoint: Endpoint) -> &Url {
		match endpoint {
			Endpoint::Authorization => &self.authorization,
			Endpoint::Token => &self.token,
			Endpoint::Profile => &self.profile,
			Endpoint::Profiles => &self.profiles,
		}
	}
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
}
impl ProviderDescriptor {
	/// Creates a new, empty builder.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::default()
	}

	/// Descriptor targeting the public Singly API.
	pub fn singly() -> Result<Self, ProviderDescriptorError> {
		Self::from_base_url(SINGLY_BASE_URL)
	}

	/// Derives every endpoint from a base URL using the Singly path layout.
	pub fn from_base_url(base: impl AsRef<str>) -> Result<Self, ProviderDescriptorError> {
		let base = base.as_ref();
		let mut base = Url::parse(base)
			.map_err(|e| ProviderDescriptorError::InvalidBaseUrl { reason: e.to_string() })?;

		// `Url::join` drops the last path segment unless it ends with a slash.
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());

			base.set_path(&path);
		}

		let join = |endpoint: Endpoint| {
			base.join(endpoint.default_path())
				.map_err(|e| ProviderDescriptorError::InvalidBaseUrl { reason: e.to_string() })
		};

		Self::builder()
			.authorization_endpoint(join(Endpoint::Authorization)?)
			.token_endpoint(join(Endpoint::Token)?)
			.profile_endpoint(join(Endpoint::Profile)?)
			.profiles_endpoint(join(Endpoint::Profiles)?)
			.build()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn singly_preset_uses_public_endpoints() {
		let descriptor = ProviderDescriptor::singly().expect("Singly preset should be valid.");

		assert_eq!(
			descriptor.endpoints.authorization.as_str(),
			"https://api.singly.com/oauth/authorize"
		);
		assert_eq!(descriptor.endpoints.token.as_str(), "https://api.singly.com/oauth/access_token");
		assert_eq!(descriptor.endpoints.profile.as_str(), "https://api.singly.com/profile");
		assert_eq!(descriptor.endpoints.profiles.as_str(), "https://api.singly.com/v0/profiles");
	}

	#[test]
	fn base_url_without_trailing_slash_keeps_prefix() {
		let descriptor = ProviderDescriptor::from_base_url("https://proxy.example.com/singly")
			.expect("Prefixed base URL should be valid.");

		assert_eq!(
			descriptor.endpoints.get(Endpoint::Profiles).as_str(),
			"https://proxy.example.com/singly/v0/profiles"
		);
	}

	#[test]
	fn base_url_must_parse() {
		let err = ProviderDescriptor::from_base_url("not a url")
			.expect_err("Relative base URL should be rejected.");

		assert!(matches!(err, ProviderDescriptorError::InvalidBaseUrl { .. }));
	}
}
