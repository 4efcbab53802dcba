//! Client configuration layered from an optional file and `SINGLY_*` environment variables.

// std
use std::{path::Path, time::Duration as StdDuration};
// crates.io
use ::config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, ClientSecret},
	error::ConfigError,
	http::HttpTimeouts,
	provider::ProviderDescriptor,
};

/// Prefix of the environment variables read by the loaders, e.g. `SINGLY_CLIENT_ID`.
pub const ENV_PREFIX: &str = "SINGLY";

/// Everything needed to construct a [`SinglyClient`](crate::client::SinglyClient).
///
/// Field names double as setting keys: `client_id` in a file, `SINGLY_CLIENT_ID` in the
/// environment. Credentials are validated when converted, not when loaded, so configuration
/// errors surface from [`ClientConfig::credentials`] and the client constructors.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
	/// Default upstream service used when a login URL does not name one.
	pub service: String,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: ClientSecret,
	/// Provider base URL; the public Singly API when absent.
	#[serde(default)]
	pub base_url: Option<Url>,
	/// Whole-request deadline in seconds.
	#[serde(default = "default_timeout_secs")]
	pub timeout_secs: u64,
	/// Connect deadline in seconds.
	#[serde(default = "default_connect_timeout_secs")]
	pub connect_timeout_secs: u64,
}
impl ClientConfig {
	/// Loads the configuration from `SINGLY_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::load(Config::builder(), Environment::with_prefix(ENV_PREFIX))
	}

	/// Loads `path` (format picked by its extension), then applies `SINGLY_*` overrides.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		Self::load(
			Config::builder().add_source(File::from(path.as_ref())),
			Environment::with_prefix(ENV_PREFIX),
		)
	}

	fn load(builder: ConfigBuilder<DefaultState>, env: Environment) -> Result<Self, ConfigError> {
		let config = builder.add_source(env).build()?.try_deserialize()?;

		Ok(config)
	}

	/// Validates and returns the client registration.
	pub fn credentials(&self) -> Result<ClientCredentials> {
		ClientCredentials::new(
			self.client_id.as_str(),
			self.client_secret.expose(),
			self.service.as_str(),
		)
	}

	/// Descriptor for the configured base URL, or the public Singly API.
	pub fn descriptor(&self) -> Result<ProviderDescriptor, ConfigError> {
		let descriptor = match &self.base_url {
			Some(base_url) => ProviderDescriptor::from_base_url(base_url.as_str())?,
			None => ProviderDescriptor::singly()?,
		};

		Ok(descriptor)
	}

	/// Deadlines for the reqwest transport. Zero-second deadlines are rejected.
	pub fn timeouts(&self) -> Result<HttpTimeouts, ConfigError> {
		Ok(HttpTimeouts {
			request: nonzero_secs("timeout_secs", self.timeout_secs)?,
			connect: nonzero_secs("connect_timeout_secs", self.connect_timeout_secs)?,
		})
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("service", &self.service)
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("base_url", &self.base_url)
			.field("timeout_secs", &self.timeout_secs)
			.field("connect_timeout_secs", &self.connect_timeout_secs)
			.finish()
	}
}

fn default_timeout_secs() -> u64 {
	HttpTimeouts::DEFAULT_REQUEST.as_secs()
}

fn default_connect_timeout_secs() -> u64 {
	HttpTimeouts::DEFAULT_CONNECT.as_secs()
}

fn nonzero_secs(name: &'static str, secs: u64) -> Result<StdDuration, ConfigError> {
	if secs == 0 {
		return Err(ConfigError::InvalidSetting {
			name,
			reason: "must be at least one second".into(),
		});
	}

	Ok(StdDuration::from_secs(secs))
}
