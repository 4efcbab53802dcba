//! Profile models returned by the provider's resource endpoints.

// crates.io
use serde::{
	Deserializer,
	de::{self, MapAccess, Visitor},
};
use serde_json::Value;
// self
use crate::_prelude::*;

/// Profile of the authenticated user as reported by the profile endpoint.
///
/// Every field is required; a response missing any of them is rejected as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Provider-side user identifier.
	#[serde(deserialize_with = "provider_string")]
	pub id: String,
	/// Public profile URL.
	#[serde(deserialize_with = "provider_string")]
	pub url: String,
	/// User handle on the upstream service.
	#[serde(deserialize_with = "provider_string")]
	pub handle: String,
	/// Free-form profile description.
	#[serde(deserialize_with = "provider_string")]
	pub description: String,
	/// Avatar thumbnail URL.
	#[serde(deserialize_with = "provider_string")]
	pub thumbnail_url: String,
	/// Display name.
	#[serde(deserialize_with = "provider_string")]
	pub name: String,
}

/// Account-wide view listing every service linked to a Singly account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedProfile {
	/// Singly account identifier.
	pub id: String,
	/// Identifiers connected under each linked service, keyed by service name.
	pub services: BTreeMap<String, Vec<String>>,
}
impl AggregatedProfile {
	/// Key reserved for the account identifier in the provider payload.
	pub const ID_KEY: &'static str = "id";

	/// Identifiers linked under `service`, if the service is connected.
	pub fn service(&self, service: &str) -> Option<&[String]> {
		self.services.get(service).map(Vec::as_slice)
	}
}
impl<'de> Deserialize<'de> for AggregatedProfile {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(AggregatedProfileVisitor)
	}
}

struct AggregatedProfileVisitor;
impl<'de> Visitor<'de> for AggregatedProfileVisitor {
	type Value = AggregatedProfile;

	fn expecting(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("an object keyed by service name with an `id` entry")
	}

	fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut id = None;
		let mut services = BTreeMap::new();

		while let Some(key) = map.next_key::<String>()? {
			if key == AggregatedProfile::ID_KEY {
				if id.is_some() {
					return Err(de::Error::duplicate_field(AggregatedProfile::ID_KEY));
				}

				id = Some(map.next_value::<ProviderString>()?.0);
			} else {
				let values = map.next_value::<Vec<ProviderString>>()?;

				services.insert(key, values.into_iter().map(|value| value.0).collect());
			}
		}

		let id = id.ok_or_else(|| de::Error::missing_field(AggregatedProfile::ID_KEY))?;

		Ok(AggregatedProfile { id, services })
	}
}

/// Provider value rendered as text: strings verbatim, `null` as empty, anything else as JSON.
#[derive(Deserialize)]
#[serde(transparent)]
struct ProviderString(#[serde(deserialize_with = "provider_string")] String);

fn provider_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Value::deserialize(deserializer)? {
		Value::String(value) => value,
		Value::Null => String::new(),
		other => other.to_string(),
	})
}
