//! Identifiers carried in login URLs, session contexts, and store keys.
//!
//! Service names are short lowercase slugs (`twitter`, `google_contacts`). Account and
//! session identifiers are opaque provider or web-layer values and only need to be
//! printable tokens.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $kind:literal, $rule:expr, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				$rule.check($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", $kind, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Identifier kind (`Service`, `Account`, `Session`).
		kind: &'static str,
	},
	/// The identifier contains a character its kind does not allow.
	#[error("{kind} identifier contains invalid character {character:?}.")]
	InvalidCharacter {
		/// Identifier kind (`Service`, `Account`, `Session`).
		kind: &'static str,
		/// First offending character.
		character: char,
	},
	/// The identifier is longer than its kind allows.
	#[error("{kind} identifier exceeds {max} bytes.")]
	TooLong {
		/// Identifier kind (`Service`, `Account`, `Session`).
		kind: &'static str,
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

#[derive(Clone, Copy)]
enum Rule {
	/// Lowercase ASCII letters, digits, `-` and `_`.
	Slug { max: usize },
	/// Anything printable without whitespace.
	Opaque { max: usize },
}
impl Rule {
	fn check(self, kind: &'static str, value: &str) -> Result<(), IdentifierError> {
		if value.is_empty() {
			return Err(IdentifierError::Empty { kind });
		}

		if let Some(character) = value.chars().find(|c| !self.allows(*c)) {
			return Err(IdentifierError::InvalidCharacter { kind, character });
		}

		let max = self.max_len();

		if value.len() > max {
			return Err(IdentifierError::TooLong { kind, max });
		}

		Ok(())
	}

	fn allows(self, c: char) -> bool {
		match self {
			Self::Slug { .. } =>
				c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_',
			Self::Opaque { .. } => !c.is_whitespace() && !c.is_control(),
		}
	}

	fn max_len(self) -> usize {
		match self {
			Self::Slug { max } | Self::Opaque { max } => max,
		}
	}
}

def_id! {
	ServiceName,
	"Service",
	Rule::Slug { max: 64 },
	"Upstream identity service Singly authenticates against (e.g. `twitter`)."
}
def_id! {
	AccountId,
	"Account",
	Rule::Opaque { max: 128 },
	"Singly account identifier used to link further services to one account."
}
def_id! {
	SessionId,
	"Session",
	Rule::Opaque { max: 128 },
	"Opaque identifier of a user session held by the web layer."
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn service_names_are_lowercase_slugs() {
		assert_eq!(ServiceName::new(""), Err(IdentifierError::Empty { kind: "Service" }));
		assert_eq!(
			ServiceName::new("face book"),
			Err(IdentifierError::InvalidCharacter { kind: "Service", character: ' ' })
		);
		assert!(ServiceName::new("Twitter").is_err(), "Uppercase names must be rejected.");

		let service =
			ServiceName::new("google_contacts").expect("Slug service name should be valid.");

		assert_eq!(service.as_ref(), "google_contacts");
		assert_eq!(format!("{service:?}"), "Service(google_contacts)");
		assert!(matches!(
			ServiceName::new("a".repeat(65)),
			Err(IdentifierError::TooLong { max: 64, .. })
		));
	}

	#[test]
	fn opaque_identifiers_accept_punctuation_but_not_whitespace() {
		AccountId::new("4f1c0e7a:Acct/42").expect("Punctuated account ids should be valid.");

		assert!(AccountId::new("acct\t42").is_err());
		assert!(SessionId::new("a".repeat(129)).is_err());

		SessionId::new("a".repeat(128)).expect("Exact length should succeed.");
	}

	#[test]
	fn deserialization_applies_the_same_rules() {
		let account: AccountId =
			serde_json::from_str("\"acct-42\"").expect("Account should deserialize successfully.");

		assert_eq!(account.as_ref(), "acct-42");
		assert!(serde_json::from_str::<AccountId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<ServiceName>("\"GitHub\"").is_err());
		assert!(serde_json::from_str::<SessionId>("\"\"").is_err());
	}

	#[test]
	fn session_ids_look_up_by_str() {
		let map: HashMap<SessionId, u8> = HashMap::from_iter([(
			SessionId::new("session-123").expect("Session used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("session-123"), Some(&7));
	}
}
