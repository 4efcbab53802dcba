//! Explicit per-session authentication state.
//!
//! A [`SessionContext`] is owned by the caller's session layer and passed into every
//! authenticated call. The client never caches it, so concurrent sessions cannot observe each
//! other's tokens. Serialized contexts use the well-known session keys
//! [`ACCESS_TOKEN_KEY`] and [`ACCOUNT_ID_KEY`], so string-keyed session stores and other
//! components reading those keys interoperate.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AccountId},
	error::AuthStateError,
};

/// Session key under which the access token is stored.
pub const ACCESS_TOKEN_KEY: &str = "singly_accesstoken";
/// Session key under which the linked account identifier is stored.
pub const ACCOUNT_ID_KEY: &str = "account_id";

/// Authentication state of one user session.
///
/// At most one access token is live at a time; storing a new one replaces the previous token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
	#[serde(rename = "singly_accesstoken", default, skip_serializing_if = "Option::is_none")]
	access_token: Option<AccessToken>,
	#[serde(rename = "account_id", default, skip_serializing_if = "Option::is_none")]
	account_id: Option<AccountId>,
}
impl SessionContext {
	/// Creates a context that already holds `token`.
	pub fn with_access_token(token: AccessToken) -> Self {
		Self { access_token: Some(token), account_id: None }
	}

	/// Attaches the linked account identifier.
	pub fn with_account_id(mut self, account_id: AccountId) -> Self {
		self.account_id = Some(account_id);

		self
	}

	/// Current access token, if one is stored.
	pub fn access_token(&self) -> Option<&AccessToken> {
		self.access_token.as_ref()
	}

	/// Linked account identifier, if one is stored.
	pub fn account_id(&self) -> Option<&AccountId> {
		self.account_id.as_ref()
	}

	/// Stores `token`, returning the token it replaced.
	pub fn set_access_token(&mut self, token: AccessToken) -> Option<AccessToken> {
		self.access_token.replace(token)
	}

	/// Stores the linked account identifier, returning the one it replaced.
	pub fn set_account_id(&mut self, account_id: AccountId) -> Option<AccountId> {
		self.account_id.replace(account_id)
	}

	/// Drops all authentication state (logout).
	pub fn clear(&mut self) {
		self.access_token = None;
		self.account_id = None;
	}

	/// Returns true when a non-empty access token is stored.
	pub fn is_authenticated(&self) -> bool {
		self.access_token.as_ref().is_some_and(|token| !token.is_empty())
	}

	/// Returns the access token or [`AuthStateError::MissingCredential`].
	///
	/// An empty token counts as missing.
	pub fn require_access_token(&self) -> Result<&AccessToken, AuthStateError> {
		self.access_token
			.as_ref()
			.filter(|token| !token.is_empty())
			.ok_or(AuthStateError::MissingCredential)
	}

	/// Account id and token to send when linking another service to the same account.
	///
	/// Both must be present; a session with only one of them links nothing.
	pub fn linked_account(&self) -> Option<(&AccountId, &AccessToken)> {
		let token = self.require_access_token().ok()?;

		self.account_id.as_ref().map(|account| (account, token))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn new_token_replaces_previous_one() {
		let mut session = SessionContext::with_access_token(AccessToken::new("first"));
		let previous = session.set_access_token(AccessToken::new("second"));

		assert_eq!(previous.as_ref().map(AccessToken::expose), Some("first"));
		assert_eq!(session.access_token().map(AccessToken::expose), Some("second"));
	}

	#[test]
	fn empty_token_counts_as_missing() {
		let session = SessionContext::with_access_token(AccessToken::new(""));

		assert!(!session.is_authenticated());
		assert_eq!(session.require_access_token(), Err(AuthStateError::MissingCredential));
		assert_eq!(
			SessionContext::default().require_access_token(),
			Err(AuthStateError::MissingCredential)
		);
	}

	#[test]
	fn linked_account_requires_both_parts() {
		let account = AccountId::new("acct-1").expect("Account fixture should be valid.");

		let account_only = SessionContext::default().with_account_id(account.clone());

		assert!(account_only.linked_account().is_none());

		let session =
			SessionContext::with_access_token(AccessToken::new("tok")).with_account_id(account);
		let (account, token) = session.linked_account().expect("Both parts should be linked.");

		assert_eq!(account.as_ref(), "acct-1");
		assert_eq!(token.expose(), "tok");
	}

	#[test]
	fn serializes_with_well_known_keys() {
		let session = SessionContext::with_access_token(AccessToken::new("tok"))
			.with_account_id(AccountId::new("acct-1").expect("Account fixture should be valid."));
		let value = serde_json::to_value(&session).expect("Session should serialize.");

		assert_eq!(value[ACCESS_TOKEN_KEY], "tok");
		assert_eq!(value[ACCOUNT_ID_KEY], "acct-1");

		let mut session = session;

		session.clear();

		assert_eq!(serde_json::to_string(&session).expect("Session should serialize."), "{}");
	}
}
