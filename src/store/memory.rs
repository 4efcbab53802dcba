//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::SessionId,
	session::SessionContext,
	store::{SessionStore, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<SessionId, SessionContext>>>;

/// Storage backend that keeps session contexts in-process.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(StoreMap);
impl MemorySessionStore {
	/// Number of sessions currently held.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no session is held.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn save_now(map: StoreMap, session: SessionId, context: SessionContext) -> Result<(), StoreError> {
		map.write().insert(session, context);

		Ok(())
	}

	fn load_now(map: StoreMap, session: SessionId) -> Option<SessionContext> {
		map.read().get(&session).cloned()
	}

	fn remove_now(map: StoreMap, session: SessionId) -> Option<SessionContext> {
		map.write().remove(&session)
	}
}
impl SessionStore for MemorySessionStore {
	fn save(&self, session: SessionId, context: SessionContext) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::save_now(map, session, context) })
	}

	fn load<'a>(&'a self, session: &'a SessionId) -> StoreFuture<'a, Option<SessionContext>> {
		let map = self.0.clone();
		let session = session.to_owned();

		Box::pin(async move { Ok(Self::load_now(map, session)) })
	}

	fn remove<'a>(&'a self, session: &'a SessionId) -> StoreFuture<'a, Option<SessionContext>> {
		let map = self.0.clone();
		let session = session.to_owned();

		Box::pin(async move { Ok(Self::remove_now(map, session)) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::AccessToken;

	fn session_id(value: &str) -> SessionId {
		SessionId::new(value).expect("Session identifier fixture should be valid.")
	}

	#[tokio::test]
	async fn sessions_are_isolated() {
		let store = MemorySessionStore::default();

		store
			.save(session_id("a"), SessionContext::with_access_token(AccessToken::new("token-a")))
			.await
			.expect("Saving session a should succeed.");
		store
			.save(session_id("b"), SessionContext::with_access_token(AccessToken::new("token-b")))
			.await
			.expect("Saving session b should succeed.");

		let a = store
			.load(&session_id("a"))
			.await
			.expect("Loading session a should succeed.")
			.expect("Session a should be present.");

		assert_eq!(a.access_token().map(AccessToken::expose), Some("token-a"));
		assert_eq!(store.len(), 2);
	}
}
