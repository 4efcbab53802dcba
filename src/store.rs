//! Session storage contracts and the built-in in-memory store.
//!
//! Web layers that already own session state can skip this module and keep
//! [`SessionContext`] values wherever they like; the store exists for callers that want the
//! crate to hold per-session state keyed by [`SessionId`].

pub mod memory;

pub use memory::MemorySessionStore;

// self
use crate::{_prelude::*, auth::SessionId, session::SessionContext};

/// Future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for per-session authentication state.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the context for `session`.
	fn save(&self, session: SessionId, context: SessionContext) -> StoreFuture<'_, ()>;

	/// Fetches the context associated with `session`, if present.
	fn load<'a>(&'a self, session: &'a SessionId) -> StoreFuture<'a, Option<SessionContext>>;

	/// Removes the context for `session` (session end), returning it if present.
	fn remove<'a>(&'a self, session: &'a SessionId) -> StoreFuture<'a, Option<SessionContext>>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
