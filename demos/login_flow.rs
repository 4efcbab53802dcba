//! Walks through a Singly login: build the redirect, stash the attempt by `state`, and, when a
//! real authorization code is supplied, finish the login and read the linked profiles.
//!
//! Reads `SINGLY_SERVICE`, `SINGLY_CLIENT_ID`, and `SINGLY_CLIENT_SECRET` (falling back to demo
//! values) plus an optional `SINGLY_DEMO_CODE` holding the code from the provider redirect.

// std
use std::{collections::HashMap, env};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use singly_oauth::{
	auth::{ClientCredentials, SessionId},
	client::SinglyClient,
	config::ClientConfig,
	provider::ProviderDescriptor,
	session::SessionContext,
	store::{MemorySessionStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = match ClientConfig::from_env() {
		Ok(config) => SinglyClient::from_config(&config)?,
		Err(e) => {
			eprintln!("{e} Falling back to demo credentials.");

			let credentials = ClientCredentials::new("demo-client", "demo-secret", "facebook")?;

			SinglyClient::new(ProviderDescriptor::singly()?, credentials)?
		},
	};
	let return_url = Url::parse("https://app.example.com/auth/return")?;
	let attempt = client.start_login(&return_url, None, None);

	println!("Send your user to {}.", &attempt.login_url);

	let mut attempts = HashMap::new();

	attempts.insert(attempt.state.clone(), attempt.clone());

	// Simulate the redirect handler looking up the stored attempt by `state`.
	let returned_state = attempt.state.clone();
	let Some(stashed) = attempts.remove(&returned_state) else {
		eprintln!("State `{returned_state}` was not recognized.");

		return Ok(());
	};
	let Ok(code) = env::var("SINGLY_DEMO_CODE") else {
		println!("Set SINGLY_DEMO_CODE to the `code` from the redirect to finish the login.");

		return Ok(());
	};
	let sessions = MemorySessionStore::default();
	let session_id = SessionId::new("demo-session")?;
	let mut session = SessionContext::default();

	client.complete_login(stashed, &returned_state, &code, &mut session).await?;
	sessions.save(session_id.clone(), session).await?;

	let session = sessions.load(&session_id).await?.unwrap_or_default();
	let profile = client.fetch_user_profile(&session).await?;
	let profiles = client.fetch_aggregated_profile(&session).await?;

	println!("Signed in as {} ({}).", profile.name, profile.handle);

	for (service, ids) in &profiles.services {
		println!("Linked {service}: {}.", ids.join(", "));
	}

	Ok(())
}
