//! Request plumbing shared by every provider call: request construction, dispatch, and
//! transport-error mapping.

pub use oauth2;

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, StatusCode,
		header::{ACCEPT, CONTENT_TYPE, HeaderValue},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	http::ProviderHttpClient,
	provider::Endpoint,
};

const APPLICATION_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(&self, endpoint: Endpoint, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, endpoint: Endpoint, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(endpoint, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::network(endpoint, OtherTransportError(message)).into(),
			_ => TransportError::network(
				endpoint,
				OtherTransportError("unrecognized HTTP client failure".into()),
			)
			.into(),
		}
	}
}

/// Free-form transport failure reported by an HTTP client as plain text.
#[derive(Debug, ThisError)]
#[error("{0}")]
pub struct OtherTransportError(pub String);

/// Builds a form-encoded `POST` request.
pub(crate) fn form_post(url: &Url, form: &BTreeMap<String, String>) -> Result<HttpRequest> {
	let body = form_urlencoded::Serializer::new(String::new()).extend_pairs(form.iter()).finish();

	oauth2::http::Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED))
		.header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
		.body(body.into_bytes())
		.map_err(|e| ConfigError::from(e).into())
}

/// Builds a `GET` request against `url` with the extra query pairs appended.
pub(crate) fn get_with_query(url: &Url, query: &[(&str, &str)]) -> Result<HttpRequest> {
	let mut url = url.clone();

	url.query_pairs_mut().extend_pairs(query);

	oauth2::http::Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
		.body(Vec::new())
		.map_err(|e| ConfigError::from(e).into())
}

/// Sends `request` through a fresh transport handle, mapping transport failures.
pub(crate) async fn dispatch<C, M>(
	http_client: &C,
	mapper: &M,
	endpoint: Endpoint,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	use oauth2::AsyncHttpClient;

	let handle = http_client.handle();

	handle.call(request).await.map_err(|e| mapper.map_transport_error(endpoint, e))
}

/// Returns true when the provider answered with HTTP 200.
pub(crate) fn is_ok(response: &HttpResponse) -> bool {
	response.status() == StatusCode::OK
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(endpoint: Endpoint, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { endpoint }.into();
	}

	TransportError::network(endpoint, err).into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn form_post_encodes_body_and_headers() {
		let url = Url::parse("https://api.example.com/oauth/access_token")
			.expect("Token endpoint fixture should parse.");
		let form = BTreeMap::from_iter([
			("client_id".to_owned(), "id".to_owned()),
			("code".to_owned(), "a b&c".to_owned()),
		]);
		let request = form_post(&url, &form).expect("Form request should build.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), "https://api.example.com/oauth/access_token");
		assert_eq!(
			request.headers().get(CONTENT_TYPE).map(HeaderValue::as_bytes),
			Some(FORM_URLENCODED.as_bytes())
		);
		assert_eq!(request.body().as_slice(), b"client_id=id&code=a+b%26c");
	}

	#[test]
	fn get_with_query_appends_pairs() {
		let url = Url::parse("https://api.example.com/profile?pretty=1")
			.expect("Profile endpoint fixture should parse.");
		let request =
			get_with_query(&url, &[("access_token", "t/1")]).expect("GET request should build.");

		assert_eq!(request.method(), Method::GET);
		assert_eq!(request.uri(), "https://api.example.com/profile?pretty=1&access_token=t%2F1");
		assert!(request.body().is_empty());
	}
}
