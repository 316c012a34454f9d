//! `reqwest`-backed clients for the hosted platform's document database,
//! object storage, and identity endpoints.

pub mod blobs;
pub mod identity;
pub mod records;

pub use blobs::HttpBlobStore;
pub use identity::HttpIdentityProvider;
pub use records::HttpRecordStore;

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap},
};

use crate::{Error, Result};

fn client(timeout_ms: u64) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?)
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let value = format!("Bearer {api_key}")
		.parse()
		.map_err(|_| Error::InvalidArgument("API key is not a valid header value.".to_string()))?;

	headers.insert(AUTHORIZATION, value);

	Ok(headers)
}
