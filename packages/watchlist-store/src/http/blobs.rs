use reqwest::{Client, header::HeaderMap};
use serde_json::Value;

use crate::{BoxFuture, Error, Result, blobs::BlobStore};

pub struct HttpBlobStore {
	client: Client,
	api_base: String,
	bucket: String,
	headers: HeaderMap,
}
impl HttpBlobStore {
	pub fn new(cfg: &watchlist_config::Blobs) -> Result<Self> {
		Ok(Self {
			client: super::client(cfg.timeout_ms)?,
			api_base: cfg.api_base.clone(),
			bucket: cfg.bucket.clone(),
			headers: super::auth_headers(&cfg.api_key)?,
		})
	}

	fn object_url(&self, path: &str) -> String {
		format!("{}/v1/buckets/{}/objects/{path}", self.api_base, self.bucket)
	}
}
impl BlobStore for HttpBlobStore {
	fn put<'a>(
		&'a self,
		path: &'a str,
		bytes: Vec<u8>,
		content_type: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			let json: Value = self
				.client
				.post(self.object_url(path))
				.headers(self.headers.clone())
				.header(reqwest::header::CONTENT_TYPE, content_type)
				.body(bytes)
				.send()
				.await?
				.error_for_status()?
				.json()
				.await?;

			parse_upload_response(json)
		})
	}
}

fn parse_upload_response(json: Value) -> Result<String> {
	json.get("download_url")
		.and_then(Value::as_str)
		.map(str::to_string)
		.ok_or_else(|| Error::Unexpected("Upload response is missing download_url.".to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_upload_response() {
		let json = serde_json::json!({ "download_url": "https://blobs.example.test/x" });

		assert_eq!(
			parse_upload_response(json).expect("parse failed"),
			"https://blobs.example.test/x",
		);
	}

	#[test]
	fn rejects_upload_response_without_locator() {
		assert!(parse_upload_response(serde_json::json!({})).is_err());
	}
}
