use reqwest::{Client, StatusCode, header::HeaderMap};
use serde_json::Value;

use crate::{
	BoxFuture, Error, Result,
	document::{Document, QuerySpec},
	records::RecordStore,
};

pub struct HttpRecordStore {
	client: Client,
	api_base: String,
	headers: HeaderMap,
}
impl HttpRecordStore {
	pub fn new(cfg: &watchlist_config::Records) -> Result<Self> {
		Ok(Self {
			client: super::client(cfg.timeout_ms)?,
			api_base: cfg.api_base.clone(),
			headers: super::auth_headers(&cfg.api_key)?,
		})
	}

	fn document_url(&self, collection: &str, id: &str) -> String {
		format!("{}/v1/collections/{collection}/documents/{id}", self.api_base)
	}

	fn query_url(&self, collection: &str) -> String {
		format!("{}/v1/collections/{collection}/documents/query", self.api_base)
	}
}
impl RecordStore for HttpRecordStore {
	fn put<'a>(
		&'a self,
		collection: &'a str,
		id: &'a str,
		body: Value,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.client
				.put(self.document_url(collection, id))
				.headers(self.headers.clone())
				.json(&body)
				.send()
				.await?
				.error_for_status()?;

			Ok(())
		})
	}

	fn update<'a>(
		&'a self,
		collection: &'a str,
		id: &'a str,
		fields: Value,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.client
				.patch(self.document_url(collection, id))
				.headers(self.headers.clone())
				.json(&fields)
				.send()
				.await?
				.error_for_status()?;

			Ok(())
		})
	}

	fn get<'a>(
		&'a self,
		collection: &'a str,
		id: &'a str,
	) -> BoxFuture<'a, Result<Option<Document>>> {
		Box::pin(async move {
			let res = self
				.client
				.get(self.document_url(collection, id))
				.headers(self.headers.clone())
				.send()
				.await?;

			if res.status() == StatusCode::NOT_FOUND {
				return Ok(None);
			}

			let json: Value = res.error_for_status()?.json().await?;

			parse_document(json).map(Some)
		})
	}

	fn delete<'a>(&'a self, collection: &'a str, id: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let res = self
				.client
				.delete(self.document_url(collection, id))
				.headers(self.headers.clone())
				.send()
				.await?;

			// Deleting an absent document is a no-op, same as the platform SDK.
			if res.status() == StatusCode::NOT_FOUND {
				return Ok(());
			}

			res.error_for_status()?;

			Ok(())
		})
	}

	fn query<'a>(
		&'a self,
		collection: &'a str,
		spec: QuerySpec,
	) -> BoxFuture<'a, Result<Vec<Document>>> {
		Box::pin(async move {
			let json: Value = self
				.client
				.post(self.query_url(collection))
				.headers(self.headers.clone())
				.json(&spec)
				.send()
				.await?
				.error_for_status()?
				.json()
				.await?;

			parse_query_response(json)
		})
	}
}

fn parse_document(json: Value) -> Result<Document> {
	serde_json::from_value(json)
		.map_err(|err| Error::Unexpected(format!("Malformed document payload: {err}.")))
}

fn parse_query_response(json: Value) -> Result<Vec<Document>> {
	let documents = json
		.get("documents")
		.cloned()
		.ok_or_else(|| Error::Unexpected("Query response is missing documents.".to_string()))?;

	serde_json::from_value(documents)
		.map_err(|err| Error::Unexpected(format!("Malformed query response: {err}.")))
}
