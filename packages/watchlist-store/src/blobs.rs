use crate::{BoxFuture, Result};

/// Object storage for uploaded documents. `put` returns a durable download
/// locator for the written object.
pub trait BlobStore
where
	Self: Send + Sync,
{
	fn put<'a>(
		&'a self,
		path: &'a str,
		bytes: Vec<u8>,
		content_type: &'a str,
	) -> BoxFuture<'a, Result<String>>;
}

/// Deterministic object path for a record attachment, namespaced under the
/// owning record so uploads can precede the record write.
pub fn object_path(collection: &str, record_id: &str, file_name: &str) -> String {
	format!("{collection}/{record_id}/{file_name}")
}
