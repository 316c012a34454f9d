use serde_json::Value;

use crate::{
	BoxFuture, Result,
	document::{Document, QuerySpec},
};

/// The hosted document database, reduced to the operations it actually
/// supports. Point lookups that find nothing return `Ok(None)`; absence is
/// a valid outcome, not an error.
pub trait RecordStore
where
	Self: Send + Sync,
{
	/// Creates or fully replaces one document.
	fn put<'a>(&'a self, collection: &'a str, id: &'a str, body: Value) -> BoxFuture<'a, Result<()>>;

	/// Merges the given fields into an existing document.
	fn update<'a>(
		&'a self,
		collection: &'a str,
		id: &'a str,
		fields: Value,
	) -> BoxFuture<'a, Result<()>>;

	fn get<'a>(&'a self, collection: &'a str, id: &'a str)
	-> BoxFuture<'a, Result<Option<Document>>>;

	/// Hard delete. Deleting an absent document is not an error.
	fn delete<'a>(&'a self, collection: &'a str, id: &'a str) -> BoxFuture<'a, Result<()>>;

	fn query<'a>(
		&'a self,
		collection: &'a str,
		spec: QuerySpec,
	) -> BoxFuture<'a, Result<Vec<Document>>>;
}
