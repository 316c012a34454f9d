use std::{
	cmp::Ordering,
	collections::HashMap,
	sync::{
		Mutex,
		atomic::{AtomicBool, Ordering as AtomicOrdering},
	},
};

use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use watchlist_store::{
	BoxFuture, Error, Result,
	document::{Document, QuerySpec},
	records::RecordStore,
};

/// Documents per collection in arrival order, so queries without an
/// explicit ordering observe insertion order the way the platform does.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
	collections: Mutex<HashMap<String, Vec<(String, Value)>>>,
	fail_queries: AtomicBool,
	fail_writes: AtomicBool,
}
impl MemoryRecordStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes every subsequent query fail, for store-error propagation
	/// tests.
	pub fn fail_queries(&self, fail: bool) {
		self.fail_queries.store(fail, AtomicOrdering::SeqCst);
	}

	/// Makes every subsequent put fail, for write-after-upload tests.
	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, AtomicOrdering::SeqCst);
	}

	pub fn document_count(&self, collection: &str) -> usize {
		self.collections
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.get(collection)
			.map(Vec::len)
			.unwrap_or(0)
	}
}
impl RecordStore for MemoryRecordStore {
	fn put<'a>(
		&'a self,
		collection: &'a str,
		id: &'a str,
		body: Value,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			if self.fail_writes.load(AtomicOrdering::SeqCst) {
				return Err(Error::Unexpected("Injected write failure.".to_string()));
			}

			let mut collections = self.collections.lock().unwrap_or_else(|err| err.into_inner());
			let docs = collections.entry(collection.to_string()).or_default();

			match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
				Some((_, existing)) => *existing = body,
				None => docs.push((id.to_string(), body)),
			}

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
			let mut collections = self.collections.lock().unwrap_or_else(|err| err.into_inner());
			let docs = collections.entry(collection.to_string()).or_default();
			let Some((_, existing)) = docs.iter_mut().find(|(doc_id, _)| doc_id == id) else {
				return Err(Error::Unexpected(format!("No document {collection}/{id}.")));
			};

			match (existing.as_object_mut(), fields.as_object()) {
				(Some(existing), Some(fields)) => {
					for (key, value) in fields {
						existing.insert(key.clone(), value.clone());
					}

					Ok(())
				},
				_ => Err(Error::Unexpected("Update requires object bodies.".to_string())),
			}
		})
	}

	fn get<'a>(
		&'a self,
		collection: &'a str,
		id: &'a str,
	) -> BoxFuture<'a, Result<Option<Document>>> {
		Box::pin(async move {
			let collections = self.collections.lock().unwrap_or_else(|err| err.into_inner());
			let doc = collections.get(collection).and_then(|docs| {
				docs.iter().find(|(doc_id, _)| doc_id == id).map(|(doc_id, body)| Document {
					id: doc_id.clone(),
					body: body.clone(),
				})
			});

			Ok(doc)
		})
	}

	fn delete<'a>(&'a self, collection: &'a str, id: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut collections = self.collections.lock().unwrap_or_else(|err| err.into_inner());

			if let Some(docs) = collections.get_mut(collection) {
				docs.retain(|(doc_id, _)| doc_id != id);
			}

			Ok(())
		})
	}

	fn query<'a>(
		&'a self,
		collection: &'a str,
		spec: QuerySpec,
	) -> BoxFuture<'a, Result<Vec<Document>>> {
		Box::pin(async move {
			if self.fail_queries.load(AtomicOrdering::SeqCst) {
				return Err(Error::Unexpected("Injected query failure.".to_string()));
			}

			let collections = self.collections.lock().unwrap_or_else(|err| err.into_inner());
			let mut docs: Vec<Document> = collections
				.get(collection)
				.map(|docs| {
					docs.iter()
						.filter(|(_, body)| matches_spec(body, &spec))
						.map(|(id, body)| Document { id: id.clone(), body: body.clone() })
						.collect()
				})
				.unwrap_or_default();

			if let Some(order) = &spec.order_by {
				docs.sort_by(|a, b| {
					let ordering =
						compare_field(a.body.get(&order.field), b.body.get(&order.field));

					if order.descending { ordering.reverse() } else { ordering }
				});
			}

			Ok(docs)
		})
	}
}

fn matches_spec(body: &Value, spec: &QuerySpec) -> bool {
	let equalities =
		spec.filters.iter().all(|filter| body.get(&filter.field) == Some(&filter.value));

	if !equalities {
		return false;
	}

	match &spec.range {
		Some(range) => body
			.get(&range.field)
			.and_then(Value::as_str)
			.is_some_and(|value| range.lower.as_str() <= value && value <= range.upper.as_str()),
		None => true,
	}
}

/// Timestamps compare chronologically when both sides parse as RFC 3339;
/// everything else falls back to string order. Missing fields sort first.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	match (a.and_then(Value::as_str), b.and_then(Value::as_str)) {
		(Some(a), Some(b)) => match (parse_stamp(a), parse_stamp(b)) {
			(Some(a), Some(b)) => a.cmp(&b),
			_ => a.cmp(b),
		},
		(Some(_), None) => Ordering::Greater,
		(None, Some(_)) => Ordering::Less,
		(None, None) => Ordering::Equal,
	}
}

fn parse_stamp(raw: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(raw, &Rfc3339).ok()
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn range_queries_are_inclusive_of_the_sentinel_bound() {
		let store = MemoryRecordStore::new();

		store.put("blacklist", "a", json!({ "id_number": "199012345678V" })).await.unwrap();
		store.put("blacklist", "b", json!({ "id_number": "200155555555" })).await.unwrap();

		let docs = store
			.query("blacklist", QuerySpec::prefix_range("id_number", "199012345678"))
			.await
			.unwrap();

		assert_eq!(docs.len(), 1);
		assert_eq!(docs[0].id, "a");
	}

	#[tokio::test]
	async fn orders_by_timestamp_descending() {
		let store = MemoryRecordStore::new();

		store.put("blacklist", "old", json!({ "created_at": "2024-01-01T00:00:00Z" })).await.unwrap();
		store.put("blacklist", "new", json!({ "created_at": "2024-06-01T00:00:00Z" })).await.unwrap();

		let docs =
			store.query("blacklist", QuerySpec::all().order_desc("created_at")).await.unwrap();

		assert_eq!(docs[0].id, "new");
		assert_eq!(docs[1].id, "old");
	}
}
