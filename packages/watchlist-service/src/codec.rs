//! Conversion between stored documents and domain records. The record id is
//! the document address, not a body field; encode strips it and decode
//! injects it back before deserializing.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use watchlist_domain::{Agency, BlacklistEntry, UserRecord};
use watchlist_store::document::Document;

use crate::{AGENCIES_COLLECTION, BLACKLIST_COLLECTION, Error, Result, USERS_COLLECTION};

pub(crate) fn encode<T>(record: &T, id_key: &str) -> Result<Value>
where
	T: Serialize,
{
	let mut value = serde_json::to_value(record).map_err(|err| Error::InvalidRequest {
		message: format!("Failed to encode record: {err}."),
	})?;

	if let Some(map) = value.as_object_mut() {
		map.remove(id_key);
	}

	Ok(value)
}

fn decode<T>(collection: &'static str, id_key: &str, doc: Document) -> Result<T>
where
	T: DeserializeOwned,
{
	let Document { id, mut body } = doc;
	let Some(map) = body.as_object_mut() else {
		return Err(Error::Malformed { collection, id });
	};

	map.insert(id_key.to_string(), Value::String(id.clone()));

	serde_json::from_value(body).map_err(|_| Error::Malformed { collection, id })
}

pub(crate) fn entry_from_document(doc: Document) -> Result<BlacklistEntry> {
	decode(BLACKLIST_COLLECTION, "id", doc)
}

pub(crate) fn agency_from_document(doc: Document) -> Result<Agency> {
	decode(AGENCIES_COLLECTION, "id", doc)
}

pub(crate) fn user_from_document(doc: Document) -> Result<UserRecord> {
	decode(USERS_COLLECTION, "user_id", doc)
}

pub(crate) fn format_timestamp(ts: OffsetDateTime) -> Result<String> {
	ts.format(&Rfc3339)
		.map_err(|_| Error::InvalidRequest { message: "Failed to format timestamp.".to_string() })
}
