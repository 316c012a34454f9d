use serde::{Deserialize as _, Deserializer, Serializer};
use time::OffsetDateTime;

pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match value {
		Some(value) => crate::stamp::serialize(value, serializer),
		None => serializer.serialize_none(),
	}
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<serde_json::Value>::deserialize(deserializer)?;

	match raw {
		Some(value) => crate::stamp::deserialize(value).map(Some).map_err(serde::de::Error::custom),
		None => Ok(None),
	}
}
