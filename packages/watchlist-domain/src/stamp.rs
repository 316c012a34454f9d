//! Timestamp serialization for stored records and API payloads. Values are
//! written as RFC 3339 strings; decoding also accepts the platform's native
//! `{seconds, nanos}` object so candidates read back from the record store
//! normalize to a plain timestamp.

pub mod option;

use serde::{Deserialize, Deserializer, Serializer, de};
use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStamp {
	Text(String),
	Native {
		seconds: i64,
		#[serde(default)]
		nanos: i64,
	},
}
impl RawStamp {
	fn resolve<E>(self) -> Result<OffsetDateTime, E>
	where
		E: de::Error,
	{
		match self {
			Self::Text(raw) => OffsetDateTime::parse(&raw, &Rfc3339).map_err(de::Error::custom),
			Self::Native { seconds, nanos } => OffsetDateTime::from_unix_timestamp(seconds)
				.map(|ts| ts + Duration::nanoseconds(nanos))
				.map_err(de::Error::custom),
		}
	}
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	RawStamp::deserialize(deserializer)?.resolve()
}
