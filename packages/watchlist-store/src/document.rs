use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Highest code point the platform accepts in a field value. Appending it to
/// a prefix turns a half-open prefix scan into a closed lexicographic range.
pub const RANGE_SENTINEL: char = '\u{f8ff}';

/// One record as the platform returns it: an opaque string id plus a JSON
/// object body. Timestamps inside the body may arrive in the platform's
/// native `{seconds, nanos}` form; decoding normalizes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
	pub id: String,
	pub body: Value,
}

/// The whole query surface the platform offers: equality filters, at most
/// one lexicographic range on a single field, and ordering by a single
/// field. There is no case-insensitive matching, no substring matching, and
/// no cross-field OR; anything richer is filtered locally by the caller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuerySpec {
	#[serde(default)]
	pub filters: Vec<FieldFilter>,
	#[serde(default)]
	pub range: Option<RangeFilter>,
	#[serde(default)]
	pub order_by: Option<OrderBy>,
}
impl QuerySpec {
	/// Full collection fetch.
	pub fn all() -> Self {
		Self::default()
	}

	pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self {
			filters: vec![FieldFilter { field: field.into(), value: value.into() }],
			..Self::default()
		}
	}

	/// Closed range `[prefix, prefix + RANGE_SENTINEL]` on one field.
	pub fn prefix_range(field: impl Into<String>, prefix: &str) -> Self {
		Self {
			range: Some(RangeFilter {
				field: field.into(),
				lower: prefix.to_string(),
				upper: format!("{prefix}{RANGE_SENTINEL}"),
			}),
			..Self::default()
		}
	}

	pub fn order_desc(mut self, field: impl Into<String>) -> Self {
		self.order_by = Some(OrderBy { field: field.into(), descending: true });

		self
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldFilter {
	pub field: String,
	pub value: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RangeFilter {
	pub field: String,
	pub lower: String,
	pub upper: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderBy {
	pub field: String,
	pub descending: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefix_range_appends_the_sentinel() {
		let spec = QuerySpec::prefix_range("id_number", "199012345678");
		let range = spec.range.expect("range must be set");

		assert_eq!(range.lower, "199012345678");
		assert_eq!(range.upper, "199012345678\u{f8ff}");
	}

	#[test]
	fn builders_compose() {
		let spec = QuerySpec::field_eq("status", "pending").order_desc("created_at");

		assert_eq!(spec.filters.len(), 1);
		assert!(spec.order_by.as_ref().is_some_and(|order| order.descending));
	}
}
