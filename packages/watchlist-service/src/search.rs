use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use watchlist_domain::{
	BlacklistEntry,
	query::{self, InvalidQueryReason, QueryShape},
};
use watchlist_store::{document::QuerySpec, records::RecordStore};

use crate::{BLACKLIST_COLLECTION, Error, Result, WatchlistService, codec};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<BlacklistEntry>,
}

/// The two implementations of the search contract. `Targeted` spends a
/// native range query on ID-shaped input and scans-and-filters for the
/// rest; `FullScan` always fetches the collection and filters locally. The
/// trade-off is one indexed lookup against O(collection) per search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStrategy {
	Targeted,
	FullScan,
}
impl SearchStrategy {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"targeted" => Some(Self::Targeted),
			"full-scan" => Some(Self::FullScan),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug)]
enum MatchRule {
	PassportExact,
	AnyFieldSubstring,
}

impl WatchlistService {
	/// Free-text lookup across full name, ID number, and passport number.
	/// The store cannot match case-insensitively or across fields, so
	/// everything beyond the ID range lookup happens locally on the fetched
	/// candidate set.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let strategy = SearchStrategy::parse(&self.cfg.search.strategy).ok_or_else(|| {
			Error::InvalidRequest {
				message: format!("Unknown search strategy {:?}.", self.cfg.search.strategy),
			}
		})?;
		let trimmed = req.query.trim();
		let shape = query::classify(trimmed).map_err(|reason| Error::InvalidQuery {
			message: match reason {
				InvalidQueryReason::Empty => "Search query must not be empty.".to_string(),
				InvalidQueryReason::TooShort => format!(
					"Name searches need at least {} characters; use an exact ID or passport number instead.",
					query::MIN_NAME_QUERY_CHARS,
				),
			},
		})?;
		let needle = trimmed.to_lowercase();
		let mut seen = HashSet::new();
		let mut items = Vec::new();

		tracing::debug!(?shape, ?strategy, "Classified search query.");

		match (strategy, shape) {
			(SearchStrategy::Targeted, QueryShape::IdLike) => {
				self.collect_id_range(trimmed, &mut seen, &mut items).await?;
			},
			(SearchStrategy::Targeted, QueryShape::PassportLike) => {
				self.collect_scan(&needle, MatchRule::PassportExact, &mut seen, &mut items).await?;
			},
			_ => {
				self.collect_scan(&needle, MatchRule::AnyFieldSubstring, &mut seen, &mut items)
					.await?;
			},
		}

		// Stable sort: creation-time ties keep their arrival order.
		items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		Ok(SearchResponse { items })
	}

	/// Native lexicographic prefix-range lookup on the ID-number field. ID
	/// numbers are uppercased on entry, so the case-sensitive range has to
	/// see the query the same way.
	async fn collect_id_range(
		&self,
		trimmed: &str,
		seen: &mut HashSet<Uuid>,
		items: &mut Vec<BlacklistEntry>,
	) -> Result<()> {
		let spec = QuerySpec::prefix_range("id_number", &trimmed.to_uppercase());
		let docs = self
			.stores
			.records
			.query(BLACKLIST_COLLECTION, spec)
			.await
			.map_err(|source| Error::SearchFailed { source })?;

		for doc in docs {
			let entry = codec::entry_from_document(doc)?;

			if seen.insert(entry.id) {
				items.push(entry);
			}
		}

		Ok(())
	}

	/// Full-collection fetch, newest first, with local filtering.
	async fn collect_scan(
		&self,
		needle: &str,
		rule: MatchRule,
		seen: &mut HashSet<Uuid>,
		items: &mut Vec<BlacklistEntry>,
	) -> Result<()> {
		let spec = QuerySpec::all().order_desc("created_at");
		let docs = self
			.stores
			.records
			.query(BLACKLIST_COLLECTION, spec)
			.await
			.map_err(|source| Error::SearchFailed { source })?;

		for doc in docs {
			let entry = codec::entry_from_document(doc)?;
			let matched = match rule {
				MatchRule::PassportExact => entry.passport_equals(needle),
				MatchRule::AnyFieldSubstring => entry.matches_substring(needle),
			};

			if matched && seen.insert(entry.id) {
				items.push(entry);
			}
		}

		Ok(())
	}
}
