use serde::{Deserialize, Serialize};
use uuid::Uuid;

use watchlist_domain::BlacklistEntry;
use watchlist_store::{document::QuerySpec, records::RecordStore};

use crate::{BLACKLIST_COLLECTION, Result, WatchlistService, codec};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<BlacklistEntry>,
}

impl WatchlistService {
	/// Entries owned by one agency, newest first. Fully covered by the
	/// store's native query surface; no local filtering involved.
	pub async fn list_by_agency(&self, agency_id: Uuid) -> Result<ListResponse> {
		let spec = QuerySpec::field_eq("agency_id", agency_id.to_string()).order_desc("created_at");
		let docs = self.stores.records.query(BLACKLIST_COLLECTION, spec).await?;
		let items = docs.into_iter().map(codec::entry_from_document).collect::<Result<_>>()?;

		Ok(ListResponse { items })
	}

	/// Every entry, newest first. Admin view.
	pub async fn list_all(&self) -> Result<ListResponse> {
		let spec = QuerySpec::all().order_desc("created_at");
		let docs = self.stores.records.query(BLACKLIST_COLLECTION, spec).await?;
		let items = docs.into_iter().map(codec::entry_from_document).collect::<Result<_>>()?;

		Ok(ListResponse { items })
	}
}
