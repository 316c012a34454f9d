use uuid::Uuid;

use watchlist_domain::BlacklistEntry;
use watchlist_store::records::RecordStore;

use crate::{BLACKLIST_COLLECTION, Result, WatchlistService, codec};

impl WatchlistService {
	/// Point lookup. A missing entry is a valid outcome, not an error.
	pub async fn get_entry(&self, entry_id: Uuid) -> Result<Option<BlacklistEntry>> {
		let doc = self.stores.records.get(BLACKLIST_COLLECTION, &entry_id.to_string()).await?;

		doc.map(codec::entry_from_document).transpose()
	}
}
