use uuid::Uuid;

use watchlist_store::records::RecordStore;

use crate::{BLACKLIST_COLLECTION, Result, WatchlistService};

impl WatchlistService {
	/// Hard delete of the record. Attachments under `blacklist/{id}/` stay
	/// in the blob store; there is no cascade.
	pub async fn delete_entry(&self, entry_id: Uuid) -> Result<()> {
		self.stores.records.delete(BLACKLIST_COLLECTION, &entry_id.to_string()).await?;

		tracing::info!(%entry_id, "Deleted blacklist entry.");

		Ok(())
	}
}
