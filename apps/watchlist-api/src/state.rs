use std::sync::Arc;

use watchlist_service::{AgencyNameCache, Stores, WatchlistService};
use watchlist_store::http::{HttpBlobStore, HttpIdentityProvider, HttpRecordStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<WatchlistService>,
}
impl AppState {
	pub fn new(config: watchlist_config::Config) -> watchlist_store::Result<Self> {
		let stores = Stores {
			records: Arc::new(HttpRecordStore::new(&config.storage.records)?),
			blobs: Arc::new(HttpBlobStore::new(&config.storage.blobs)?),
			identity: Arc::new(HttpIdentityProvider::new(&config.identity)?),
		};

		Ok(Self::with_stores(config, stores))
	}

	/// Explicit stores; tests inject the in-memory testkit implementations.
	pub fn with_stores(config: watchlist_config::Config, stores: Stores) -> Self {
		let service = WatchlistService::new(config, stores, AgencyNameCache::new());

		Self { service: Arc::new(service) }
	}
}
